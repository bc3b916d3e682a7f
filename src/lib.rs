//! Typed client for the seckill shop administration backend.
//!
//! Every backend endpoint is one function: resource modules in [`resource`]
//! build request descriptors, [`backend::AdminClient`] sends them through a
//! [`backend::Transport`] and decodes the `{code, msg, data}` envelope.

pub mod backend;
pub mod config;
pub mod output;
pub mod resource;

pub use backend::{AdminClient, ClientError, ClientResult, Envelope, HttpTransport, Transport};
pub use config::Config;
