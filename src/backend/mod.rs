//! Backend interaction module
//!
//! Core plumbing for talking to the shop administration backend: request
//! descriptors, the transport seam, response envelopes and the session.
//!
//! # Module Structure
//!
//! - [`request`] - Transport-agnostic request descriptors and multipart payloads
//! - [`client`] - [`AdminClient`] and the [`Transport`] trait
//! - [`http`] - reqwest-backed [`HttpTransport`]
//! - [`envelope`] - `{code, msg, data}` response wrapper and pagination types
//! - [`auth`] - Session token holder and login helpers
//! - [`error`] - Transport and client errors
//!
//! # Example
//!
//! ```ignore
//! use seckill_admin::backend::AdminClient;
//! use seckill_admin::config::Config;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = AdminClient::from_config(&Config::load())?;
//!     let goods = client.list_goods().await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod envelope;
pub mod error;
pub mod http;
pub mod request;

pub use auth::{session_token, Credentials, Session};
pub use client::{AdminClient, Transport};
pub use envelope::{Envelope, PageQuery, PageResult, DEFAULT_SUCCESS_CODE};
pub use error::{ClientError, ClientResult, TransportError};
pub use http::{format_backend_error, HttpTransport};
pub use request::{
    Attachment, Method, MultipartPayload, MultipartValue, RequestBody, RequestDescriptor,
    CONTENT_TYPE, MULTIPART_CONTENT_TYPE,
};
