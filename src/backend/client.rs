//! Admin client
//!
//! Combines a transport with envelope decoding. Resource operations live in
//! [`crate::resource`] as further `impl` blocks on [`AdminClient`].

use super::auth::Session;
use super::envelope::{Envelope, DEFAULT_SUCCESS_CODE};
use super::error::{ClientError, ClientResult, TransportError};
use super::http::HttpTransport;
use super::request::RequestDescriptor;
use crate::config::Config;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Issues one request and returns the decoded JSON body
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestDescriptor) -> Result<Value, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: RequestDescriptor) -> Result<Value, TransportError> {
        (**self).send(request).await
    }
}

/// Main backend client
#[derive(Clone, Debug)]
pub struct AdminClient<T = HttpTransport> {
    transport: T,
    success_code: i64,
}

impl<T: Transport> AdminClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            success_code: DEFAULT_SUCCESS_CODE,
        }
    }

    /// Use a different envelope code as the success marker
    pub fn with_success_code(mut self, success_code: i64) -> Self {
        self.success_code = success_code;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn success_code(&self) -> i64 {
        self.success_code
    }

    /// Send a descriptor and decode the envelope around its payload.
    ///
    /// The payload is only required to match `D` when the code reports
    /// success; failure envelopes always come back as values.
    pub async fn execute<D: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
    ) -> ClientResult<Envelope<D>> {
        tracing::debug!("execute: {}", request);

        let body = self.transport.send(request).await?;
        let envelope = serde_json::from_value::<Envelope<Value>>(body)
            .map_err(ClientError::Decode)?
            .with_success_code(self.success_code);

        if !envelope.is_success() {
            tracing::warn!(
                "backend returned code {}: {}",
                envelope.code,
                envelope.msg.as_deref().unwrap_or("-")
            );
        }

        envelope.decode_data().map_err(ClientError::Decode)
    }
}

impl AdminClient<HttpTransport> {
    /// Build an HTTP client from resolved configuration
    pub fn from_config(config: &Config) -> ClientResult<Self> {
        let session = Session::new(config.effective_token());
        let transport = HttpTransport::new(
            &config.effective_base_url(),
            Duration::from_secs(config.effective_timeout_secs()),
            session,
        )?;

        Ok(Self::new(transport).with_success_code(config.effective_success_code()))
    }

    /// Session shared with the underlying transport
    pub fn session(&self) -> &Session {
        self.transport.session()
    }
}
