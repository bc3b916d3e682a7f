//! Response envelope and pagination types
//!
//! Every backend endpoint answers with the same wrapper:
//!
//! ```json
//! { "code": 0, "msg": null, "data": { ... } }
//! ```

use super::error::{ClientError, ClientResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope code the backend uses for success unless configured otherwise
pub const DEFAULT_SUCCESS_CODE: i64 = 0;

/// Uniform response wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default, alias = "message")]
    pub msg: Option<String>,
    /// Missing or null on business failures
    pub data: Option<T>,
    /// Code treated as success when this envelope was decoded
    #[serde(skip, default = "default_success_code")]
    success_code: i64,
}

fn default_success_code() -> i64 {
    DEFAULT_SUCCESS_CODE
}

impl<T> Envelope<T> {
    pub fn new(code: i64, msg: Option<String>, data: Option<T>) -> Self {
        Self {
            code,
            msg,
            data,
            success_code: DEFAULT_SUCCESS_CODE,
        }
    }

    pub(crate) fn with_success_code(mut self, success_code: i64) -> Self {
        self.success_code = success_code;
        self
    }

    pub fn is_success(&self) -> bool {
        self.code == self.success_code
    }

    /// Payload of a successful envelope, or the business failure as an error
    pub fn into_data(self) -> ClientResult<T> {
        if !self.is_success() {
            return Err(ClientError::Application {
                code: self.code,
                msg: self.msg,
            });
        }
        self.data.ok_or_else(|| ClientError::Application {
            code: self.code,
            msg: Some("response carried no data".to_string()),
        })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            code: self.code,
            msg: self.msg,
            data: self.data.map(f),
            success_code: self.success_code,
        }
    }
}

impl Envelope<Value> {
    /// Convert the raw payload into `D`.
    ///
    /// Only a success payload has to fit `D`. On failure a payload that does
    /// not fit is dropped and the code and message are kept.
    pub(crate) fn decode_data<D: DeserializeOwned>(self) -> Result<Envelope<D>, serde_json::Error> {
        let success = self.is_success();
        let data = match self.data {
            Some(value) if success => Some(serde_json::from_value(value)?),
            Some(value) => serde_json::from_value(value).ok(),
            None => None,
        };

        Ok(Envelope {
            code: self.code,
            msg: self.msg,
            data,
            success_code: self.success_code,
        })
    }
}

/// Pagination request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub name: String,
    pub page: u32,
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl PageQuery {
    pub fn new(name: impl Into<String>, page: u32, page_size: u32) -> Self {
        Self {
            name: name.into(),
            page,
            page_size,
            total: None,
        }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new("", 1, 10)
    }
}

/// One page of results, in server order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    #[serde(alias = "records", default = "Vec::new")]
    pub list: Vec<T>,
    #[serde(default)]
    pub total: u64,
}
