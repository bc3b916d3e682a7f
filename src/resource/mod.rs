//! Resource abstraction layer
//!
//! One module per backend resource. Each module exposes pure request
//! builders (`admin::add`, `goods::delete`, ...) that turn parameters into a
//! [`RequestDescriptor`], and an `impl` block on [`AdminClient`] that sends
//! them (`client.add_admin(..)`, `client.delete_goods(..)`, ...).
//!
//! Payload shapes follow the backend exactly and are not normalized across
//! resources: some deletes send `{ids}`, some a bare array, goods sends its
//! ids as query parameters.
//!
//! # Example
//!
//! ```ignore
//! use seckill_admin::backend::AdminClient;
//!
//! async fn refund(client: &AdminClient) -> anyhow::Result<()> {
//!     let envelope = client.refund_order(42).await?;
//!     anyhow::ensure!(envelope.is_success(), "refund rejected");
//!     Ok(())
//! }
//! ```
//!
//! [`RequestDescriptor`]: crate::backend::RequestDescriptor
//! [`AdminClient`]: crate::backend::AdminClient

pub mod admin;
pub mod category;
pub mod employee;
pub mod goods;
mod ids;
mod serde_helpers;
pub mod order;
pub mod rider;
pub mod seckill;
pub mod user;

pub use admin::Admin;
pub use category::Category;
pub use employee::Employee;
pub use goods::Goods;
pub use ids::{Ids, ResourceId};
pub use order::Order;
pub use rider::{Rider, RiderAssignment};
pub use seckill::Seckill;
pub use user::User;

use crate::backend::{Attachment, ClientError, ClientResult, MultipartPayload};
use serde::Serialize;
use serde_json::{Map, Value};

/// Serialize params and require a JSON object (the `{ ...params }` spread)
pub(crate) fn spread<P: Serialize + ?Sized>(params: &P) -> ClientResult<Map<String, Value>> {
    let value = serde_json::to_value(params)
        .map_err(|e| ClientError::InvalidParams(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(ClientError::InvalidParams(format!(
            "expected an object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Flatten params into query pairs. Arrays repeat their key, nulls are dropped.
pub(crate) fn query_pairs<P: Serialize + ?Sized>(
    params: &P,
) -> ClientResult<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for (key, value) in spread(params)? {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    pairs.push((key.clone(), scalar_text(&item)));
                }
            }
            other => pairs.push((key, scalar_text(&other))),
        }
    }
    Ok(pairs)
}

/// Build a multipart form from params plus an optional file under `file_field`
pub(crate) fn multipart_form<P: Serialize + ?Sized>(
    params: &P,
    file_field: &str,
    file: Option<Attachment>,
) -> ClientResult<MultipartPayload> {
    let mut payload = MultipartPayload::from_object(&spread(params)?);
    if let Some(file) = file {
        payload.push_file(file_field, file);
    }
    Ok(payload)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
