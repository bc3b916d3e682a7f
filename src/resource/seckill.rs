//! Flash-sale ("seckill") items
//!
//! Callers pass typed params; the client builds the payload. Adding an item
//! uploads its picture as multipart, amending is plain JSON and the status
//! switch goes through the amend endpoint with query parameters.

use super::{multipart_form, serde_helpers, spread, Ids, ResourceId};
use crate::backend::{AdminClient, Attachment, ClientResult, Envelope, RequestDescriptor, Transport};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ADD: &str = "admin/seckill/add";
const AMEND: &str = "admin/seckill/amend";
const DELETE: &str = "admin/seckill/detele";
const QUERY: &str = "admin/seckill/query";
const QUERY_ALL: &str = "admin/seckill/queryAll";

pub const IMAGE_FIELD: &str = "image";

/// Flash-sale item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seckill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Stored image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::opt_f64"
    )]
    pub price: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::opt_i64"
    )]
    pub status: Option<i64>,
    /// Sale window start, as the backend formats it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Stock available for the sale
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::opt_i64"
    )]
    pub number: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub fn add<P: Serialize + ?Sized>(
    params: &P,
    image: Option<Attachment>,
) -> ClientResult<RequestDescriptor> {
    Ok(RequestDescriptor::post(ADD).multipart(multipart_form(params, IMAGE_FIELD, image)?))
}

pub fn update<P: Serialize + ?Sized>(params: &P) -> ClientResult<RequestDescriptor> {
    Ok(RequestDescriptor::post(AMEND).json(Value::Object(spread(params)?)))
}

/// `id` and `status` as query parameters on the amend endpoint
pub fn update_status(id: impl Into<ResourceId>, status: i64) -> RequestDescriptor {
    let id: ResourceId = id.into();
    RequestDescriptor::post(AMEND)
        .query("id", id)
        .query("status", status)
}

/// Bare JSON array body
pub fn delete(ids: impl Into<Ids>) -> RequestDescriptor {
    let ids: Ids = ids.into();
    RequestDescriptor::post(DELETE).json(serde_json::json!(ids))
}

pub fn get_detail(id: impl Into<ResourceId>) -> RequestDescriptor {
    let id: ResourceId = id.into();
    RequestDescriptor::get(QUERY).query("id", id)
}

pub fn get_all() -> RequestDescriptor {
    RequestDescriptor::get(QUERY_ALL)
}

impl<T: Transport> AdminClient<T> {
    pub async fn add_seckill<P: Serialize + ?Sized>(
        &self,
        params: &P,
        image: Option<Attachment>,
    ) -> ClientResult<Envelope<Value>> {
        self.execute(add(params, image)?).await
    }

    pub async fn update_seckill<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> ClientResult<Envelope<Value>> {
        self.execute(update(params)?).await
    }

    pub async fn update_seckill_status(
        &self,
        id: impl Into<ResourceId>,
        status: i64,
    ) -> ClientResult<Envelope<Value>> {
        let id: ResourceId = id.into();
        tracing::info!("seckill {} status -> {}", id, status);
        self.execute(update_status(id, status)).await
    }

    pub async fn delete_seckills(&self, ids: impl Into<Ids>) -> ClientResult<Envelope<Value>> {
        let ids: Ids = ids.into();
        tracing::info!("delete seckill items: {}", ids);
        self.execute(delete(ids)).await
    }

    pub async fn get_seckill(&self, id: impl Into<ResourceId>) -> ClientResult<Envelope<Seckill>> {
        self.execute(get_detail(id)).await
    }

    pub async fn list_seckills(&self) -> ClientResult<Envelope<Vec<Seckill>>> {
        self.execute(get_all()).await
    }
}
