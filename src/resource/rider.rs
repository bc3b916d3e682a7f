//! Delivery riders

use super::{multipart_form, serde_helpers, Ids, ResourceId};
use crate::backend::{AdminClient, Attachment, ClientResult, Envelope, RequestDescriptor, Transport};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ADD: &str = "admin/rider/add";
const ASSIGN: &str = "admin/rider/order";
const DELETE: &str = "admin/rider/detele";
const QUERY: &str = "admin/rider/query";
const QUERY_ALL: &str = "admin/rider/queryAll";

pub const AVATAR_FIELD: &str = "avatar";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Stored avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::opt_i64"
    )]
    pub status: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of the assign-order call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiderAssignment {
    pub order_id: ResourceId,
    pub rider_id: ResourceId,
}

pub fn add<P: Serialize + ?Sized>(
    params: &P,
    avatar: Option<Attachment>,
) -> ClientResult<RequestDescriptor> {
    Ok(RequestDescriptor::post(ADD).multipart(multipart_form(params, AVATAR_FIELD, avatar)?))
}

pub fn assign_order(
    order_id: impl Into<ResourceId>,
    rider_id: impl Into<ResourceId>,
) -> RequestDescriptor {
    let assignment = RiderAssignment {
        order_id: order_id.into(),
        rider_id: rider_id.into(),
    };
    RequestDescriptor::post(ASSIGN).json(serde_json::json!(assignment))
}

/// Bare JSON array body
pub fn delete(ids: impl Into<Ids>) -> RequestDescriptor {
    let ids: Ids = ids.into();
    RequestDescriptor::post(DELETE).json(serde_json::json!(ids))
}

pub fn get_by_id(id: impl Into<ResourceId>) -> RequestDescriptor {
    let id: ResourceId = id.into();
    RequestDescriptor::get(QUERY).query("id", id)
}

pub fn get_all() -> RequestDescriptor {
    RequestDescriptor::get(QUERY_ALL)
}

impl<T: Transport> AdminClient<T> {
    pub async fn add_rider<P: Serialize + ?Sized>(
        &self,
        params: &P,
        avatar: Option<Attachment>,
    ) -> ClientResult<Envelope<Value>> {
        self.execute(add(params, avatar)?).await
    }

    pub async fn assign_order(
        &self,
        order_id: impl Into<ResourceId>,
        rider_id: impl Into<ResourceId>,
    ) -> ClientResult<Envelope<Value>> {
        let request = assign_order(order_id, rider_id);
        tracing::info!("assign order: {:?}", request.body.as_json());
        self.execute(request).await
    }

    pub async fn delete_riders(&self, ids: impl Into<Ids>) -> ClientResult<Envelope<Value>> {
        let ids: Ids = ids.into();
        tracing::info!("delete riders: {}", ids);
        self.execute(delete(ids)).await
    }

    pub async fn get_rider(&self, id: impl Into<ResourceId>) -> ClientResult<Envelope<Rider>> {
        self.execute(get_by_id(id)).await
    }

    pub async fn list_riders(&self) -> ClientResult<Envelope<Vec<Rider>>> {
        self.execute(get_all()).await
    }
}
