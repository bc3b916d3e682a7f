//! Orders

use super::{serde_helpers, ResourceId};
use crate::backend::{AdminClient, ClientResult, Envelope, RequestDescriptor, Transport};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

const QUERY_ALL: &str = "/admin/order/queryAll";
const AMEND: &str = "/admin/order/amend";

/// Order status the backend uses for refunded orders
pub const REFUNDED_STATUS: i64 = 4;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::opt_i64"
    )]
    pub status: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Order {
    pub fn is_refunded(&self) -> bool {
        self.status == Some(REFUNDED_STATUS)
    }
}

pub fn get_list() -> RequestDescriptor {
    RequestDescriptor::get(QUERY_ALL)
}

/// `{id, status: 4}` body, nothing in the query
pub fn refund(id: impl Into<ResourceId>) -> RequestDescriptor {
    let id: ResourceId = id.into();
    RequestDescriptor::post(AMEND).json(json!({ "id": id, "status": REFUNDED_STATUS }))
}

impl<T: Transport> AdminClient<T> {
    pub async fn list_orders(&self) -> ClientResult<Envelope<Vec<Order>>> {
        self.execute(get_list()).await
    }

    pub async fn refund_order(&self, id: impl Into<ResourceId>) -> ClientResult<Envelope<Value>> {
        let id: ResourceId = id.into();
        tracing::info!("refund order: {}", id);
        self.execute(refund(id)).await
    }
}
