//! Shop customers

use super::{spread, Ids, ResourceId};
use crate::backend::{AdminClient, ClientResult, Envelope, RequestDescriptor, Transport};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

const ADD: &str = "/admin/user/add";
const AMEND: &str = "/admin/user/amend";
const DELETE: &str = "/admin/user/delete";
const QUERY: &str = "/admin/user/query";
const QUERY_ALL: &str = "/admin/user/queryAll";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub fn add<P: Serialize + ?Sized>(params: &P) -> ClientResult<RequestDescriptor> {
    Ok(RequestDescriptor::post(ADD).json(Value::Object(spread(params)?)))
}

pub fn update<P: Serialize + ?Sized>(params: &P) -> ClientResult<RequestDescriptor> {
    Ok(RequestDescriptor::post(AMEND).json(Value::Object(spread(params)?)))
}

/// `{ids: [...]}` body
pub fn delete(ids: impl Into<Ids>) -> RequestDescriptor {
    let ids: Ids = ids.into();
    RequestDescriptor::post(DELETE).json(json!({ "ids": ids }))
}

pub fn get_detail(id: impl Into<ResourceId>) -> RequestDescriptor {
    let id: ResourceId = id.into();
    RequestDescriptor::get(QUERY).query("id", id)
}

pub fn get_list() -> RequestDescriptor {
    RequestDescriptor::get(QUERY_ALL)
}

impl<T: Transport> AdminClient<T> {
    pub async fn add_user<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> ClientResult<Envelope<Value>> {
        self.execute(add(params)?).await
    }

    pub async fn update_user<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> ClientResult<Envelope<Value>> {
        self.execute(update(params)?).await
    }

    pub async fn delete_users(&self, ids: impl Into<Ids>) -> ClientResult<Envelope<Value>> {
        let ids: Ids = ids.into();
        tracing::info!("delete users: {}", ids);
        self.execute(delete(ids)).await
    }

    pub async fn get_user(&self, id: impl Into<ResourceId>) -> ClientResult<Envelope<User>> {
        self.execute(get_detail(id)).await
    }

    pub async fn list_users(&self) -> ClientResult<Envelope<Vec<User>>> {
        self.execute(get_list()).await
    }
}
