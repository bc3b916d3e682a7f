//! Goods categories (the backend calls them "sort")

use super::{multipart_form, Ids, ResourceId};
use crate::backend::{AdminClient, Attachment, ClientResult, Envelope, RequestDescriptor, Transport};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ADD: &str = "/admin/sort/add";
const AMEND: &str = "/admin/sort/amend";
const DELETE: &str = "/admin/sort/delete";
const QUERY_ALL: &str = "/admin/sort/queryAll";

pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub fn add<P: Serialize + ?Sized>(
    params: &P,
    image: Option<Attachment>,
) -> ClientResult<RequestDescriptor> {
    Ok(RequestDescriptor::post(ADD).multipart(multipart_form(params, IMAGE_FIELD, image)?))
}

pub fn update<P: Serialize + ?Sized>(
    params: &P,
    image: Option<Attachment>,
) -> ClientResult<RequestDescriptor> {
    Ok(RequestDescriptor::post(AMEND).multipart(multipart_form(params, IMAGE_FIELD, image)?))
}

pub fn delete(ids: impl Into<Ids>) -> RequestDescriptor {
    let ids: Ids = ids.into();
    RequestDescriptor::post(DELETE).json(serde_json::json!(ids))
}

pub fn get_list() -> RequestDescriptor {
    RequestDescriptor::get(QUERY_ALL)
}

impl<T: Transport> AdminClient<T> {
    pub async fn add_category<P: Serialize + ?Sized>(
        &self,
        params: &P,
        image: Option<Attachment>,
    ) -> ClientResult<Envelope<Value>> {
        self.execute(add(params, image)?).await
    }

    pub async fn update_category<P: Serialize + ?Sized>(
        &self,
        params: &P,
        image: Option<Attachment>,
    ) -> ClientResult<Envelope<Value>> {
        self.execute(update(params, image)?).await
    }

    pub async fn delete_categories(&self, ids: impl Into<Ids>) -> ClientResult<Envelope<Value>> {
        let ids: Ids = ids.into();
        tracing::info!("delete categories: {}", ids);
        self.execute(delete(ids)).await
    }

    pub async fn list_categories(&self) -> ClientResult<Envelope<Vec<Category>>> {
        self.execute(get_list()).await
    }
}
