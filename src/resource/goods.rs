//! Regular goods ("dity") catalogue
//!
//! Goods carry an image, so add and amend are multipart. The delete endpoint
//! (spelled `detele` on the backend) takes its ids as query parameters.

use super::{multipart_form, serde_helpers, Ids, ResourceId};
use crate::backend::{AdminClient, Attachment, ClientResult, Envelope, RequestDescriptor, Transport};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ADD: &str = "admin/dity/add";
const AMEND: &str = "admin/dity/amend";
const DELETE: &str = "admin/dity/detele";
const QUERY: &str = "admin/dity/query";
const QUERY_ALL: &str = "admin/dity/queryAll";

/// Multipart field holding the goods picture
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goods {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::opt_f64"
    )]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_id: Option<ResourceId>,
    /// Stored image URL
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

/// Ids travel as repeated `ids` query parameters, no body
pub fn delete(ids: impl Into<Ids>) -> RequestDescriptor {
    let ids: Ids = ids.into();
    ids.into_iter()
        .fold(RequestDescriptor::post(DELETE), |request, id| request.query("ids", id))
}

pub fn get_detail(id: impl Into<ResourceId>) -> RequestDescriptor {
    let id: ResourceId = id.into();
    RequestDescriptor::get(QUERY).query("id", id)
}

pub fn get_all() -> RequestDescriptor {
    RequestDescriptor::get(QUERY_ALL)
}

impl<T: Transport> AdminClient<T> {
    pub async fn add_goods<P: Serialize + ?Sized>(
        &self,
        params: &P,
        image: Option<Attachment>,
    ) -> ClientResult<Envelope<Value>> {
        self.execute(add(params, image)?).await
    }

    pub async fn update_goods<P: Serialize + ?Sized>(
        &self,
        params: &P,
        image: Option<Attachment>,
    ) -> ClientResult<Envelope<Value>> {
        self.execute(update(params, image)?).await
    }

    pub async fn delete_goods(&self, ids: impl Into<Ids>) -> ClientResult<Envelope<Value>> {
        let ids: Ids = ids.into();
        tracing::info!("delete goods: {}", ids);
        self.execute(delete(ids)).await
    }

    pub async fn get_goods(&self, id: impl Into<ResourceId>) -> ClientResult<Envelope<Goods>> {
        self.execute(get_detail(id)).await
    }

    pub async fn list_goods(&self) -> ClientResult<Envelope<Vec<Goods>>> {
        self.execute(get_all()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{
        Method, MultipartValue, RequestBody, CONTENT_TYPE, MULTIPART_CONTENT_TYPE,
    };
    use crate::resource::testing::client_with;
    use serde_json::json;

    fn apple() -> Goods {
        Goods {
            name: Some("apple".into()),
            price: Some(3.5),
            sort_id: Some(ResourceId::Int(2)),
            ..Default::default()
        }
    }

    #[test]
    fn add_is_multipart_with_image() {
        let image = Attachment::new("apple.png", "image/png", vec![1, 2, 3]);
        let request = add(&apple(), Some(image.clone())).unwrap();

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "admin/dity/add");
        assert_eq!(
            request.headers.get(CONTENT_TYPE).map(String::as_str),
            Some(MULTIPART_CONTENT_TYPE)
        );
        assert!(request.body.as_json().is_none());

        let form = request.body.as_multipart().unwrap();
        assert_eq!(form.get("name"), Some(&MultipartValue::Text("apple".into())));
        assert_eq!(form.get("price"), Some(&MultipartValue::Text("3.5".into())));
        assert_eq!(form.get("sortId"), Some(&MultipartValue::Text("2".into())));
        assert_eq!(form.get(IMAGE_FIELD), Some(&MultipartValue::File(image)));
    }

    #[test]
    fn update_is_multipart_even_without_image() {
        let request = update(&json!({"id": 4, "name": "pear"}), None).unwrap();
        assert_eq!(request.path, "admin/dity/amend");
        assert!(request.is_multipart());
        assert!(request.body.as_multipart().unwrap().get(IMAGE_FIELD).is_none());
    }

    #[test]
    fn delete_sends_ids_as_query() {
        let request = delete(vec![5, 6]);
        assert_eq!(request.path, "admin/dity/detele");
        assert_eq!(
            request.query,
            vec![
                ("ids".to_string(), "5".to_string()),
                ("ids".to_string(), "6".to_string())
            ]
        );
        assert_eq!(request.body, RequestBody::Empty);

        assert_eq!(delete(5).query, vec![("ids".to_string(), "5".to_string())]);
    }

    #[test]
    fn detail_and_list_paths() {
        let detail = get_detail(8);
        assert_eq!(detail.path, "admin/dity/query");
        assert_eq!(detail.query, vec![("id".to_string(), "8".to_string())]);
        assert_eq!(get_all().path, "admin/dity/queryAll");
        assert_eq!(get_all().method, Method::Get);
    }

    #[test]
    fn list_accepts_decimal_strings() {
        let client = client_with(json!({
            "code": 0,
            "data": [{"id": 1, "name": "apple", "price": "3.50", "status": "1"}]
        }));
        let goods = tokio_test::block_on(client.list_goods())
            .unwrap()
            .into_data()
            .unwrap();

        assert_eq!(goods[0].price, Some(3.5));
        assert_eq!(goods[0].status, Some(1));
    }

    #[test]
    fn list_failure_with_mismatched_data_is_an_envelope() {
        let client = client_with(json!({"code": 1, "msg": "not logged in", "data": ""}));
        let envelope = tokio_test::block_on(client.list_goods()).unwrap();

        assert!(!envelope.is_success());
        assert_eq!(envelope.code, 1);
        assert_eq!(envelope.msg.as_deref(), Some("not logged in"));
        assert!(envelope.data.is_none());
    }
}
