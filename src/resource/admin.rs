//! Administrator accounts and login

use super::{serde_helpers, spread, Ids, ResourceId};
use crate::backend::{
    session_token, AdminClient, ClientResult, Credentials, Envelope, HttpTransport,
    RequestDescriptor, Transport,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

const ADD: &str = "admin/add";
const AMEND: &str = "admin/amend";
const DELETE: &str = "admin/delete";
const LOGIN: &str = "admin/login";
const QUERY: &str = "admin/query";
const QUERY_ALL: &str = "admin/queryAll";

/// Administrator account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::opt_i64"
    )]
    pub status: Option<i64>,
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

pub fn login(credentials: &Credentials) -> ClientResult<RequestDescriptor> {
    Ok(RequestDescriptor::post(LOGIN).json(Value::Object(spread(credentials)?)))
}

pub fn get_by_id(id: impl Into<ResourceId>) -> RequestDescriptor {
    let id: ResourceId = id.into();
    RequestDescriptor::get(QUERY).query("id", id)
}

pub fn get_all() -> RequestDescriptor {
    RequestDescriptor::get(QUERY_ALL)
}

impl<T: Transport> AdminClient<T> {
    pub async fn add_admin<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> ClientResult<Envelope<Value>> {
        self.execute(add(params)?).await
    }

    pub async fn update_admin<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> ClientResult<Envelope<Value>> {
        self.execute(update(params)?).await
    }

    pub async fn delete_admins(&self, ids: impl Into<Ids>) -> ClientResult<Envelope<Value>> {
        let ids: Ids = ids.into();
        tracing::info!("delete admins: {}", ids);
        self.execute(delete(ids)).await
    }

    pub async fn get_admin(&self, id: impl Into<ResourceId>) -> ClientResult<Envelope<Admin>> {
        self.execute(get_by_id(id)).await
    }

    pub async fn list_admins(&self) -> ClientResult<Envelope<Vec<Admin>>> {
        self.execute(get_all()).await
    }

    /// Log in; the payload carries the session token
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<Envelope<Value>> {
        tracing::info!("login as {}", credentials.username);
        self.execute(login(credentials)?).await
    }
}

impl AdminClient<HttpTransport> {
    /// Log in and, on success, install the returned token on this client's session
    pub async fn sign_in(&self, credentials: &Credentials) -> ClientResult<Envelope<Value>> {
        let envelope = self.login(credentials).await?;
        if envelope.is_success() {
            match envelope.data.as_ref().and_then(session_token) {
                Some(token) => self.session().set_token(token).await,
                None => tracing::warn!("login succeeded but no token was returned"),
            }
        }
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Method;
    use crate::resource::testing::{client, client_with};

    #[test]
    fn add_spreads_params_into_json_body() {
        let admin = Admin {
            username: Some("root".into()),
            password: Some("secret".into()),
            ..Default::default()
        };
        let request = add(&admin).unwrap();

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "admin/add");
        assert_eq!(
            request.body.as_json(),
            Some(&json!({"username": "root", "password": "secret"}))
        );
        assert!(request.headers.is_empty());
    }

    #[test]
    fn delete_wraps_ids() {
        assert_eq!(delete(3).body.as_json(), Some(&json!({"ids": [3]})));
        assert_eq!(delete(vec![3, 4]).body.as_json(), Some(&json!({"ids": [3, 4]})));
    }

    #[test]
    fn query_uses_id_parameter() {
        let request = get_by_id(9);
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path, "admin/query");
        assert_eq!(request.query, vec![("id".to_string(), "9".to_string())]);
    }

    #[test]
    fn login_posts_credentials() {
        let request = login(&Credentials::new("root", "pw")).unwrap();
        assert_eq!(request.path, "admin/login");
        assert_eq!(
            request.body.as_json(),
            Some(&json!({"username": "root", "password": "pw"}))
        );
    }

    #[test]
    fn list_decodes_typed_admins() {
        let client = client_with(json!({
            "code": 0,
            "data": [{"id": 1, "username": "root", "createTime": "2024-01-01"}]
        }));

        let admins = tokio_test::block_on(client.list_admins())
            .unwrap()
            .into_data()
            .unwrap();

        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].username.as_deref(), Some("root"));
        assert_eq!(admins[0].extra["createTime"], "2024-01-01");
        assert_eq!(client.transport().single().path, "admin/queryAll");
    }

    #[test]
    fn update_rejects_non_object_params() {
        let client = client();
        let result = tokio_test::block_on(client.update_admin(&vec![1, 2]));
        assert!(result.is_err());
        assert!(client.transport().recorded().is_empty());
    }
}
