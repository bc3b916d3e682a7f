//! Employee (back-office staff) management
//!
//! Unlike the other resources, employees follow REST conventions: ids go in
//! the path, updates use PUT and deletes use DELETE.

use super::{query_pairs, serde_helpers, spread, ResourceId};
use crate::backend::{
    AdminClient, ClientResult, Envelope, PageQuery, PageResult, RequestDescriptor, Transport,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const REGISTER: &str = "/employee/register";
const FIX_PASSWORD: &str = "/employee/fixpwd";
const ADD: &str = "/employee/add";
const PAGE: &str = "/employee/page";
const UPDATE: &str = "/employee/update";

/// Employee account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    /// Role; 1 is super administrator. The backend spells it `sorct`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::opt_i64"
    )]
    pub sorct: Option<i64>,
    /// 1 enabled, 0 disabled
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::opt_i64"
    )]
    pub status: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Employee {
    pub fn is_enabled(&self) -> bool {
        self.status == Some(1)
    }
}

fn path_id(id: impl Into<ResourceId>) -> String {
    let id: ResourceId = id.into();
    urlencoding::encode(&id.to_string()).into_owned()
}

pub fn register<P: Serialize + ?Sized>(params: &P) -> ClientResult<RequestDescriptor> {
    Ok(RequestDescriptor::post(REGISTER).json(Value::Object(spread(params)?)))
}

/// Old and new password DTO
pub fn fix_password<P: Serialize + ?Sized>(params: &P) -> ClientResult<RequestDescriptor> {
    Ok(RequestDescriptor::put(FIX_PASSWORD).json(Value::Object(spread(params)?)))
}

pub fn add<P: Serialize + ?Sized>(params: &P) -> ClientResult<RequestDescriptor> {
    Ok(RequestDescriptor::post(ADD).json(Value::Object(spread(params)?)))
}

/// Page query fields go out as query parameters
pub fn page(query: &PageQuery) -> ClientResult<RequestDescriptor> {
    Ok(RequestDescriptor::get(PAGE).query_pairs(query_pairs(query)?))
}

pub fn get_by_id(id: impl Into<ResourceId>) -> RequestDescriptor {
    RequestDescriptor::get(format!("/employee/{}", path_id(id)))
}

pub fn update<P: Serialize + ?Sized>(params: &P) -> ClientResult<RequestDescriptor> {
    Ok(RequestDescriptor::put(UPDATE).json(Value::Object(spread(params)?)))
}

/// Toggle enabled/disabled; the backend decides the new state
pub fn update_status(id: impl Into<ResourceId>) -> RequestDescriptor {
    RequestDescriptor::put(format!("/employee/status/{}", path_id(id)))
}

pub fn delete(id: impl Into<ResourceId>) -> RequestDescriptor {
    RequestDescriptor::delete(format!("/employee/delete/{}", path_id(id)))
}

impl<T: Transport> AdminClient<T> {
    pub async fn register_employee<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> ClientResult<Envelope<Value>> {
        self.execute(register(params)?).await
    }

    pub async fn fix_employee_password<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> ClientResult<Envelope<Value>> {
        self.execute(fix_password(params)?).await
    }

    pub async fn add_employee<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> ClientResult<Envelope<Value>> {
        self.execute(add(params)?).await
    }

    pub async fn get_employee_page(
        &self,
        query: &PageQuery,
    ) -> ClientResult<Envelope<PageResult<Employee>>> {
        self.execute(page(query)?).await
    }

    pub async fn get_employee(
        &self,
        id: impl Into<ResourceId>,
    ) -> ClientResult<Envelope<Employee>> {
        self.execute(get_by_id(id)).await
    }

    pub async fn update_employee<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> ClientResult<Envelope<Value>> {
        self.execute(update(params)?).await
    }

    pub async fn update_employee_status(
        &self,
        id: impl Into<ResourceId>,
    ) -> ClientResult<Envelope<Value>> {
        let id: ResourceId = id.into();
        tracing::info!("toggle employee status: {}", id);
        self.execute(update_status(id)).await
    }

    pub async fn delete_employee(
        &self,
        id: impl Into<ResourceId>,
    ) -> ClientResult<Envelope<Value>> {
        let id: ResourceId = id.into();
        tracing::info!("delete employee: {}", id);
        self.execute(delete(id)).await
    }
}
