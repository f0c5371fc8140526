use reqwest::Method;
use serde_json::{json, Value};

use super::transport::HttpTransport;
use crate::error::{ClientError, ClientResult};

/// One row of the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
}

impl Endpoint {
    const fn get(path: &'static str) -> Self { Self { method: Method::GET, path } }
    const fn post(path: &'static str) -> Self { Self { method: Method::POST, path } }
}

pub const LOGIN: Endpoint = Endpoint::post("api/auth/login");
pub const ME: Endpoint = Endpoint::get("api/auth/me");
pub const LOGOUT: Endpoint = Endpoint::post("api/auth/logout");
pub const CHANGE_PASSWORD: Endpoint = Endpoint::post("api/auth/change-password");
pub const MEMBER_PROFILE: Endpoint = Endpoint::get("api/member/profile");
pub const MEMBER_LEDGER: Endpoint = Endpoint::get("api/member/ledger");
pub const MEMBER_DUE_SUMMARY: Endpoint = Endpoint::get("api/member/due-summary");
pub const MEMBER_SHARE_DETAILS: Endpoint = Endpoint::get("api/member/share-details");
pub const ADMIN_MEMBERS: Endpoint = Endpoint::get("api/admin/members");
pub const ADMIN_DEPOSITS: Endpoint = Endpoint::get("api/admin/deposits");
pub const ADMIN_DUE_SUMMARY: Endpoint = Endpoint::get("api/admin/due-summary");

pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=2999;
pub const PER_PAGE_RANGE: std::ops::RangeInclusive<u32> = 1..=500;

/// Typed parameters in, raw JSON tree out. No interpretation of the payload happens here.
#[derive(Clone)]
pub struct EndpointClient {
    transport: HttpTransport,
    device_name: String,
}

impl EndpointClient {
    pub fn new(transport: HttpTransport, device_name: impl Into<String>) -> Self {
        Self { transport, device_name: device_name.into() }
    }

    pub fn transport(&self) -> &HttpTransport { &self.transport }

    async fn call(&self, ep: Endpoint, query: &[(&str, String)], body: Option<&Value>) -> ClientResult<Value> {
        let resp = self.transport.send(ep.method, ep.path, query, body).await?;
        Ok(resp.body)
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Value> {
        let email = require("email", email)?;
        if password.trim().is_empty() {
            return Err(ClientError::validation("password must not be blank"));
        }
        let body = json!({ "email": email, "password": password, "device_name": self.device_name });
        self.call(LOGIN, &[], Some(&body)).await
    }

    pub async fn me(&self) -> ClientResult<Value> { self.call(ME, &[], None).await }

    pub async fn logout(&self) -> ClientResult<Value> { self.call(LOGOUT, &[], None).await }

    pub async fn change_password(&self, current: &str, new: &str) -> ClientResult<Value> {
        if current.trim().is_empty() || new.trim().is_empty() {
            return Err(ClientError::validation("current and new password must not be blank"));
        }
        let body = json!({ "current_password": current, "new_password": new });
        self.call(CHANGE_PASSWORD, &[], Some(&body)).await
    }

    pub async fn member_profile(&self) -> ClientResult<Value> { self.call(MEMBER_PROFILE, &[], None).await }

    pub async fn member_ledger(&self, year: Option<i32>) -> ClientResult<Value> {
        self.call(MEMBER_LEDGER, &year_query(year)?, None).await
    }

    pub async fn member_due_summary(&self, year: Option<i32>) -> ClientResult<Value> {
        self.call(MEMBER_DUE_SUMMARY, &year_query(year)?, None).await
    }

    pub async fn member_share_details(&self) -> ClientResult<Value> { self.call(MEMBER_SHARE_DETAILS, &[], None).await }

    pub async fn admin_members(&self, search: Option<&str>, per_page: Option<u32>) -> ClientResult<Value> {
        self.call(ADMIN_MEMBERS, &listing_query(search, per_page)?, None).await
    }

    pub async fn admin_deposits(&self, search: Option<&str>, per_page: Option<u32>) -> ClientResult<Value> {
        self.call(ADMIN_DEPOSITS, &listing_query(search, per_page)?, None).await
    }

    pub async fn admin_due_summary(&self, search: Option<&str>, per_page: Option<u32>) -> ClientResult<Value> {
        self.call(ADMIN_DUE_SUMMARY, &listing_query(search, per_page)?, None).await
    }
}

fn require<'a>(name: &str, value: &'a str) -> ClientResult<&'a str> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ClientError::validation(format!("{} must not be blank", name)));
    }
    Ok(v)
}

/// Absent year means no `year` parameter at all.
pub fn year_query(year: Option<i32>) -> ClientResult<Vec<(&'static str, String)>> {
    let mut q = Vec::new();
    if let Some(y) = year {
        if !YEAR_RANGE.contains(&y) {
            return Err(ClientError::validation(format!("year {} outside {}..={}", y, YEAR_RANGE.start(), YEAR_RANGE.end())));
        }
        q.push(("year", y.to_string()));
    }
    Ok(q)
}

/// Blank search counts as absent; absent parameters are omitted rather than sent empty.
pub fn listing_query(search: Option<&str>, per_page: Option<u32>) -> ClientResult<Vec<(&'static str, String)>> {
    let mut q = Vec::new();
    if let Some(s) = search.map(str::trim).filter(|s| !s.is_empty()) {
        q.push(("search", s.to_string()));
    }
    if let Some(n) = per_page {
        if !PER_PAGE_RANGE.contains(&n) {
            return Err(ClientError::validation(format!("per_page {} outside {}..={}", n, PER_PAGE_RANGE.start(), PER_PAGE_RANGE.end())));
        }
        q.push(("per_page", n.to_string()));
    }
    Ok(q)
}
