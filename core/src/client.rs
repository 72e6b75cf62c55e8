//! Blocking client for the burger ordering API.
//!
//! # Design
//! `BurgerClient` holds the endpoint registry and a `Transport`; it keeps no
//! session. Each operation is split the same way: a pure `build_*` method
//! produces the `HttpRequest`, and the executing method sends it and returns
//! the `HttpResponse` untouched. Status codes are never inspected here.
//!
//! Authorization is an `Option<&str>` on the operations where the service
//! lets callers choose. `None` (or an empty token) means the `Authorization`
//! header is left out entirely. `delete_user` takes a plain `&str` and always
//! sends it.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::endpoints::Endpoints;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{LogoutRequest, Order, PasswordReset, RefreshTokenRequest, User, UserCredentials};

pub const AUTHORIZATION: &str = "authorization";
const CONTENT_TYPE: &str = "content-type";
const APPLICATION_JSON: &str = "application/json";

#[derive(Clone)]
pub struct BurgerClient {
    endpoints: Endpoints,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for BurgerClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BurgerClient")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl BurgerClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }

    pub fn from_config(config: &ClientConfig) -> ApiResult<Self> {
        config.validate()?;
        Ok(Self::new(&config.base_url))
    }

    pub fn with_transport(base_url: &str, transport: impl Transport + 'static) -> Self {
        Self {
            endpoints: Endpoints::new(base_url),
            transport: Arc::new(transport),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    // -------------------------------------------------------------------------
    // Request builders
    // -------------------------------------------------------------------------

    pub fn build_create_user(&self, user: &User) -> ApiResult<HttpRequest> {
        json_request(HttpMethod::Post, self.endpoints.register(), user, None)
    }

    pub fn build_login_user(&self, credentials: &UserCredentials) -> ApiResult<HttpRequest> {
        json_request(HttpMethod::Post, self.endpoints.login(), credentials, None)
    }

    pub fn build_get_user(&self, access_token: Option<&str>) -> HttpRequest {
        bare_request(HttpMethod::Get, self.endpoints.user(), access_token)
    }

    pub fn build_update_user(&self, access_token: Option<&str>, user: &User) -> ApiResult<HttpRequest> {
        json_request(HttpMethod::Patch, self.endpoints.user(), user, access_token)
    }

    pub fn build_delete_user(&self, access_token: &str) -> HttpRequest {
        let mut request = bare_request(HttpMethod::Delete, self.endpoints.user(), None);
        request
            .headers
            .push((AUTHORIZATION.to_string(), access_token.to_string()));
        request
    }

    pub fn build_create_order(&self, access_token: Option<&str>, order: &Order) -> ApiResult<HttpRequest> {
        json_request(HttpMethod::Post, self.endpoints.orders(), order, access_token)
    }

    pub fn build_get_user_orders(&self, access_token: Option<&str>) -> HttpRequest {
        bare_request(HttpMethod::Get, self.endpoints.orders(), access_token)
    }

    pub fn build_get_all_orders(&self) -> HttpRequest {
        bare_request(HttpMethod::Get, self.endpoints.all_orders(), None)
    }

    pub fn build_get_ingredients(&self) -> HttpRequest {
        bare_request(HttpMethod::Get, self.endpoints.ingredients(), None)
    }

    pub fn build_logout_user(&self, refresh_token: &str) -> ApiResult<HttpRequest> {
        let body = LogoutRequest {
            token: refresh_token.to_string(),
        };
        json_request(HttpMethod::Post, self.endpoints.logout(), &body, None)
    }

    pub fn build_refresh_token(&self, refresh_token: &str) -> ApiResult<HttpRequest> {
        let body = RefreshTokenRequest {
            token: refresh_token.to_string(),
        };
        json_request(HttpMethod::Post, self.endpoints.token(), &body, None)
    }

    pub fn build_reset_password(&self, credentials: &UserCredentials) -> ApiResult<HttpRequest> {
        json_request(HttpMethod::Post, self.endpoints.password_reset(), credentials, None)
    }

    pub fn build_reset_password_with_token(&self, password: &str, token: &str) -> ApiResult<HttpRequest> {
        let body = PasswordReset {
            password: password.to_string(),
            token: token.to_string(),
        };
        json_request(HttpMethod::Post, self.endpoints.password_reset_confirm(), &body, None)
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    pub fn create_user(&self, user: &User) -> ApiResult<HttpResponse> {
        self.send("create_user", self.build_create_user(user))
    }

    pub fn login_user(&self, credentials: &UserCredentials) -> ApiResult<HttpResponse> {
        self.send("login_user", self.build_login_user(credentials))
    }

    pub fn get_user(&self, access_token: Option<&str>) -> ApiResult<HttpResponse> {
        self.send("get_user", Ok(self.build_get_user(access_token)))
    }

    pub fn update_user(&self, access_token: Option<&str>, user: &User) -> ApiResult<HttpResponse> {
        self.send("update_user", self.build_update_user(access_token, user))
    }

    pub fn delete_user(&self, access_token: &str) -> ApiResult<HttpResponse> {
        self.send("delete_user", Ok(self.build_delete_user(access_token)))
    }

    pub fn create_order(&self, access_token: Option<&str>, order: &Order) -> ApiResult<HttpResponse> {
        self.send("create_order", self.build_create_order(access_token, order))
    }

    pub fn get_user_orders(&self, access_token: Option<&str>) -> ApiResult<HttpResponse> {
        self.send("get_user_orders", Ok(self.build_get_user_orders(access_token)))
    }

    pub fn get_all_orders(&self) -> ApiResult<HttpResponse> {
        self.send("get_all_orders", Ok(self.build_get_all_orders()))
    }

    pub fn get_ingredients(&self) -> ApiResult<HttpResponse> {
        self.send("get_ingredients", Ok(self.build_get_ingredients()))
    }

    pub fn logout_user(&self, refresh_token: &str) -> ApiResult<HttpResponse> {
        self.send("logout_user", self.build_logout_user(refresh_token))
    }

    pub fn refresh_token(&self, refresh_token: &str) -> ApiResult<HttpResponse> {
        self.send("refresh_token", self.build_refresh_token(refresh_token))
    }

    pub fn reset_password(&self, credentials: &UserCredentials) -> ApiResult<HttpResponse> {
        self.send("reset_password", self.build_reset_password(credentials))
    }

    pub fn reset_password_with_token(&self, password: &str, token: &str) -> ApiResult<HttpResponse> {
        self.send(
            "reset_password_with_token",
            self.build_reset_password_with_token(password, token),
        )
    }

    /// Send a built request. Faults are logged with the operation name and
    /// returned as-is.
    fn send(&self, operation: &'static str, request: ApiResult<HttpRequest>) -> ApiResult<HttpResponse> {
        let result = request.and_then(|request| {
            debug!(operation, method = %request.method, url = %request.url, "sending request");
            self.transport.execute(request)
        });

        match &result {
            Ok(response) => debug!(operation, status = response.status, "received response"),
            Err(e) => error!(operation, error = %e, "request failed"),
        }
        result
    }
}

fn json_request<B: Serialize>(
    method: HttpMethod,
    url: String,
    body: &B,
    access_token: Option<&str>,
) -> ApiResult<HttpRequest> {
    let body = serde_json::to_string(body).map_err(ApiError::Serialization)?;
    let mut request = bare_request(method, url, access_token);
    request
        .headers
        .push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));
    request.body = Some(body);
    Ok(request)
}

fn bare_request(method: HttpMethod, url: String, access_token: Option<&str>) -> HttpRequest {
    let mut headers = Vec::new();
    if let Some(token) = access_token.filter(|t| !t.is_empty()) {
        headers.push((AUTHORIZATION.to_string(), token.to_string()));
    }
    HttpRequest {
        method,
        url,
        headers,
        body: None,
    }
}
