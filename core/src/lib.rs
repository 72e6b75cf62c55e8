//! Blocking API client for the burger ordering service.
//!
//! # Overview
//! One method per remote operation (register, login, profile update, order
//! placement, password reset, ...). Every method returns the raw
//! `HttpResponse` so callers can assert on status codes and JSON bodies;
//! 4xx/5xx replies are data, not errors.
//!
//! # Design
//! - `Endpoints` derives every URL from a single base URL.
//! - `BurgerClient` is stateless. `build_*` methods produce `HttpRequest`
//!   values without I/O; the executing methods push them through a
//!   `Transport` (`UreqTransport` by default).
//! - An access token is an `Option<&str>` wherever the service accepts
//!   anonymous calls. `None` omits the `Authorization` header.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::BurgerClient;
pub use config::ClientConfig;
pub use endpoints::Endpoints;
pub use error::{ApiError, ApiResult};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{LogoutRequest, Order, PasswordReset, RefreshTokenRequest, User, UserCredentials};
