//! Shared fixtures for the scenario suites.
//!
//! Each suite starts its own mock server on a random port, so scenarios never
//! share users. `RegisteredUser` deletes its account in `Drop`, which runs
//! even when an assertion in the test body panics.

#![allow(dead_code)]

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use burger_core::{BurgerClient, HttpResponse, User};
use mock_server::MockState;

pub const VALID_INGREDIENT: &str = "61c0c5a71d1f82001bdaaa6d";
pub const SECOND_INGREDIENT: &str = "61c0c5a71d1f82001bdaaa6c";
pub const THIRD_INGREDIENT: &str = "61c0c5a71d1f82001bdaaa6e";
pub const INVALID_INGREDIENT: &str = "invalid_ingredient_hash";
pub const PASSWORD: &str = "password123";

pub struct Mock {
    pub client: BurgerClient,
    pub state: MockState,
}

/// Start the mock server on a background runtime and point a client at it.
pub fn start() -> Mock {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    let state = MockState::new();
    let server_state = state.clone();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with_state(listener, server_state).await
        })
        .unwrap();
    });

    Mock {
        client: BurgerClient::new(&format!("http://{addr}/api")),
        state,
    }
}

/// Drive a `MockState` query from a synchronous test.
pub fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

/// Time-based email, unique within the process.
pub fn unique_email() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("test{millis}{n}@test.com")
}

pub fn unique_user() -> User {
    User::new(unique_email(), PASSWORD, "TestUser")
}

/// Field of a JSON body as a string, panicking with the body on mismatch.
pub fn string_field(response: &HttpResponse, field: &str) -> String {
    let body = response.json().unwrap();
    body[field]
        .as_str()
        .unwrap_or_else(|| panic!("{field} missing from {body}"))
        .to_string()
}

/// Assert the standard failure envelope.
pub fn assert_failure(response: &HttpResponse, status: u16, message: &str) {
    assert_eq!(response.status, status, "body: {}", response.body);
    let body = response.json().unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], message);
}

/// A registered account that is deleted when dropped.
pub struct RegisteredUser<'a> {
    client: &'a BurgerClient,
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

impl<'a> RegisteredUser<'a> {
    pub fn register(client: &'a BurgerClient, user: User) -> Self {
        let response = client.create_user(&user).unwrap();
        Self::adopt(client, user, &response)
            .unwrap_or_else(|| panic!("registration failed: {} {}", response.status, response.body))
    }

    /// Take ownership of an account created by a registration the test made
    /// itself. `None` if the response carries no access token.
    pub fn adopt(client: &'a BurgerClient, user: User, response: &HttpResponse) -> Option<Self> {
        let body = response.json().ok()?;
        let access_token = body["accessToken"].as_str()?.to_string();
        let refresh_token = body["refreshToken"].as_str().unwrap_or_default().to_string();
        Some(Self {
            client,
            user,
            access_token,
            refresh_token,
        })
    }

    pub fn token(&self) -> Option<&str> {
        Some(&self.access_token)
    }

    /// Log in again and keep the fresh tokens for teardown.
    pub fn relogin(&mut self) -> HttpResponse {
        let response = self.client.login_user(&self.user.credentials()).unwrap();
        if let Ok(body) = response.json() {
            if let Some(token) = body["accessToken"].as_str() {
                self.access_token = token.to_string();
            }
            if let Some(token) = body["refreshToken"].as_str() {
                self.refresh_token = token.to_string();
            }
        }
        response
    }
}

impl Drop for RegisteredUser<'_> {
    fn drop(&mut self) {
        let _ = self.client.delete_user(&self.access_token);
    }
}
