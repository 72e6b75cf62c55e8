//! Endpoint registry for the burger ordering API.
//!
//! # Design
//! Every URL is `base_url + suffix`. The suffixes are public constants;
//! `Endpoints` only stores the base URL and derives the rest on demand. No validation happens here, the
//! config layer checks the base URL once.

/// Base URL of the public service.
pub const DEFAULT_BASE_URL: &str = "https://stellarburgers.nomoreparties.site/api";

pub const REGISTER: &str = "/auth/register";
pub const LOGIN: &str = "/auth/login";
pub const LOGOUT: &str = "/auth/logout";
pub const USER: &str = "/auth/user";
pub const TOKEN: &str = "/auth/token";
pub const ORDERS: &str = "/orders";
pub const ALL_ORDERS: &str = "/orders/all";
pub const INGREDIENTS: &str = "/ingredients";
pub const PASSWORD_RESET: &str = "/password-reset";
pub const PASSWORD_RESET_CONFIRM: &str = "/password-reset/reset";

/// Fully-qualified endpoint URLs derived from a single base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn join(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.base_url)
    }

    pub fn register(&self) -> String {
        self.join(REGISTER)
    }

    pub fn login(&self) -> String {
        self.join(LOGIN)
    }

    pub fn logout(&self) -> String {
        self.join(LOGOUT)
    }

    /// Read, update and delete all target the same resource.
    pub fn user(&self) -> String {
        self.join(USER)
    }

    pub fn token(&self) -> String {
        self.join(TOKEN)
    }

    /// Create and list share this URL; the verb decides.
    pub fn orders(&self) -> String {
        self.join(ORDERS)
    }

    pub fn all_orders(&self) -> String {
        self.join(ALL_ORDERS)
    }

    pub fn ingredients(&self) -> String {
        self.join(INGREDIENTS)
    }

    pub fn password_reset(&self) -> String {
        self.join(PASSWORD_RESET)
    }

    pub fn password_reset_confirm(&self) -> String {
        self.join(PASSWORD_RESET_CONFIRM)
    }
}
