//! In-memory stand-in for the burger ordering service.
//!
//! Reproduces the observable contract of the public API (routes, status
//! codes, `success`/`message` bodies) so the client's scenario suites can
//! run without the network. All state lives in one `RwLock`.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const UNAUTHORIZED: &str = "You should be authorised";

#[derive(Clone, Debug, Serialize)]
pub struct Ingredient {
    #[serde(rename = "_id")]
    pub id: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub price: u32,
}

/// Fixed catalog served from `/ingredients`.
pub const INGREDIENTS: &[Ingredient] = &[
    Ingredient { id: "61c0c5a71d1f82001bdaaa6c", name: "Crater bun R2-D3", kind: "bun", price: 1255 },
    Ingredient { id: "61c0c5a71d1f82001bdaaa6d", name: "Fluorescent bun R2-D3", kind: "bun", price: 988 },
    Ingredient { id: "61c0c5a71d1f82001bdaaa6e", name: "Protostomia mollusk meat", kind: "main", price: 1337 },
    Ingredient { id: "61c0c5a71d1f82001bdaaa6f", name: "Martian magnolia biocutlet", kind: "main", price: 424 },
    Ingredient { id: "61c0c5a71d1f82001bdaaa72", name: "Spicy-X sauce", kind: "sauce", price: 90 },
];

#[derive(Clone, Debug)]
struct Account {
    email: String,
    password: String,
    name: String,
}

#[derive(Clone, Debug)]
struct PlacedOrder {
    number: u64,
    owner: String,
    name: String,
    ingredients: Vec<String>,
}

#[derive(Debug, Default)]
pub struct Store {
    users: HashMap<String, Account>,
    access_tokens: HashMap<String, String>,
    refresh_tokens: HashMap<String, String>,
    reset_codes: HashMap<String, String>,
    orders: Vec<PlacedOrder>,
    next_order: u64,
}

impl Store {
    fn issue_tokens(&mut self, email: &str) -> (String, String) {
        let access = format!("Bearer {}", Uuid::new_v4());
        let refresh = Uuid::new_v4().simple().to_string();
        self.access_tokens.insert(access.clone(), email.to_string());
        self.refresh_tokens.insert(refresh.clone(), email.to_string());
        (access, refresh)
    }

    fn authorized(&self, headers: &HeaderMap) -> Option<Account> {
        let token = headers.get(AUTHORIZATION)?.to_str().ok()?;
        let email = self.access_tokens.get(token)?;
        self.users.get(email).cloned()
    }

    fn rename_email(&mut self, from: &str, to: &str) {
        for owner in self
            .access_tokens
            .values_mut()
            .chain(self.refresh_tokens.values_mut())
        {
            if owner.as_str() == from {
                *owner = to.to_string();
            }
        }
        for order in self.orders.iter_mut().filter(|o| o.owner == from) {
            order.owner = to.to_string();
        }
    }

    fn forget(&mut self, email: &str) {
        self.users.remove(email);
        self.access_tokens.retain(|_, owner| owner.as_str() != email);
        self.refresh_tokens.retain(|_, owner| owner.as_str() != email);
        self.reset_codes.remove(email);
        self.orders.retain(|o| o.owner != email);
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Handle for inspecting server state from tests.
#[derive(Clone, Default)]
pub struct MockState {
    db: Db,
}

impl MockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset code mailed for `email`, if one was requested.
    pub async fn reset_code(&self, email: &str) -> Option<String> {
        self.db.read().await.reset_codes.get(email).cloned()
    }

    pub async fn user_count(&self) -> usize {
        self.db.read().await.users.len()
    }

    pub async fn order_count(&self) -> usize {
        self.db.read().await.orders.len()
    }
}

pub fn app() -> Router {
    app_with_state(MockState::new())
}

pub fn app_with_state(state: MockState) -> Router {
    let api = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/token", post(refresh_token))
        .route("/auth/user", get(get_user).patch(update_user).delete(delete_user))
        .route("/orders", get(user_orders).post(create_order))
        .route("/orders/all", get(all_orders))
        .route("/ingredients", get(ingredients))
        .route("/password-reset", post(request_reset))
        .route("/password-reset/reset", post(confirm_reset))
        .with_state(state.db);
    Router::new().nest("/api", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, MockState::new()).await
}

pub async fn run_with_state(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

fn success(mut body: Value) -> Response {
    body["success"] = Value::Bool(true);
    (StatusCode::OK, Json(body)).into_response()
}

fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"success": false, "message": message}))).into_response()
}

fn user_json(account: &Account) -> Value {
    json!({"email": account.email, "name": account.name})
}

#[derive(Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct TokenBody {
    #[serde(default)]
    pub token: String,
}

#[derive(Deserialize)]
pub struct UpdateBody {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct OrderBody {
    #[serde(default)]
    pub ingredients: Vec<String>,
}

#[derive(Deserialize)]
pub struct ResetBody {
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize)]
pub struct ConfirmResetBody {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub token: String,
}

async fn register(State(db): State<Db>, Json(input): Json<RegisterBody>) -> Response {
    if input.email.is_empty() || input.password.is_empty() || input.name.is_empty() {
        return failure(StatusCode::FORBIDDEN, "Email, password and name are required fields");
    }
    let mut store = db.write().await;
    if store.users.contains_key(&input.email) {
        return failure(StatusCode::FORBIDDEN, "User already exists");
    }
    let account = Account {
        email: input.email,
        password: input.password,
        name: input.name,
    };
    let (access, refresh) = store.issue_tokens(&account.email);
    let user = user_json(&account);
    store.users.insert(account.email.clone(), account);
    tracing::debug!(users = store.users.len(), "registered user");
    success(json!({"user": user, "accessToken": access, "refreshToken": refresh}))
}

async fn login(State(db): State<Db>, Json(input): Json<LoginBody>) -> Response {
    let mut store = db.write().await;
    let account = match store.users.get(&input.email) {
        Some(account) if account.password == input.password => account.clone(),
        _ => return failure(StatusCode::UNAUTHORIZED, "email or password are incorrect"),
    };
    let (access, refresh) = store.issue_tokens(&account.email);
    success(json!({"user": user_json(&account), "accessToken": access, "refreshToken": refresh}))
}

async fn logout(State(db): State<Db>, Json(input): Json<TokenBody>) -> Response {
    if input.token.is_empty() {
        return failure(StatusCode::BAD_REQUEST, "Token required");
    }
    let mut store = db.write().await;
    let Some(email) = store.refresh_tokens.remove(&input.token) else {
        return failure(StatusCode::NOT_FOUND, "Token not found");
    };
    store.access_tokens.retain(|_, owner| *owner != email);
    success(json!({"message": "Successful logout"}))
}

async fn refresh_token(State(db): State<Db>, Json(input): Json<TokenBody>) -> Response {
    if input.token.is_empty() {
        return failure(StatusCode::BAD_REQUEST, "Token required");
    }
    let mut store = db.write().await;
    let Some(email) = store.refresh_tokens.remove(&input.token) else {
        return failure(StatusCode::NOT_FOUND, "Token not found");
    };
    let (access, refresh) = store.issue_tokens(&email);
    success(json!({"accessToken": access, "refreshToken": refresh}))
}

async fn get_user(State(db): State<Db>, headers: HeaderMap) -> Response {
    let store = db.read().await;
    match store.authorized(&headers) {
        Some(account) => success(json!({"user": user_json(&account)})),
        None => failure(StatusCode::UNAUTHORIZED, UNAUTHORIZED),
    }
}

async fn update_user(State(db): State<Db>, headers: HeaderMap, Json(input): Json<UpdateBody>) -> Response {
    let mut store = db.write().await;
    let Some(mut account) = store.authorized(&headers) else {
        return failure(StatusCode::UNAUTHORIZED, UNAUTHORIZED);
    };
    let old_email = account.email.clone();

    if let Some(email) = input.email.filter(|e| !e.is_empty()) {
        if email != old_email && store.users.contains_key(&email) {
            return failure(StatusCode::FORBIDDEN, "User with such email already exists");
        }
        account.email = email;
    }
    if let Some(password) = input.password.filter(|p| !p.is_empty()) {
        account.password = password;
    }
    if let Some(name) = input.name.filter(|n| !n.is_empty()) {
        account.name = name;
    }

    store.users.remove(&old_email);
    if account.email != old_email {
        store.rename_email(&old_email, &account.email);
    }
    let user = user_json(&account);
    store.users.insert(account.email.clone(), account);
    success(json!({"user": user}))
}

async fn delete_user(State(db): State<Db>, headers: HeaderMap) -> Response {
    let mut store = db.write().await;
    let Some(account) = store.authorized(&headers) else {
        return failure(StatusCode::UNAUTHORIZED, UNAUTHORIZED);
    };
    store.forget(&account.email);
    let body = json!({"success": true, "message": "User successfully removed"});
    (StatusCode::ACCEPTED, Json(body)).into_response()
}

fn well_formed_id(id: &str) -> bool {
    id.len() == 24 && id.bytes().all(|b| b.is_ascii_hexdigit())
}

fn catalog(id: &str) -> Option<&'static Ingredient> {
    INGREDIENTS.iter().find(|i| i.id == id)
}

fn order_json(order: &PlacedOrder) -> Value {
    let ingredients: Vec<&Ingredient> = order.ingredients.iter().filter_map(|id| catalog(id)).collect();
    let price: u32 = ingredients.iter().map(|i| i.price).sum();
    json!({
        "number": order.number,
        "name": order.name,
        "status": "done",
        "owner": order.owner,
        "ingredients": ingredients,
        "price": price,
    })
}

async fn create_order(State(db): State<Db>, headers: HeaderMap, Json(input): Json<OrderBody>) -> Response {
    let mut store = db.write().await;
    let Some(account) = store.authorized(&headers) else {
        return failure(StatusCode::UNAUTHORIZED, UNAUTHORIZED);
    };
    if input.ingredients.is_empty() {
        return failure(StatusCode::BAD_REQUEST, "Ingredient ids must be provided");
    }
    if !input.ingredients.iter().all(|id| well_formed_id(id)) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
    }
    let Some(found) = input.ingredients.iter().map(|id| catalog(id)).collect::<Option<Vec<_>>>() else {
        return failure(StatusCode::BAD_REQUEST, "One or more ids provided are incorrect");
    };

    let mut words: Vec<&str> = Vec::new();
    for ingredient in found {
        let word = ingredient.name.split_whitespace().next().unwrap_or(ingredient.name);
        if !words.contains(&word) {
            words.push(word);
        }
    }
    store.next_order += 1;
    let order = PlacedOrder {
        number: store.next_order,
        owner: account.email,
        name: format!("{} burger", words.join(" ")),
        ingredients: input.ingredients,
    };
    let body = json!({"name": order.name, "order": order_json(&order)});
    store.orders.push(order);
    success(body)
}

fn orders_page<'a>(orders: impl Iterator<Item = &'a PlacedOrder>) -> Value {
    let orders: Vec<Value> = orders.map(order_json).collect();
    let total = orders.len();
    json!({"orders": orders, "total": total, "totalToday": total})
}

async fn user_orders(State(db): State<Db>, headers: HeaderMap) -> Response {
    let store = db.read().await;
    let Some(account) = store.authorized(&headers) else {
        return failure(StatusCode::UNAUTHORIZED, UNAUTHORIZED);
    };
    success(orders_page(store.orders.iter().filter(|o| o.owner == account.email)))
}

async fn all_orders(State(db): State<Db>) -> Response {
    let store = db.read().await;
    success(orders_page(store.orders.iter()))
}

async fn ingredients() -> Response {
    success(json!({"data": INGREDIENTS}))
}

async fn request_reset(State(db): State<Db>, Json(input): Json<ResetBody>) -> Response {
    if input.email.is_empty() {
        return failure(StatusCode::BAD_REQUEST, "Email is required");
    }
    let mut store = db.write().await;
    if store.users.contains_key(&input.email) {
        let code = Uuid::new_v4().simple().to_string();
        store.reset_codes.insert(input.email, code);
    }
    success(json!({"message": "Reset email sent"}))
}

async fn confirm_reset(State(db): State<Db>, Json(input): Json<ConfirmResetBody>) -> Response {
    let mut store = db.write().await;
    let email = store
        .reset_codes
        .iter()
        .find(|(_, code)| !input.token.is_empty() && **code == input.token)
        .map(|(email, _)| email.clone());
    let Some(email) = email else {
        return failure(StatusCode::NOT_FOUND, "Incorrect reset token");
    };
    if input.password.is_empty() {
        return failure(StatusCode::BAD_REQUEST, "Password is required");
    }
    store.reset_codes.remove(&email);
    if let Some(account) = store.users.get_mut(&email) {
        account.password = input.password;
    }
    success(json!({"message": "Password successfully reset"}))
}
