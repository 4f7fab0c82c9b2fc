//! In-process fake of the CMS REST API.
//!
//! Serves just enough of the users collection, the catalog collections and
//! the globals for the HTTP clients to be exercised end to end. Binds to an
//! ephemeral port on 127.0.0.1.

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use serde_json::{Value, json};
use url::Url;

use borzfuel_storefront::config::StorefrontConfig;

pub const CUSTOMER_EMAIL: &str = "ola@example.no";
pub const ADMIN_EMAIL: &str = "admin@borzfuel.com";
pub const PASSWORD: &str = "hemmelig1";
pub const TAKEN_EMAIL: &str = "taken@example.no";

const CUSTOMER_TOKEN: &str = "tok-customer";
const ADMIN_TOKEN: &str = "tok-admin";

/// What the fake CMS saw.
#[derive(Default)]
pub struct Recorded {
    pub registrations: Mutex<Vec<Value>>,
    pub patches: Mutex<Vec<(String, Value)>>,
    pub product_queries: Mutex<Vec<HashMap<String, String>>>,
    pub product_hits: AtomicUsize,
    pub logouts: AtomicUsize,
    customer: Mutex<Value>,
}

impl Recorded {
    pub fn product_hits(&self) -> usize {
        self.product_hits.load(Ordering::SeqCst)
    }
}

/// A running fake CMS.
pub struct FakeCms {
    pub url: Url,
    pub recorded: Arc<Recorded>,
}

impl FakeCms {
    pub async fn start() -> Self {
        let recorded = Arc::new(Recorded::default());
        *recorded.customer.lock().unwrap() = customer_doc();

        let app = Router::new()
            .route("/api/users/me", get(me))
            .route("/api/users/login", post(login))
            .route("/api/users/logout", post(logout))
            .route("/api/users", post(register))
            .route("/api/users/{id}", patch(update_user))
            .route("/api/products", get(products))
            .route("/api/benefits", get(benefits))
            .route("/api/ingredients", get(ingredients))
            .route("/api/globals/{slug}", get(global))
            .with_state(recorded.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: Url::parse(&format!("http://{addr}/")).unwrap(),
            recorded,
        }
    }

    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig::for_cms(self.url.clone())
    }
}

fn customer_doc() -> Value {
    json!({
        "id": 7,
        "email": CUSTOMER_EMAIL,
        "role": "customer",
        "firstName": "Ola",
        "lastName": "Nordmann",
        "marketingConsent": false,
        "customerStatus": "active",
        "createdAt": "2025-01-10T12:00:00.000Z"
    })
}

fn admin_doc() -> Value {
    json!({
        "id": 1,
        "email": ADMIN_EMAIL,
        "role": "admin",
        "firstName": "Admin"
    })
}

fn errors(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "errors": [{ "message": message }] }))).into_response()
}

fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == "payload-token")
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

// =============================================================================
// Users
// =============================================================================

async fn me(State(recorded): State<Arc<Recorded>>, headers: HeaderMap) -> Json<Value> {
    let user = match session_token(&headers).as_deref() {
        Some(CUSTOMER_TOKEN) => recorded.customer.lock().unwrap().clone(),
        Some(ADMIN_TOKEN) => admin_doc(),
        _ => Value::Null,
    };
    Json(json!({ "user": user, "collection": "users" }))
}

async fn login(State(recorded): State<Arc<Recorded>>, Json(body): Json<Value>) -> Response {
    let (token, user) = match (body["email"].as_str(), body["password"].as_str()) {
        (Some(CUSTOMER_EMAIL), Some(PASSWORD)) => {
            (CUSTOMER_TOKEN, recorded.customer.lock().unwrap().clone())
        }
        (Some(ADMIN_EMAIL), Some(PASSWORD)) => (ADMIN_TOKEN, admin_doc()),
        _ => {
            return errors(
                StatusCode::UNAUTHORIZED,
                "The email or password provided is incorrect.",
            );
        }
    };

    (
        [(
            header::SET_COOKIE,
            format!("payload-token={token}; Path=/; HttpOnly; SameSite=Lax"),
        )],
        Json(json!({ "message": "Auth Passed", "user": user, "token": token })),
    )
        .into_response()
}

async fn logout(State(recorded): State<Arc<Recorded>>) -> Response {
    recorded.logouts.fetch_add(1, Ordering::SeqCst);
    (
        [(
            header::SET_COOKIE,
            "payload-token=; Path=/; Max-Age=0".to_string(),
        )],
        Json(json!({ "message": "You have been logged out successfully." })),
    )
        .into_response()
}

async fn register(State(recorded): State<Arc<Recorded>>, Json(body): Json<Value>) -> Response {
    recorded.registrations.lock().unwrap().push(body.clone());

    if body["email"] == TAKEN_EMAIL {
        return errors(
            StatusCode::BAD_REQUEST,
            "A user with the given email is already registered.",
        );
    }

    let doc = json!({
        "id": 42,
        "email": body["email"],
        "role": body["role"],
        "firstName": body["firstName"],
        "lastName": body["lastName"],
        "marketingConsent": body["marketingConsent"],
    });
    (
        StatusCode::CREATED,
        Json(json!({ "message": "User successfully created.", "doc": doc })),
    )
        .into_response()
}

async fn update_user(
    State(recorded): State<Arc<Recorded>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if session_token(&headers).as_deref() != Some(CUSTOMER_TOKEN) || id != "7" {
        return errors(
            StatusCode::FORBIDDEN,
            "You are not allowed to perform this action.",
        );
    }
    recorded.patches.lock().unwrap().push((id, body.clone()));

    let mut customer = recorded.customer.lock().unwrap();
    if let (Some(doc), Some(changes)) = (customer.as_object_mut(), body.as_object()) {
        for (key, value) in changes {
            doc.insert(key.clone(), value.clone());
        }
    }
    Json(json!({ "message": "Updated successfully.", "doc": customer.clone() })).into_response()
}

// =============================================================================
// Catalog
// =============================================================================

async fn products(
    State(recorded): State<Arc<Recorded>>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    recorded.product_hits.fetch_add(1, Ordering::SeqCst);
    recorded.product_queries.lock().unwrap().push(query);

    Json(json!({
        "docs": [
            {
                "id": "p1",
                "name": "Savage Formula",
                "slug": "savage-formula",
                "price": 49.99,
                "compareAtPrice": 59.99,
                "image": { "id": "m1", "url": "/media/savage.png", "alt": "Savage Formula tub" },
                "status": "published",
                "inStock": true,
                "features": [{ "icon": "truck", "text": "Free shipping over $75", "color": "green" }],
                "ingredients": ["i1", "i2"],
                "benefits": []
            },
            {
                "id": "p2",
                "name": "Calm Formula",
                "slug": "calm-formula",
                "price": 25,
                "status": "published"
            },
            { "id": "p3", "name": "Broken" }
        ],
        "totalDocs": 3,
        "limit": 10,
        "page": 1
    }))
}

async fn benefits() -> Response {
    errors(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong.")
}

async fn ingredients() -> Json<Value> {
    Json(json!({
        "docs": [
            { "id": "i1", "name": "L-Citrulline", "amount": "6000mg", "benefit": "Pump", "category": "pump", "order": 1 },
            { "id": "i2", "name": "Caffeine", "amount": "200mg", "benefit": "Energy", "category": "energy", "order": 2 }
        ]
    }))
}

async fn global(Path(slug): Path<String>) -> Response {
    match slug.as_str() {
        "header" => Json(json!({
            "navItems": [{ "link": { "label": "Shop", "url": "/products" } }]
        }))
        .into_response(),
        _ => errors(StatusCode::NOT_FOUND, "The requested resource was not found."),
    }
}
