//! Mock PocketBase server and flyer fixtures

use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Superuser email the mock accepts
pub const ADMIN_EMAIL: &str = "admin@flyer.town";

/// Superuser password the mock accepts
pub const ADMIN_PASSWORD: &str = "correct-horse";

/// Token the mock hands out and expects back
pub const TOKEN: &str = "mock-superuser-token";

/// Collection id stamped on every fixture flyer
pub const FLYERS_COLLECTION_ID: &str = "pbc_1687431684";

/// A flyer record as PocketBase returns it
pub fn flyer(n: usize) -> Value {
    json!({
        "id": format!("flyer{n:03}"),
        "collectionId": FLYERS_COLLECTION_ID,
        "collectionName": "flyers",
        "title": format!("Flyer #{n}"),
        "image": format!("flyer_{n}_a8f3k2.png"),
        "created": "2026-01-05 10:00:00.000Z",
        "updated": "2026-01-05 10:00:00.000Z",
    })
}

/// `count` flyers numbered from 1
pub fn flyers(count: usize) -> Vec<Value> {
    (1..=count).map(flyer).collect()
}

/// PocketBase stand-in holding a fixed `flyers` collection
pub struct MockPocketBase {
    /// Underlying wiremock server
    pub server: MockServer,
}

impl MockPocketBase {
    /// Start a server that accepts [`ADMIN_EMAIL`]/[`ADMIN_PASSWORD`] and
    /// serves `records` through the paginated list endpoint
    pub async fn start(records: Vec<Value>) -> Self {
        let per_page = 50;
        let total = records.len();
        let total_pages = total.div_ceil(per_page);
        let first_page: Vec<Value> = records.into_iter().take(per_page).collect();

        Self::start_with_list_response(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "perPage": per_page,
            "totalItems": total,
            "totalPages": total_pages,
            "items": first_page,
        })))
        .await
    }

    /// Start a server whose login succeeds and whose authorized page-1 list
    /// request is answered with `list_response`
    pub async fn start_with_list_response(list_response: ResponseTemplate) -> Self {
        Self::start_with_auth_response(
            ResponseTemplate::new(400).set_body_json(json!({
                "code": 400,
                "message": "Failed to authenticate.",
                "data": {},
            })),
            list_response,
        )
        .await
    }

    /// Like [`Self::start_with_list_response`], with `rejected_login` sent for
    /// any login other than [`ADMIN_EMAIL`]/[`ADMIN_PASSWORD`]
    pub async fn start_with_auth_response(
        rejected_login: ResponseTemplate,
        list_response: ResponseTemplate,
    ) -> Self {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/collections/_superusers/auth-with-password"))
            .and(body_json(json!({
                "identity": ADMIN_EMAIL,
                "password": ADMIN_PASSWORD,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": TOKEN,
                "record": {
                    "id": "su_0001",
                    "collectionName": "_superusers",
                    "email": ADMIN_EMAIL,
                },
            })))
            .with_priority(1)
            .mount(&server)
            .await;

        // Any other login is rejected
        Mock::given(method("POST"))
            .and(path("/api/collections/_superusers/auth-with-password"))
            .respond_with(rejected_login)
            .with_priority(2)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/collections/flyers/records"))
            .and(query_param("page", "1"))
            .and(query_param("perPage", "50"))
            .and(header("Authorization", TOKEN))
            .respond_with(list_response)
            .with_priority(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/collections/flyers/records"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "code": 403,
                "message": "Only superusers can perform this action.",
                "data": {},
            })))
            .with_priority(2)
            .mount(&server)
            .await;

        Self { server }
    }

    /// Base URL of the mock
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Requests received so far, as (method, path) pairs
    pub async fn requests(&self) -> Vec<(String, String)> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|r| (r.method.to_string(), r.url.path().to_string()))
            .collect()
    }
}

/// The requests a successful login followed by one list call produces
pub fn login_then_list() -> Vec<(String, String)> {
    vec![
        (
            "POST".to_string(),
            "/api/collections/_superusers/auth-with-password".to_string(),
        ),
        (
            "GET".to_string(),
            "/api/collections/flyers/records".to_string(),
        ),
    ]
}

/// Split fetcher output into the JSON objects it contains
pub fn parse_output(bytes: &[u8]) -> Vec<Value> {
    serde_json::Deserializer::from_slice(bytes)
        .into_iter::<Value>()
        .collect::<Result<_, _>>()
        .unwrap()
}
