//! End-to-end flow tests against the full router.
//!
//! Each test drives the app through real HTTP requests (form posts, session
//! cookie, anti-forgery token) against an in-memory database.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use tower::ServiceExt;

use cuppa_web::config::AppConfig;
use cuppa_web::db::MIGRATOR;
use cuppa_web::state::AppState;

async fn test_app() -> Router {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("pool");
    MIGRATOR.run(&pool).await.expect("migrations");

    let config = AppConfig {
        database_url: "sqlite::memory:".to_string(),
        host: "127.0.0.1".parse().expect("host"),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        maps_api_key: None,
    };

    cuppa_web::app(AppState::new(config, pool))
        .await
        .expect("app")
}

/// A minimal client that carries the session cookie between requests.
struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    async fn request(
        &mut self,
        method: &str,
        path: &str,
        form: Option<String>,
    ) -> (StatusCode, HeaderMap, String) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.clone());
        }

        let request = match form {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        let response = self.app.clone().oneshot(request).await.expect("response");

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE)
            && let Ok(value) = set_cookie.to_str()
            && let Some(pair) = value.split(';').next()
        {
            self.cookie = Some(pair.to_owned());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = String::from_utf8(bytes.to_vec()).expect("utf8 body");
        (status, headers, body)
    }

    async fn get(&mut self, path: &str) -> (StatusCode, HeaderMap, String) {
        self.request("GET", path, None).await
    }

    async fn post(&mut self, path: &str, body: String) -> (StatusCode, HeaderMap, String) {
        self.request("POST", path, Some(body)).await
    }
}

fn csrf_from(html: &str) -> String {
    let marker = "name=\"csrf_token\" value=\"";
    let start = html.find(marker).expect("csrf field") + marker.len();
    let end = html[start..].find('"').expect("csrf end") + start;
    html[start..end].to_owned()
}

fn form_encode(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn location(headers: &HeaderMap) -> &str {
    headers
        .get(header::LOCATION)
        .expect("location header")
        .to_str()
        .expect("location str")
}

/// Sign up and log in, leaving the client with an authenticated session.
async fn log_in(client: &mut TestClient, email: &str, name: &str, password: &str) {
    let (status, _, html) = client.get("/signup").await;
    assert_eq!(status, StatusCode::OK);
    let token = csrf_from(&html);

    let (status, headers, _) = client
        .post(
            "/signup",
            form_encode(&[
                ("email", email),
                ("name", name),
                ("password", password),
                ("csrf_token", &token),
            ]),
        )
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/login");

    let (_, _, html) = client.get("/login").await;
    let token = csrf_from(&html);

    let (status, headers, _) = client
        .post(
            "/login",
            form_encode(&[
                ("email", email),
                ("password", password),
                ("csrf_token", &token),
            ]),
        )
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/");
}

/// Add a café with the given name and price, returning its detail path.
async fn add_cafe(client: &mut TestClient, name: &str, price: &str) -> (StatusCode, String) {
    let (_, _, html) = client.get("/cafe/add").await;
    let token = csrf_from(&html);

    let (status, headers, _) = client
        .post(
            "/cafe/add",
            form_encode(&[
                ("name", name),
                ("map_url", "https://maps.example.com/q?borough"),
                ("img_url", "https://img.example.com/cafe.jpg"),
                ("location", "Borough Market, London"),
                ("has_sockets", "on"),
                ("has_toilet", "on"),
                ("seats", "10-20"),
                ("coffee_price", price),
                ("csrf_token", &token),
            ]),
        )
        .await;

    let detail = if status == StatusCode::SEE_OTHER {
        location(&headers).to_owned()
    } else {
        String::new()
    };
    (status, detail)
}

#[tokio::test]
async fn protected_route_redirects_to_login_with_destination() {
    let mut client = TestClient::new(test_app().await);

    let (status, headers, _) = client.get("/cafe/add").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/login?next=%2Fcafe%2Fadd");
}

#[tokio::test]
async fn login_redirects_back_to_requested_destination() {
    let mut client = TestClient::new(test_app().await);

    let (_, _, html) = client.get("/signup").await;
    let token = csrf_from(&html);
    client
        .post(
            "/signup",
            form_encode(&[
                ("email", "ada@example.com"),
                ("name", "Ada"),
                ("password", "correct horse"),
                ("csrf_token", &token),
            ]),
        )
        .await;

    // The destination survives the login round-trip.
    let (_, _, html) = client.get("/login?next=%2Fcafe%2Fadd").await;
    let token = csrf_from(&html);
    let (status, headers, _) = client
        .post(
            "/login?next=%2Fcafe%2Fadd",
            form_encode(&[
                ("email", "ada@example.com"),
                ("password", "correct horse"),
                ("csrf_token", &token),
            ]),
        )
        .await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/cafe/add");

    let (status, _, _) = client.get("/cafe/add").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn login_failures_get_distinct_messages() {
    let mut client = TestClient::new(test_app().await);
    log_in(&mut client, "ada@example.com", "Ada", "correct horse").await;
    client.get("/logout").await;

    // Unknown email.
    let (_, _, html) = client.get("/login").await;
    let token = csrf_from(&html);
    let (status, headers, _) = client
        .post(
            "/login",
            form_encode(&[
                ("email", "nobody@example.com"),
                ("password", "whatever!"),
                ("csrf_token", &token),
            ]),
        )
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/login?error=unknown_email");
    let (_, _, html) = client.get("/login?error=unknown_email").await;
    assert!(html.contains("User with this email does not exist"));

    // Known email, wrong password. No session is established.
    let (_, _, html) = client.get("/login").await;
    let token = csrf_from(&html);
    let (status, headers, _) = client
        .post(
            "/login",
            form_encode(&[
                ("email", "ada@example.com"),
                ("password", "battery staple"),
                ("csrf_token", &token),
            ]),
        )
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/login?error=wrong_password");
    let (_, _, html) = client.get("/login?error=wrong_password").await;
    assert!(html.contains("Password is incorrect"));

    let (status, headers, _) = client.get("/cafe/add").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(location(&headers).starts_with("/login"));
}

#[tokio::test]
async fn add_cafe_then_detail_shows_formatted_price() {
    let mut client = TestClient::new(test_app().await);
    log_in(&mut client, "ada@example.com", "Ada", "correct horse").await;

    let (status, detail) = add_cafe(&mut client, "Monmouth", "2.75").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(detail, "/cafe/1");

    let (status, _, html) = client.get(&detail).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Monmouth"));
    assert!(html.contains("£2.75"));

    let (status, _, html) = client.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Monmouth"));
}

#[tokio::test]
async fn duplicate_cafe_name_reshows_form_without_creating() {
    let mut client = TestClient::new(test_app().await);
    log_in(&mut client, "ada@example.com", "Ada", "correct horse").await;

    let (status, _) = add_cafe(&mut client, "Monmouth", "2.75").await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (status, _) = add_cafe(&mut client, "Monmouth", "3.00").await;
    assert_eq!(status, StatusCode::OK);

    // Exactly one row made it to the listing.
    let (_, _, html) = client.get("/").await;
    assert!(html.contains("/cafe/1"));
    assert!(!html.contains("/cafe/2"));
}

#[tokio::test]
async fn invalid_submission_reshows_form_with_messages() {
    let mut client = TestClient::new(test_app().await);
    log_in(&mut client, "ada@example.com", "Ada", "correct horse").await;

    let (_, _, html) = client.get("/cafe/add").await;
    let token = csrf_from(&html);

    let (status, _, html) = client
        .post(
            "/cafe/add",
            form_encode(&[
                ("name", "Monmouth"),
                ("map_url", "not a url"),
                ("img_url", "https://img.example.com/cafe.jpg"),
                ("location", "Borough Market, London"),
                ("seats", "10-20"),
                ("coffee_price", "-1"),
                ("csrf_token", &token),
            ]),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Map URL must be a valid URL"));
    assert!(html.contains("price must be at least 0"));
    // The submitted values are preserved.
    assert!(html.contains("value=\"Monmouth\""));
}

#[tokio::test]
async fn delete_cancel_keeps_cafe_delete_confirm_removes_it() {
    let mut client = TestClient::new(test_app().await);
    log_in(&mut client, "ada@example.com", "Ada", "correct horse").await;

    let (_, detail) = add_cafe(&mut client, "Monmouth", "2.75").await;

    let (_, _, html) = client.get("/cafe/1/delete").await;
    let token = csrf_from(&html);

    // Cancel: redirect to detail, nothing removed.
    let (status, headers, _) = client
        .post(
            "/cafe/1/delete",
            form_encode(&[("action", "cancel"), ("csrf_token", &token)]),
        )
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), detail);
    let (status, _, _) = client.get(&detail).await;
    assert_eq!(status, StatusCode::OK);

    // Confirm: redirect to the listing, café gone.
    let (_, _, html) = client.get("/cafe/1/delete").await;
    let token = csrf_from(&html);
    let (status, headers, _) = client
        .post(
            "/cafe/1/delete",
            form_encode(&[("action", "delete"), ("csrf_token", &token)]),
        )
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/");

    let (status, _, _) = client.get(&detail).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, _, html) = client.get("/").await;
    assert!(!html.contains("Monmouth"));
}

#[tokio::test]
async fn missing_csrf_token_is_rejected() {
    let mut client = TestClient::new(test_app().await);

    // Establish a session first so the check fails on the token, not the session.
    let (_, _, _html) = client.get("/signup").await;

    let (status, _, _) = client
        .post(
            "/signup",
            form_encode(&[
                ("email", "ada@example.com"),
                ("name", "Ada"),
                ("password", "correct horse"),
            ]),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = client
        .post(
            "/signup",
            form_encode(&[
                ("email", "ada@example.com"),
                ("name", "Ada"),
                ("password", "correct horse"),
                ("csrf_token", "forged-token"),
            ]),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_signup_redirects_with_warning() {
    let mut client = TestClient::new(test_app().await);
    log_in(&mut client, "ada@example.com", "Ada", "correct horse").await;
    let (_, _, _html) = client.get("/logout").await;

    let (_, _, html) = client.get("/signup").await;
    let token = csrf_from(&html);
    let (status, headers, _) = client
        .post(
            "/signup",
            form_encode(&[
                ("email", "ada@example.com"),
                ("name", "Imposter"),
                ("password", "battery staple"),
                ("csrf_token", &token),
            ]),
        )
        .await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/signup?error=email_taken");

    let (_, _, html) = client.get("/signup?error=email_taken").await;
    assert!(html.contains("User with this email already exists"));
}

#[tokio::test]
async fn edit_profile_updates_name_everywhere() {
    let mut client = TestClient::new(test_app().await);
    log_in(&mut client, "ada@example.com", "Ada", "correct horse").await;

    let (status, _, html) = client.get("/edit_profile").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("value=\"Ada\""));
    let token = csrf_from(&html);

    let (status, headers, _) = client
        .post(
            "/edit_profile",
            form_encode(&[("name", "Ada Lovelace"), ("csrf_token", &token)]),
        )
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/");

    let (_, _, html) = client.get("/").await;
    assert!(html.contains("Signed in as Ada Lovelace"));
}

#[tokio::test]
async fn logout_returns_to_referrer_and_drops_session() {
    let mut client = TestClient::new(test_app().await);
    log_in(&mut client, "ada@example.com", "Ada", "correct horse").await;

    let (status, headers, _) = client.get("/logout").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/");

    let (status, headers, _) = client.get("/cafe/add").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(location(&headers).starts_with("/login"));
}

#[tokio::test]
async fn missing_cafe_is_404() {
    let mut client = TestClient::new(test_app().await);
    let (status, _, _) = client.get("/cafe/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
