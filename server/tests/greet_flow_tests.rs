//! End-to-end tests for the greeter router, driven in-process with
//! `tower::ServiceExt::oneshot`.

use axum::{
    Router,
    body::Body,
    http::{
        Request, Response, StatusCode,
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
    },
    routing::{get, post},
};
use greeter_server::{
    AppState,
    config::Config,
    router,
    routes::{greet_panic_handler, handle_panic},
};
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;

const SECRET: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
const OTHER_SECRET: &str = "fedcba9876543210fedcba9876543210fedcba9876543210fedcba9876543210";

fn config_with_secret(secret: &'static str) -> Config {
    Config::from_lookup(|name| (name == "SECRET_KEY").then(|| secret.to_string()))
        .expect("test configuration is valid")
}

fn app_with_secret(secret: &'static str) -> Router {
    router(AppState::new(config_with_secret(secret)))
}

fn app() -> Router {
    app_with_secret(SECRET)
}

async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 64)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

async fn get_page(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut request = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(COOKIE, cookie);
    }
    app.clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, body: &'static str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/greet")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Returns the `name=value` pair of the response's flash cookie.
fn flash_cookie(response: &Response<Body>) -> String {
    let header = response
        .headers()
        .get(SET_COOKIE)
        .expect("redirect sets the flash cookie")
        .to_str()
        .unwrap();
    header.split(';').next().unwrap().to_string()
}

/// Follows a rejection redirect and returns the rendered form page.
async fn follow_redirect(app: &Router, response: Response<Body>) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/");

    let cookie = flash_cookie(&response);
    let page = get_page(app, "/", Some(&cookie)).await;
    assert_eq!(page.status(), StatusCode::OK);
    body_text(page).await
}

#[tokio::test]
async fn test_index_renders_form_with_security_headers() {
    let response = get_page(&app(), "/", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-frame-options"], "DENY");
    assert!(response.headers().contains_key("content-security-policy"));

    let body = body_text(response).await;
    assert!(body.contains("action=\"/greet\""));
    assert!(body.contains("name=\"username\""));
}

#[tokio::test]
async fn test_clean_name_is_greeted() {
    let response = post_form(&app(), "username=Alice123").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Alice123"));
    assert!(!body.contains("Invalid characters removed from input"));
}

#[tokio::test]
async fn test_markup_is_stripped_and_warned() {
    // username=Alice<b>!</b>
    let response = post_form(&app(), "username=Alice%3Cb%3E%21%3C%2Fb%3E").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Alice"));
    assert!(body.contains("Invalid characters removed from input"));
    assert!(!body.contains("<b>"));
}

#[tokio::test]
async fn test_script_payload_never_reaches_page() {
    // username=<script>alert(1)</script>
    let response = post_form(
        &app(),
        "username=%3Cscript%3Ealert%281%29%3C%2Fscript%3E",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("alert1"));
    assert!(!body.contains("<script>"));
}

#[tokio::test]
async fn test_empty_name_redirects_with_message() {
    let app = app();
    let response = post_form(&app, "username=+++").await;

    let page = follow_redirect(&app, response).await;
    assert!(page.contains("Please enter your name!"));
}

#[tokio::test]
async fn test_missing_field_redirects_with_message() {
    let app = app();
    let response = post_form(&app, "nickname=Alice").await;

    let page = follow_redirect(&app, response).await;
    assert!(page.contains("Please enter your name!"));
}

#[tokio::test]
async fn test_all_invalid_characters_redirects_with_both_messages() {
    let app = app();
    // username=<<<>>>
    let response = post_form(&app, "username=%3C%3C%3C%3E%3E%3E").await;

    let page = follow_redirect(&app, response).await;
    assert!(page.contains("Invalid characters removed from input"));
    assert!(page.contains("Please enter a valid name using only letters and numbers"));
}

#[tokio::test]
async fn test_malformed_request_shows_generic_message() {
    let app = app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/greet")
                .body(Body::from("username=Alice"))
                .unwrap(),
        )
        .await
        .unwrap();

    let page = follow_redirect(&app, response).await;
    assert!(page.contains("Something went wrong with your request!"));
    assert!(!page.contains("Content-Type"));
}

#[tokio::test]
async fn test_flash_is_shown_once() {
    let app = app();
    let response = post_form(&app, "username=").await;
    let cookie = flash_cookie(&response);

    let first = get_page(&app, "/", Some(&cookie)).await;
    let removal = first.headers()[SET_COOKIE].to_str().unwrap().to_string();
    assert!(removal.starts_with("_flashes=;"));
    assert!(removal.contains("Max-Age=0"));
    assert!(body_text(first).await.contains("Please enter your name!"));

    // The browser would now send the cleared cookie.
    let cleared = removal.split(';').next().unwrap();
    let second = get_page(&app, "/", Some(cleared)).await;
    assert!(!body_text(second).await.contains("Please enter your name!"));
}

#[tokio::test]
async fn test_flash_signed_with_other_key_is_ignored() {
    let response = post_form(&app_with_secret(OTHER_SECRET), "username=").await;
    let cookie = flash_cookie(&response);

    let page = get_page(&app(), "/", Some(&cookie)).await;
    assert!(!body_text(page).await.contains("Please enter your name!"));
}

#[tokio::test]
async fn test_unknown_route_renders_not_found() {
    let response = get_page(&app(), "/does-not-exist", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("404 | Not Found"));
}

#[tokio::test]
async fn test_wrong_method_renders_error_page() {
    let response = get_page(&app(), "/greet", None).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(body_text(response).await.contains("405 | Method Not Allowed"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = get_page(&app(), "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_repeated_rejections_keep_flash_cookie_bounded() {
    let app = app();
    let mut cookie = flash_cookie(&post_form(&app, "username=").await);

    for _ in 0..20 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/greet")
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .header(COOKIE, &cookie)
                    .body(Body::from("username=%3C%3E"))
                    .unwrap(),
            )
            .await
            .unwrap();
        cookie = flash_cookie(&response);
    }

    let page = get_page(&app, "/", Some(&cookie)).await;
    let body = body_text(page).await;
    assert_eq!(body.matches("class=\"flash ").count(), 4);
    assert!(body.contains("Please enter a valid name using only letters and numbers"));
    assert!(!body.contains("Please enter your name!"));
}

async fn boom() -> &'static str {
    panic!("handler exploded")
}

#[tokio::test]
async fn test_panics_become_error_page() {
    let app = Router::new()
        .route("/boom", get(boom))
        .layer(CatchPanicLayer::custom(handle_panic));

    let response = app
        .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(response).await;
    assert!(body.contains("500 | Internal Server Error"));
    assert!(!body.contains("handler exploded"));
}

async fn boom_on_submit() -> &'static str {
    panic!("greeting exploded")
}

#[tokio::test]
async fn test_panicking_submission_returns_to_form() {
    let config = config_with_secret(SECRET);
    let submit = Router::new().route(
        "/greet",
        post(boom_on_submit).layer(CatchPanicLayer::custom(greet_panic_handler(
            config.key().clone(),
        ))),
    );

    let response = submit
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/greet")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=Alice"))
                .unwrap(),
        )
        .await
        .unwrap();

    let page = follow_redirect(&app(), response).await;
    assert!(page.contains("An unexpected error occurred!"));
    assert!(!page.contains("greeting exploded"));
}
