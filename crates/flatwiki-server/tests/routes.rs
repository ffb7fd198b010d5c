//! End-to-end tests driving the router with in-process requests.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use flatwiki_server::router;
use flatwiki_storage::{FsPageStore, MockPageStore, PageId, PageStore, StorageErrorKind};
use flatwiki_templates::Templates;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

fn fs_app(root: &Path) -> (Router, Arc<FsPageStore>) {
    let store = Arc::new(FsPageStore::new(root.to_path_buf()));
    let app = router(Arc::clone(&store) as Arc<dyn PageStore>, Templates::embedded());
    (app, store)
}

fn id(title: &str) -> PageId {
    PageId::new(title).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(serde_urlencoded::to_string(fields).unwrap()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn save_view_delete_scenario() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (app, _) = fs_app(temp_dir.path());

    let response = send(
        &app,
        post_form("/save/test", &[("title", "test"), ("body", "hello")]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/view/test");

    let response = send(&app, get("/view/test")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("hello"));

    let response = send(&app, post("/delete/test")).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");

    let response = send(&app, get("/view/test")).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/edit/test");
}

#[tokio::test]
async fn saved_page_lands_in_flat_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path().join("pages");
    let (app, _) = fs_app(&root);

    send(
        &app,
        post_form("/save/Notes", &[("title", "Notes"), ("body", "a\nb & c")]),
    )
    .await;

    assert_eq!(
        std::fs::read_to_string(root.join("Notes.txt")).unwrap(),
        "a\nb & c"
    );
}

#[tokio::test]
async fn view_missing_page_redirects_to_edit() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (app, _) = fs_app(temp_dir.path());

    let response = send(&app, get("/view/NeverSaved")).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/edit/NeverSaved");
}

#[tokio::test]
async fn view_escapes_page_body() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (app, store) = fs_app(temp_dir.path());
    store
        .save(&id("Xss"), b"<script>alert('x')</script>")
        .unwrap();

    let response = send(&app, get("/view/Xss")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/html; charset=utf-8"
    );

    let html = body_text(response).await;
    assert!(html.contains("<title>View Xss</title>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
}

#[tokio::test]
async fn index_lists_pages() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (app, store) = fs_app(temp_dir.path());
    for title in ["a", "b", "c"] {
        store.save(&id(title), b"x").unwrap();
    }
    store.delete(&id("b")).unwrap();

    let response = send(&app, get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("<title>All Pages</title>"));
    assert!(html.contains(r#"href="/view/a""#));
    assert!(html.contains(r#"href="/view/c""#));
    assert!(!html.contains(r#"href="/view/b""#));
}

#[tokio::test]
async fn index_with_missing_storage_root() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (app, _) = fs_app(&temp_dir.path().join("not-created-yet"));

    let response = send(&app, get("/")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("No pages yet."));
}

#[tokio::test]
async fn edit_missing_page_shows_blank_form() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (app, _) = fs_app(temp_dir.path());

    let response = send(&app, get("/edit/Fresh")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("New page"));
    assert!(html.contains(r#"action="/save/Fresh""#));
    assert!(html.contains(r#"<textarea name="body"></textarea>"#));
}

#[tokio::test]
async fn edit_existing_page_is_prefilled() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (app, store) = fs_app(temp_dir.path());
    store.save(&id("Home"), b"welcome home").unwrap();

    let response = send(&app, get("/edit/Home")).await;

    let html = body_text(response).await;
    assert!(html.contains("<title>Edit Home</title>"));
    assert!(html.contains(r#"<textarea name="body">welcome home</textarea>"#));
}

#[tokio::test]
async fn save_under_form_title() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (app, store) = fs_app(temp_dir.path());

    let response = send(
        &app,
        post_form("/save/Old", &[("title", "Renamed"), ("body", "moved")]),
    )
    .await;

    assert_eq!(location(&response), "/view/Renamed");
    assert_eq!(store.load(&id("Renamed")).unwrap().body, b"moved");
    assert!(!store.exists(&id("Old")));
}

#[tokio::test]
async fn save_without_title_uses_path_identifier() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (app, store) = fs_app(temp_dir.path());

    let response = send(&app, post_form("/save/Home", &[("title", ""), ("body", "hi")])).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/view/Home");
    assert_eq!(store.load(&id("Home")).unwrap().body, b"hi");
}

#[tokio::test]
async fn save_stores_raw_body_bytes() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (app, store) = fs_app(temp_dir.path());

    let request = Request::builder()
        .method("POST")
        .uri("/save/Bin")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("title=Bin&body=%FF%00ok"))
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(location(&response), "/view/Bin");
    assert_eq!(store.load(&id("Bin")).unwrap().body, vec![0xff, 0x00, b'o', b'k']);
}

#[tokio::test]
async fn save_rejects_unsafe_form_title() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (app, store) = fs_app(temp_dir.path());

    let response = send(
        &app,
        post_form("/save/Home", &[("title", "../escape"), ("body", "x")]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.list().unwrap().is_empty());
    assert!(!temp_dir.path().parent().unwrap().join("escape.txt").exists());
}

#[tokio::test]
async fn delete_missing_page_is_not_found() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (app, _) = fs_app(temp_dir.path());

    let response = send(&app, post("/delete/Ghost")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn paths_outside_grammar_never_reach_storage() {
    // Any store access would answer 500
    let store = Arc::new(MockPageStore::failing(StorageErrorKind::Other));
    let app = router(store, Templates::embedded());

    for uri in [
        "/view/../../etc/passwd",
        "/view/..%2F..%2Fetc%2Fpasswd",
        "/view/foo%20bar",
        "/view/foo-bar",
        "/view/page.txt",
        "/view/",
        "/view/a/b",
        "/view/Home/",
        "/show/Home",
        "/View/Home",
        "/favicon.ico",
    ] {
        let response = send(&app, get(uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }

    let response = send(&app, post_form("/save/a%2Fb", &[("body", "x")])).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wrong_method_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (app, store) = fs_app(temp_dir.path());
    store.save(&id("Home"), b"keep").unwrap();

    let response = send(&app, get("/delete/Home")).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(store.exists(&id("Home")));
}

#[tokio::test]
async fn storage_failure_is_plain_text_500() {
    let store = Arc::new(MockPageStore::failing(StorageErrorKind::PermissionDenied));
    let app = router(store, Templates::embedded());

    let response = send(&app, get("/")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    assert!(body_text(response).await.contains("Permission denied"));
}

#[tokio::test]
async fn view_storage_failure_is_not_redirected() {
    let store = Arc::new(MockPageStore::failing(StorageErrorKind::PermissionDenied));
    let app = router(store, Templates::embedded());

    let response = send(&app, get("/view/Home")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn missing_content_template_is_500_without_partial_body() {
    let store = Arc::new(MockPageStore::new().with_page("Home", "hello"));
    let templates = Templates::from_sources([(
        "base.html",
        "<!DOCTYPE html><title>{{ title }}</title>{{ content }}",
    )])
    .unwrap();
    let app = router(store, templates);

    let response = send(&app, get("/view/Home")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_text(response).await;
    assert_eq!(body, "Template not found: view.html\n");
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let store = Arc::new(MockPageStore::new());
    let app = router(store, Templates::embedded());

    for uri in ["/", "/nowhere"] {
        let response = send(&app, get(uri)).await;
        let headers = response.headers();
        assert_eq!(headers["x-content-type-options"], "nosniff", "{uri}");
        assert_eq!(headers["x-frame-options"], "DENY", "{uri}");
        assert!(headers.contains_key("content-security-policy"), "{uri}");
    }
}
