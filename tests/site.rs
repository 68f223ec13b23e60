mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{Fakes, get, post, send};

#[tokio::test]
async fn should_serve_frontpage_and_static_files() {
    let app = Fakes::new().app();

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("<h1>Huddle</h1>"));

    let (status, body) = send(&app, Method::GET, "/app.css", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"body { margin: 0; }\n");

    let (status, _) = send(&app, Method::GET, "/missing.html", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_not_serve_files_outside_static_root() {
    let app = Fakes::new().app();

    for uri in ["/../Cargo.toml", "/%2e%2e/Cargo.toml", "/%2e%2e/%2e%2e/src/lib.rs"] {
        let (status, _) = send(&app, Method::GET, uri, None).await;
        assert_ne!(status, StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn should_hide_dotfiles_and_credentials_under_static_root() {
    let app = Fakes::new().app();

    for uri in ["/.env", "/%2eenv", "/mongo-credentials.json", "/mongo%2dcredentials.json"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(!String::from_utf8_lossy(&body).contains("not-a-real-secret"), "{uri}");
    }

    let (status, _) = send(&app, Method::GET, "/app.css", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn should_report_store_health() {
    let mut fakes = Fakes::new();

    let (status, body) = get(&fakes.app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");

    fakes.connected = false;
    let (status, body) = get(&fakes.app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "disconnected");
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn should_list_endpoints() {
    let (status, body) = get(&Fakes::new().app(), "/test").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "MongoDB");
    assert_eq!(body["collections"].as_array().unwrap().len(), 5);
    assert!(body["endpoints"]["qa"].as_array().unwrap().len() == 6);
}

#[tokio::test]
async fn should_publish_posts_newest_first() {
    let fakes = Fakes::new();
    let app = fakes.app();

    for content in ["first", "second"] {
        let (status, body) = post(
            &app,
            "/createpost",
            json!({ "userId": 7, "userName": "Ion", "content": content }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Post created successfully!");
    }

    let (status, body) = get(&app, "/getposts").await;
    assert_eq!(status, StatusCode::OK);
    let posts = body["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["content"], "second");
    assert_eq!(posts[0]["userId"], "7");
    assert_eq!(posts[0]["likes"], json!([]));
    assert!(posts[0]["postId"].as_str().is_some());
}
