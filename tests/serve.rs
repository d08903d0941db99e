use std::fs;
use std::path::Path;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use mdpress::Site;
use tower::ServiceExt;

async fn get(public_dir: &Path, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = mdpress::server::router(public_dir)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn generated_site_is_served() {
    let dir = tempfile::tempdir().unwrap();
    let templates = Path::new(env!("CARGO_MANIFEST_DIR")).join("templates");
    fs::create_dir_all(dir.path().join("templates")).unwrap();
    for name in ["post.html", "index.html"] {
        fs::copy(templates.join(name), dir.path().join("templates").join(name)).unwrap();
    }
    fs::create_dir_all(dir.path().join("blog/posts")).unwrap();
    fs::write(dir.path().join("blog/posts/2024-03-01-hello-world.md"), "Hi").unwrap();

    let site = Site::new(dir.path()).unwrap();
    site.generate().unwrap();

    let (status, root) = get(&site.public_dir, "/").await;
    assert_eq!(status, StatusCode::OK);
    let (_, index) = get(&site.public_dir, "/index.html").await;
    assert_eq!(root, index);
    assert_eq!(root, fs::read(site.public_dir.join("index.html")).unwrap());

    let (status, post) = get(&site.public_dir, "/posts/2024-03-01-hello-world.html").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(post).unwrap().contains("<p>Hi</p>"));

    let (status, _) = get(&site.public_dir, "/posts/nope.html").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
