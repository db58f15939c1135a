use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use keytags::AnalyseConfig;
use serde_json::Value;
use server::{router, AppState};
use std::fs;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

fn build_state(dir: &TempDir, admin_token: Option<&str>) -> AppState {
    let dict = dir.path().join("dict.txt");
    let idf = dir.path().join("idf.txt");
    fs::write(&dict, "apple 10 n\nbanana 10 n\ncherry 10 n\n").unwrap();
    fs::write(&idf, "apple 2.0\nbanana 1.0\ncherry 3.0\n").unwrap();
    let config = AnalyseConfig { dictionary: Some(dict), idf: Some(idf), ..Default::default() };
    AppState::from_config(&config, admin_token.map(str::to_string)).unwrap()
}

async fn call(app: Router, req: Request<Body>) -> (StatusCode, Bytes) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let dir = tempdir().unwrap();
    let (status, body) = call(router(build_state(&dir, None)), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn tags_returns_ranked_terms() {
    let dir = tempdir().unwrap();
    let app = router(build_state(&dir, None));
    let (status, body) = call(app, get("/tags?q=apple%20banana%20cherry&k=2")).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    let tags = json["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0]["text"], "cherry");
    assert_eq!(tags[1]["text"], "apple");
    assert_eq!(json["query"], "apple banana cherry");
}

#[tokio::test]
async fn textrank_honours_pos_list() {
    let dir = tempdir().unwrap();
    let state = build_state(&dir, None);

    let (status, body) = call(router(state.clone()), get("/textrank?q=apple%20banana&k=0")).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["tags"].as_array().unwrap().len(), 2);
    assert_eq!(json["tags"][0]["text"], "banana");

    let (_, body) = call(router(state), get("/textrank?q=apple%20banana&pos=v")).await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["tags"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn idf_lookup_reports_median_fallback() {
    let dir = tempdir().unwrap();
    let app = router(build_state(&dir, None));
    let (status, body) = call(app, get("/idf/durian")).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "frequency": 0.0, "median": 2.0, "found": false }));
}

#[tokio::test]
async fn dictionary_edits_require_admin_token() {
    let dir = tempdir().unwrap();
    let state = build_state(&dir, Some("secret"));
    let payload = r#"{"word": "durian", "frequency": 5, "pos": "n"}"#;

    let req = Request::post("/dict/words")
        .header("content-type", "application/json")
        .body(Body::from(payload))
        .unwrap();
    let (status, _) = call(router(state.clone()), req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = Request::post("/dict/words")
        .header("content-type", "application/json")
        .header("X-ADMIN-TOKEN", "secret")
        .body(Body::from(payload))
        .unwrap();
    let (status, _) = call(router(state.clone()), req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(state.ranker.pos("durian").as_deref(), Some("n"));

    let req = Request::delete("/dict/words/durian").header("X-ADMIN-TOKEN", "secret").body(Body::empty()).unwrap();
    let (status, _) = call(router(state.clone()), req).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(state.ranker.frequency("durian"), Some(0.0));
}
