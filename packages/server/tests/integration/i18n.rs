use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn no_languages_initially() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::I18N).await;
    assert_eq!(res.status, 200);
    assert!(res.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn merge_creates_language_and_preserves_existing_keys() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let first = app
        .put_json_with_token(
            &routes::language("en"),
            &json!({"greeting": "hello", "farewell": "bye"}),
            &token,
        )
        .await;
    assert_eq!(first.status, 200, "{}", first.text);
    assert_eq!(first.body["data"]["greeting"], "hello");

    // Second merge overrides one key and keeps the other.
    let second = app
        .put_json_with_token(
            &routes::language("en"),
            &json!({"greeting": "hi there"}),
            &token,
        )
        .await;
    assert_eq!(second.status, 200);
    assert_eq!(second.body["data"]["greeting"], "hi there");
    assert_eq!(second.body["data"]["farewell"], "bye");

    // Readable publicly, and listed.
    let fetched = app.get(&routes::language("en")).await;
    assert_eq!(fetched.status, 200);
    assert_eq!(fetched.body["greeting"], "hi there");

    let langs = app.get(routes::I18N).await;
    assert_eq!(langs.body.as_array().unwrap().len(), 1);
    assert_eq!(langs.body[0], "en");
}

#[tokio::test]
async fn unknown_language_is_404() {
    let app = TestApp::spawn().await;

    let res = app.get(&routes::language("fr")).await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn invalid_language_code_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    // Percent-encoded space decodes to "en us", which fails code validation
    // before any path is built.
    let res = app
        .put_json_with_token("/i18n/en%20us", &json!({"k": "v"}), &token)
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn update_requires_admin() {
    let app = TestApp::spawn().await;

    let res = app
        .client
        .put(format!("http://{}{}", app.addr, routes::language("en")))
        .json(&json!({"k": "v"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 401);
}
