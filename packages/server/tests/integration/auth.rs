use chrono::Duration;
use serde_json::json;

use crate::common::{ADMIN_USERNAME, TestApp, routes};

const TEST_SECRET: &str = "test-secret-for-integration-tests";

#[tokio::test]
async fn login_returns_bearer_token_for_admin() {
    let app = TestApp::spawn().await;

    let res = app
        .client
        .post(format!("http://{}{}", app.addr, routes::LOGIN))
        .form(&[("username", ADMIN_USERNAME), ("password", "test-admin-password")])
        .send()
        .await
        .unwrap();
    let res = crate::common::TestResponse::from_response(res).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["token_type"], "bearer");
    let token = res.body["access_token"].as_str().unwrap();

    // The token decodes back to the stored identity.
    let claims = server::utils::jwt::verify(token, TEST_SECRET).unwrap();
    assert_eq!(claims.sub, ADMIN_USERNAME);
    assert_eq!(claims.role, "admin");
}

#[tokio::test]
async fn login_rejects_wrong_password_and_unknown_user_identically() {
    let app = TestApp::spawn().await;

    let wrong_password = app
        .client
        .post(format!("http://{}{}", app.addr, routes::LOGIN))
        .form(&[("username", ADMIN_USERNAME), ("password", "nope")])
        .send()
        .await
        .unwrap();
    let wrong_password = crate::common::TestResponse::from_response(wrong_password).await;

    let unknown_user = app
        .client
        .post(format!("http://{}{}", app.addr, routes::LOGIN))
        .form(&[("username", "nobody"), ("password", "nope")])
        .send()
        .await
        .unwrap();
    let unknown_user = crate::common::TestResponse::from_response(unknown_user).await;

    // Same status, same code, same message: no username oracle.
    assert_eq!(wrong_password.status, 401);
    assert_eq!(unknown_user.status, 401);
    assert_eq!(wrong_password.body["code"], "INVALID_CREDENTIALS");
    assert_eq!(unknown_user.body["code"], "INVALID_CREDENTIALS");
    assert_eq!(wrong_password.body["message"], unknown_user.body["message"]);
}

#[tokio::test]
async fn me_returns_identity_for_valid_token() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let res = app.get_with_token(routes::ME, &token).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["username"], ADMIN_USERNAME);
    assert_eq!(res.body["role"], "admin");
}

#[tokio::test]
async fn missing_and_malformed_tokens_are_unauthorized() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::ME).await;
    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_MISSING");

    let res = app.get_with_token(routes::ME, "garbage").await;
    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_INVALID");
}

#[tokio::test]
async fn expired_token_is_rejected_despite_valid_signature() {
    let app = TestApp::spawn().await;

    let expired =
        server::utils::jwt::sign(ADMIN_USERNAME, "admin", TEST_SECRET, Duration::minutes(-10))
            .unwrap();
    let res = app.get_with_token(routes::ME, &expired).await;
    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_INVALID");
}

#[tokio::test]
async fn non_admin_role_is_forbidden() {
    let app = TestApp::spawn().await;

    let token =
        server::utils::jwt::sign(ADMIN_USERNAME, "editor", TEST_SECRET, Duration::minutes(30))
            .unwrap();
    let res = app.get_with_token(routes::ME, &token).await;
    assert_eq!(res.status, 403);
    assert_eq!(res.body["code"], "PERMISSION_DENIED");
}

#[tokio::test]
async fn valid_token_for_nonexistent_user_is_rejected() {
    let app = TestApp::spawn().await;

    // Signed with the real secret, but the subject is not in the store.
    let stale = server::utils::jwt::sign("ghost", "admin", TEST_SECRET, Duration::minutes(30))
        .unwrap();
    let res = app.get_with_token(routes::ME, &stale).await;
    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_INVALID");
}

#[tokio::test]
async fn every_mutating_route_requires_auth() {
    let app = TestApp::spawn().await;

    let unauthed_posts = [
        routes::PROJECTS,
        routes::CERTIFICATES,
        "/jobs/",
        routes::TECHNOLOGIES,
        "/socials/",
        "/experiences/",
    ];
    for path in unauthed_posts {
        let res = app.post_form_without_token(path, &[("title", "x")], &[]).await;
        assert_eq!(res.status, 401, "POST {path} should require auth");
    }

    let res = app
        .post_json_without_token(routes::TAGS, &json!({"name": "x"}))
        .await;
    assert_eq!(res.status, 401, "POST /tags/ should require auth");

    let res = app
        .client
        .put(format!("http://{}/i18n/en", app.addr))
        .json(&json!({"k": "v"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 401, "PUT /i18n/en should require auth");

    let res = app.delete_without_token(&routes::project(1)).await;
    assert_eq!(res.status, 401, "DELETE /projects/1 should require auth");

    let res = app.delete_without_token(&routes::technology(1)).await;
    assert_eq!(res.status, 401, "DELETE /technologies/1 should require auth");
}

#[tokio::test]
async fn reads_are_public() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;
    let tech_id = app.create_technology(&token, "Rust").await;

    // No Authorization header on any of these.
    assert_eq!(app.get(routes::TECHNOLOGIES).await.status, 200);
    assert_eq!(app.get(&routes::technology(tech_id)).await.status, 200);
    assert_eq!(app.get(routes::PROJECTS).await.status, 200);
    assert_eq!(app.get(routes::I18N).await.status, 200);

    // Sanity: the upload really happened.
    assert_eq!(app.stored_asset_count(), 1);
}
