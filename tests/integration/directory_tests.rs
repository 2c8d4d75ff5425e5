// ==================================
// tests/integration/directory_tests.rs
// ==================================
//! Listing endpoints for users and clients.
use crate::test_utils::{empty_request, json_request, send, setup_test_env};
use axum::http::{Method, StatusCode};
use backend_lib::storage::Store;
use estate_common::Role;
use serde_json::json;

#[tokio::test]
async fn test_get_users_lists_newest_first_without_hashes() {
    let (state, app) = setup_test_env().await;

    for (name, email) in [
        ("Anjali Reddy", "anjali.reddy@realestate.com"),
        ("Amit Gupta", "amit.gupta@realestate.com"),
    ] {
        let (status, _, _) = send(
            &app,
            json_request(
                Method::POST,
                "/api/auth/register",
                &json!({ "name": name, "email": email, "password": "Worker4Pass!" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    state
        .auth
        .register("admin@realestate.com", "AdminPass99".to_string(), "Admin", Role::Admin)
        .await
        .unwrap();

    let (status, _, body) = send(&app, empty_request(Method::GET, "/api/get-users")).await;
    assert_eq!(status, StatusCode::OK);

    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(users[0]["email"], "admin@realestate.com");
    assert_eq!(users[0]["role"], "ADMIN");
    assert_eq!(users[2]["email"], "anjali.reddy@realestate.com");
    assert!(users.iter().all(|u| u.get("passwordHash").is_none()));
}

#[tokio::test]
async fn test_get_user_by_id() {
    let (state, app) = setup_test_env().await;
    let user = state
        .auth
        .register("rohan@realestate.com", "Worker6Pass!".to_string(), "Rohan", Role::User)
        .await
        .unwrap();

    let (status, _, body) =
        send(&app, empty_request(Method::GET, &format!("/api/users/{}", user.id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "rohan@realestate.com");

    let (status, _, body) = send(&app, empty_request(Method::GET, "/api/users/unknown-id")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NF_001");
}

#[tokio::test]
async fn test_get_clients() {
    let (state, app) = setup_test_env().await;

    let (status, _, body) = send(&app, empty_request(Method::GET, "/api/get-clients")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let worker = state
        .auth
        .register("worker@realestate.com", "Worker7Pass!".to_string(), "Worker", Role::User)
        .await
        .unwrap();
    let sahil = state.storage.insert_client(&worker.id, "Sahil Khan").await.unwrap();
    let eden = state.storage.insert_client(&worker.id, "Eden Charles").await.unwrap();

    let (status, _, body) = send(&app, empty_request(Method::GET, "/api/get-clients")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "id": sahil.id, "name": "Sahil Khan" },
            { "id": eden.id, "name": "Eden Charles" },
        ])
    );
}

#[tokio::test]
async fn test_listing_rejects_other_methods() {
    let (_state, app) = setup_test_env().await;

    let (status, _, _) = send(&app, empty_request(Method::POST, "/api/get-users")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _, _) = send(&app, empty_request(Method::DELETE, "/api/get-clients")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
