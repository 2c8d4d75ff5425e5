// ==========================
// tests/unit/error_tests.rs
// ==========================
//! Status and code mapping of the application error type
use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use backend_lib::error::AppError;
use backend_lib::validation::ValidationError;

#[test]
fn test_error_categories() {
    // validation
    let err: AppError = ValidationError::InvalidEmail("Invalid email format".to_string()).into();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(err.public_message(), "Invalid email format");

    // authentication
    assert_eq!(AppError::DuplicateUser.status_code(), StatusCode::CONFLICT);
    assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);

    // unexpected
    let err = AppError::Internal("pool exhausted".to_string());
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.public_message(), "An internal server error occurred");
}

#[tokio::test]
async fn test_server_errors_do_not_leak_details() {
    let response = AppError::Internal("secret detail".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(!text.contains("secret detail"));
    assert!(text.contains("INT_001"));
}
