use axum::http::StatusCode;
use uspot::schemas::auth::{LoginRequest, RegisterRequest};
use uspot::schemas::profile::ProfileResponse;

mod common;

use crate::common::{ALICE, TestEnv};

fn access_token_name() -> String {
	std::env::var("ACCESS_TOKEN_NAME").unwrap()
}

fn register_request(username: &str, email: &str) -> RegisterRequest {
	RegisterRequest {
		username: username.to_string(),
		password: "hoos-study-late".to_string(),
		email:    email.to_string(),
	}
}

#[tokio::test(flavor = "multi_thread")]
async fn register() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/register")
		.json(&register_request("wahoo", "wahoo@virginia.edu"))
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);
	assert!(response.maybe_cookie(&access_token_name()).is_some());

	let body = response.json::<ProfileResponse>();

	assert_eq!(body.username, "wahoo");
	assert_eq!(body.email, "wahoo@virginia.edu");
	assert!(!body.is_admin);

	// Registering logs the new profile in
	let response = env.app.get("/profile/me").await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.json::<ProfileResponse>().username, "wahoo");
}

#[tokio::test(flavor = "multi_thread")]
async fn register_invalid_username_start() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/register")
		.json(&register_request("123", "numbers@virginia.edu"))
		.await;

	let body = response.text();

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
	assert!(
		body.contains("username must start with a letter"),
		"Expected error message to contain 'username must start with a \
		 letter', got: {body}"
	);
}

#[tokio::test(flavor = "multi_thread")]
async fn register_username_too_short() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/register")
		.json(&register_request("a", "short@virginia.edu"))
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
	assert!(
		response
			.text()
			.contains("username must be between 2 and 32 characters long")
	);
}

#[tokio::test(flavor = "multi_thread")]
async fn register_password_too_short() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/register")
		.json(&RegisterRequest {
			password: "short".to_string(),
			..register_request("shorty", "shorty@virginia.edu")
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn register_invalid_email() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/register")
		.json(&register_request("mailless", "not-an-email"))
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn register_duplicate_email() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/register")
		.json(&register_request("alice2", ALICE.0))
		.await;

	assert_eq!(response.status_code(), StatusCode::CONFLICT);
	assert!(response.text().contains("email is already in use"));
}

#[tokio::test(flavor = "multi_thread")]
async fn register_duplicate_username() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/register")
		.json(&register_request("alice", "other-alice@virginia.edu"))
		.await;

	assert_eq!(response.status_code(), StatusCode::CONFLICT);
	assert!(response.text().contains("username is already in use"));
}

#[tokio::test(flavor = "multi_thread")]
async fn login() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/login")
		.json(&LoginRequest {
			email:    ALICE.0.to_string(),
			password: ALICE.1.to_string(),
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
	assert!(response.maybe_cookie(&access_token_name()).is_some());

	let response = env.app.get("/profile/me").await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.json::<ProfileResponse>().email, ALICE.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn login_wrong_password() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/login")
		.json(&LoginRequest {
			email:    ALICE.0.to_string(),
			password: "not-alices-password".to_string(),
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
	assert!(response.maybe_cookie(&access_token_name()).is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn login_unknown_email() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/login")
		.json(&LoginRequest {
			email:    "nobody@virginia.edu".to_string(),
			password: "whatever-password".to_string(),
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn logout() {
	let env = TestEnv::new().await.login(ALICE).await;

	let response = env.app.post("/auth/logout").await;

	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

	let response = env.app.get("/profile/me").await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn logout_without_session() {
	let env = TestEnv::new().await;

	let response = env.app.post("/auth/logout").await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
