mod common;

// std
use std::{sync::Arc, time::Duration};
// crates.io
use httpmock::prelude::*;
// self
use common::*;
use megaport::{
	CancellationToken,
	auth::{BearerToken, Credentials},
	context::CallContext,
	error::{ConfigError, Error, TransportError},
};

#[tokio::test]
async fn authorize_reuses_cached_token_without_network() {
	let server = MockServer::start_async().await;
	let tokens = build_test_token_manager(&server, credentials());
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth2/token")
				.header("authorization", BASIC_AUTHORIZATION)
				.header("content-type", "application/x-www-form-urlencoded")
				.body("grant_type=client_credentials");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body("cached-token", 3600));
		})
		.await;
	let ctx = CallContext::new();
	let first = tokens.authorize(&ctx).await.expect("Initial authorize should succeed.");
	let second = tokens.authorize(&ctx).await.expect("Cached authorize should succeed.");

	assert_eq!(first.value().expose(), "cached-token");
	assert_eq!(second, first);

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn expired_token_is_replaced_by_a_fresh_one() {
	let server = MockServer::start_async().await;
	let tokens = build_test_token_manager(&server, credentials());
	let first_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body("short-lived", 0));
		})
		.await;
	let ctx = CallContext::new();
	let first = tokens.authorize(&ctx).await.expect("First authorize should succeed.");

	first_mock.assert_calls_async(1).await;
	first_mock.delete_async().await;

	let second_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body("replacement", 3600));
		})
		.await;
	let second = tokens.authorize(&ctx).await.expect("Second authorize should succeed.");

	assert_eq!(first.value().expose(), "short-lived");
	assert_eq!(second.value().expose(), "replacement");
	assert_ne!(second, first);
	assert_eq!(tokens.cached().await, Some(second));

	second_mock.assert_calls_async(1).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_share_a_single_exchange() {
	const CALLERS: usize = 8;

	let server = MockServer::start_async().await;
	let tokens = Arc::new(build_test_token_manager(&server, credentials()));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200)
				.header("content-type", "application/json")
				.delay(Duration::from_millis(100))
				.body(token_body("shared-token", 900));
		})
		.await;
	let handles = (0..CALLERS)
		.map(|_| {
			let tokens = Arc::clone(&tokens);

			tokio::spawn(async move {
				let ctx = CallContext::new();

				tokens.authorize(&ctx).await
			})
		})
		.collect::<Vec<_>>();
	let mut issued = Vec::with_capacity(CALLERS);

	for handle in handles {
		let token = handle
			.await
			.expect("Authorize task should not panic.")
			.expect("Concurrent authorize should succeed.");

		issued.push(token);
	}

	assert!(issued.iter().all(|token| token.value().expose() == "shared-token"));
	assert!(issued.windows(2).all(|pair| pair[0] == pair[1]));

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn conditional_invalidation_only_drops_the_rejected_token() {
	let server = MockServer::start_async().await;
	let tokens = build_test_token_manager(&server, credentials());
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body("current", 3600));
		})
		.await;
	let current = tokens.authorize(&CallContext::new()).await.expect("Authorize should succeed.");
	let superseded = BearerToken::new("superseded", current.expires_at());

	assert!(!tokens.invalidate_if(&superseded).await);
	assert_eq!(tokens.cached().await, Some(current.clone()));
	assert!(tokens.invalidate_if(&current).await);
	assert!(tokens.cached().await.is_none());
}

#[tokio::test]
async fn force_refresh_always_exchanges() {
	let server = MockServer::start_async().await;
	let tokens = build_test_token_manager(&server, credentials());
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body("forced", 3600));
		})
		.await;
	let ctx = CallContext::new();

	tokens.authorize(&ctx).await.expect("Authorize should succeed.");
	tokens.force_refresh(&ctx).await.expect("Forced refresh should succeed.");

	mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn error_field_maps_to_authentication_failure() {
	let server = MockServer::start_async().await;
	let tokens = build_test_token_manager(&server, credentials());
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(400)
				.header("content-type", "application/json")
				.body(r#"{"error":"invalid_client","error_description":"unknown key"}"#);
		})
		.await;
	let err = tokens
		.authorize(&CallContext::new())
		.await
		.expect_err("Rejected credentials should fail authorize.");

	match err {
		Error::Authentication { reason, status } => {
			assert_eq!(reason, "invalid_client: unknown key");
			assert_eq!(status, Some(400));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	assert!(tokens.cached().await.is_none());

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn failed_exchange_keeps_previous_cache() {
	let server = MockServer::start_async().await;
	let tokens = build_test_token_manager(&server, credentials());
	let success = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body("stale-soon", 0));
		})
		.await;
	let ctx = CallContext::new();
	let first = tokens.authorize(&ctx).await.expect("Initial authorize should succeed.");

	success.delete_async().await;

	let failure = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(503).body("maintenance");
		})
		.await;
	let err = tokens.authorize(&ctx).await.expect_err("Unavailable endpoint should fail.");

	assert!(matches!(err, Error::Transport(TransportError::UnexpectedStatus { status: 503 })));
	assert_eq!(tokens.cached().await, Some(first));

	failure.assert_calls_async(1).await;
}

#[tokio::test]
async fn missing_credentials_fail_before_any_request() {
	let server = MockServer::start_async().await;
	let tokens = build_test_token_manager(&server, Credentials::new("", SECRET_KEY));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200).body(token_body("never", 60));
		})
		.await;
	let err = tokens
		.authorize(&CallContext::new())
		.await
		.expect_err("Blank access key should fail authorize.");

	assert!(matches!(
		err,
		Error::Config(ConfigError::MissingCredential { field: "access_key" })
	));

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn cancelled_context_aborts_without_request() {
	let server = MockServer::start_async().await;
	let tokens = build_test_token_manager(&server, credentials());
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200).body(token_body("never", 60));
		})
		.await;
	let cancellation = CancellationToken::new();

	cancellation.cancel();

	let err = tokens
		.authorize(&CallContext::new().with_cancellation(cancellation))
		.await
		.expect_err("Cancelled context should abort authorize.");

	assert!(err.is_cancelled());

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn deadline_bounds_a_slow_token_endpoint() {
	let server = MockServer::start_async().await;
	let tokens = build_test_token_manager(&server, credentials());
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200)
				.header("content-type", "application/json")
				.delay(Duration::from_secs(5))
				.body(token_body("late", 60));
		})
		.await;
	let err = tokens
		.authorize(&CallContext::new().with_timeout(Duration::from_millis(200)))
		.await
		.expect_err("Slow token endpoint should hit the deadline.");

	assert!(err.is_timeout());
	assert!(tokens.cached().await.is_none());
}
