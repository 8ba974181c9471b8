// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the Reddit client using wiremock.

use ryzom_reddit_bot::config::RedditConfig;
use ryzom_reddit_bot::error::{BotError, NetworkError, RedditError};
use ryzom_reddit_bot::reddit::{Flair, Publisher, RedditClient, SelfPost};
use serde_json::json;
use wiremock::matchers::{basic_auth, bearer_token, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer) -> RedditConfig {
    RedditConfig {
        username: "ryzom_bot".to_string(),
        password: "hunter2".to_string(),
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        subreddit: "Ryzom".to_string(),
        auth_url: server.uri(),
        api_url: server.uri(),
        ..RedditConfig::default()
    }
}

fn post() -> SelfPost {
    SelfPost {
        subreddit: "Ryzom".to_string(),
        title: "New Event Hide n Hype".to_string(),
        text: "## Events\n- Hide n Hype starts on Atys.\n".to_string(),
        send_replies: false,
    }
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .and(basic_auth("client-id", "client-secret"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("username=ryzom_bot"))
        .and(body_string_contains("password=hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token-123",
            "token_type": "bearer",
            "expires_in": 86400,
            "scope": "*"
        })))
        .mount(server)
        .await;
}

fn reddit_error(err: BotError) -> RedditError {
    match err {
        BotError::Reddit(boxed) => *boxed,
        other => panic!("Expected BotError::Reddit, got {other:?}"),
    }
}

// =============================================================================
// authenticate
// =============================================================================

#[tokio::test]
async fn test_authenticate_success() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    let result = RedditClient::authenticate(&settings(&server)).await;
    assert!(result.is_ok(), "authenticate failed: {:?}", result.err());
}

#[tokio::test]
async fn test_authenticate_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "invalid_grant"})))
        .mount(&server)
        .await;

    let err = reddit_error(RedditClient::authenticate(&settings(&server)).await.unwrap_err());
    insta::assert_snapshot!(err.to_string(), @"authentication failed: invalid_grant");
}

#[tokio::test]
async fn test_authenticate_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized", "error": 401})),
        )
        .mount(&server)
        .await;

    let err = reddit_error(RedditClient::authenticate(&settings(&server)).await.unwrap_err());
    insta::assert_snapshot!(err.to_string(), @"authentication failed: Unauthorized");
}

#[tokio::test]
async fn test_authenticate_non_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = reddit_error(RedditClient::authenticate(&settings(&server)).await.unwrap_err());
    assert!(matches!(err, RedditError::Auth { ref message } if message.starts_with("http 502")));
}

// =============================================================================
// submit
// =============================================================================

#[tokio::test]
async fn test_submit_success() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .and(bearer_token("token-123"))
        .and(body_string_contains("api_type=json"))
        .and(body_string_contains("kind=self"))
        .and(body_string_contains("sr=Ryzom"))
        .and(body_string_contains("title=New+Event+Hide+n+Hype"))
        .and(body_string_contains("sendreplies=false"))
        .and(body_string_contains("resubmit=true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "json": {
                "errors": [],
                "data": {
                    "id": "1k2x3y",
                    "name": "t3_1k2x3y",
                    "url": "https://www.reddit.com/r/Ryzom/comments/1k2x3y/"
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = RedditClient::authenticate(&settings(&server)).await.unwrap();
    let submission = client.submit(&post()).await.unwrap();

    assert_eq!(submission.id, "1k2x3y");
    assert_eq!(submission.name, "t3_1k2x3y");
    assert_eq!(
        submission.url,
        "https://www.reddit.com/r/Ryzom/comments/1k2x3y/"
    );
}

#[tokio::test]
async fn test_submit_api_errors() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "json": {"errors": [["SUBREDDIT_NOEXIST", "that subreddit doesn't exist", "sr"]]}
        })))
        .mount(&server)
        .await;

    let client = RedditClient::authenticate(&settings(&server)).await.unwrap();
    let err = reddit_error(client.submit(&post()).await.unwrap_err());

    insta::assert_snapshot!(
        err.to_string(),
        @"/api/submit rejected the request: SUBREDDIT_NOEXIST: that subreddit doesn't exist (sr)"
    );
}

#[tokio::test]
async fn test_submit_ratelimit_error_code() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "json": {
                "ratelimit": 540.5,
                "errors": [["RATELIMIT", "you are doing that too much", "ratelimit"]]
            }
        })))
        .mount(&server)
        .await;

    let client = RedditClient::authenticate(&settings(&server)).await.unwrap();
    let err = client.submit(&post()).await.unwrap_err();

    assert!(err.is_rate_limited());
    insta::assert_snapshot!(
        err.to_string(),
        @"reddit error: rate limited on /api/submit (retry after 541s)"
    );
}

#[tokio::test]
async fn test_submit_http_429() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .respond_with(ResponseTemplate::new(429).insert_header("x-ratelimit-reset", "12"))
        .mount(&server)
        .await;

    let client = RedditClient::authenticate(&settings(&server)).await.unwrap();
    let err = reddit_error(client.submit(&post()).await.unwrap_err());

    assert!(matches!(
        err,
        RedditError::RateLimited {
            retry_after_secs: Some(12),
            ..
        }
    ));
}

#[tokio::test]
async fn test_submit_http_error() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = RedditClient::authenticate(&settings(&server)).await.unwrap();
    match client.submit(&post()).await.unwrap_err() {
        BotError::Network(boxed) => {
            assert!(matches!(*boxed, NetworkError::HttpError { status: 403, .. }));
        }
        other => panic!("Expected BotError::Network, got {other:?}"),
    }
}

#[tokio::test]
async fn test_submit_missing_data() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"json": {"errors": []}})))
        .mount(&server)
        .await;

    let client = RedditClient::authenticate(&settings(&server)).await.unwrap();
    let err = reddit_error(client.submit(&post()).await.unwrap_err());

    assert!(matches!(err, RedditError::UnexpectedResponse { .. }));
}

// =============================================================================
// select_flair
// =============================================================================

#[tokio::test]
async fn test_select_flair() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/r/Ryzom/api/selectflair"))
        .and(bearer_token("token-123"))
        .and(body_string_contains("link=t3_1k2x3y"))
        .and(body_string_contains("flair_template_id=tmpl-1"))
        .and(body_string_contains("text=Release+Note"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"json": {"errors": []}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = RedditClient::authenticate(&settings(&server)).await.unwrap();
    let flair = Flair::from_settings("Release Note", "tmpl-1").unwrap();
    client
        .select_flair("Ryzom", "t3_1k2x3y", &flair)
        .await
        .unwrap();
}
