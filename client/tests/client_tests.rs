//! Tests for the users client and its cache.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real server connection.

use chrono::Utc;
use serde_json::{json, Value};
use usersync_client::{ClientError, UsersClient, UsersQuery};
use usersync_engine::{NewUser, User, UserChange};
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user(name: &str) -> User {
    User::new(
        Uuid::new_v4(),
        NewUser::new(name, format!("{}@x.com", name.to_lowercase()))
            .validate()
            .unwrap(),
        Utc::now(),
    )
}

fn ok(data: impl serde::Serialize) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"data": data, "error": null}))
}

fn err(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({"data": null, "error": message}))
}

async fn client_for(server: &MockServer) -> UsersClient {
    UsersClient::new(&server.uri()).unwrap()
}

// =============================================================================
// UsersClient
// =============================================================================

mod users_client {
    use super::*;

    #[tokio::test]
    async fn test_list_users() {
        let server = MockServer::start().await;
        let users = vec![user("Ada"), user("Bob")];

        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ok(&users))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.list_users().await.unwrap(), users);
    }

    #[tokio::test]
    async fn test_create_user_sends_body() {
        let server = MockServer::start().await;
        let ada = user("Ada");

        Mock::given(method("POST"))
            .and(path("/users"))
            .and(body_json(json!({"name": "Ada", "email": "ada@x.com"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": ada,
                "error": null,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.create_user("Ada", "ada@x.com").await.unwrap(), ada);
    }

    #[tokio::test]
    async fn test_error_envelope_is_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(err(400, "Name and email are required"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        match client.create_user("", "").await {
            Err(ClientError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Name and email are required");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_not_found() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();

        Mock::given(method("DELETE"))
            .and(path(format!("/users/{}", id)))
            .respond_with(err(404, "User not found"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let error = client.delete_user(id).await.unwrap_err();
        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "Server error (404): User not found");
    }

    #[tokio::test]
    async fn test_sync_all_result() {
        let server = MockServer::start().await;
        let mut ada = user("Ada");
        ada.synced_at = Some(Utc::now());

        Mock::given(method("POST"))
            .and(path("/users/sync"))
            .respond_with(ok(json!({"synced_count": 1, "synced_users": [ada]})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.sync_all().await.unwrap();
        assert_eq!(result.synced_count, 1);
        assert_eq!(result.synced_users, vec![ada]);
    }

    #[tokio::test]
    async fn test_non_envelope_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        match client.list_users().await {
            Err(ClientError::Api { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(matches!(
            client.list_users().await,
            Err(ClientError::ParseError(_))
        ));
    }
}

// =============================================================================
// UsersQuery
// =============================================================================

mod users_query {
    use super::*;

    #[tokio::test]
    async fn test_reads_are_cached() {
        let server = MockServer::start().await;
        let users = vec![user("Ada")];

        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ok(&users))
            .expect(1)
            .mount(&server)
            .await;

        let mut query = UsersQuery::new(client_for(&server).await);
        assert_eq!(query.users().await.unwrap(), users.as_slice());
        assert_eq!(query.users().await.unwrap(), users.as_slice());
    }

    #[tokio::test]
    async fn test_mutation_triggers_one_refetch() {
        let server = MockServer::start().await;
        let ada = user("Ada");
        let mut synced = ada.clone();
        synced.synced_at = Some(Utc::now());

        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ok(vec![&ada]))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("/users/{}/sync", ada.id)))
            .respond_with(ok(&synced))
            .expect(1)
            .mount(&server)
            .await;

        let mut query = UsersQuery::new(client_for(&server).await);
        query.users().await.unwrap();

        assert_eq!(query.sync_user(ada.id).await.unwrap(), synced);
        assert!(query.cache().needs_fetch());

        query.users().await.unwrap();
        query.users().await.unwrap();
        assert!(!query.cache().needs_fetch());
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_cache() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();

        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ok(Vec::<User>::new()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("/users/{}/unsync", id)))
            .respond_with(err(404, "User not found"))
            .mount(&server)
            .await;

        let mut query = UsersQuery::new(client_for(&server).await);
        query.users().await.unwrap();

        assert!(query.unsync_user(id).await.unwrap_err().is_not_found());
        assert!(!query.cache().needs_fetch());
        query.users().await.unwrap();
    }

    #[tokio::test]
    async fn test_realtime_patch_skips_fetch() {
        let server = MockServer::start().await;
        let ada = user("Ada");
        let bob = user("Bob");

        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ok(vec![&ada]))
            .expect(1)
            .mount(&server)
            .await;

        let mut query = UsersQuery::new(client_for(&server).await);
        query.users().await.unwrap();

        query.apply_change(&UserChange::Insert { user: bob.clone() });
        query.apply_change(&UserChange::Delete { id: ada.id });

        assert_eq!(query.users().await.unwrap(), [bob].as_slice());
    }

    #[tokio::test]
    async fn test_every_mutation_invalidates() {
        let server = MockServer::start().await;
        let ada = user("Ada");
        let empty_result: Value = json!({"synced_count": 0, "synced_users": []});

        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ok(vec![&ada]))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ok(&ada))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path(format!("/users/{}", ada.id)))
            .respond_with(ok(&ada))
            .mount(&server)
            .await;
        for route in ["/users/sync", "/users/unsync"] {
            Mock::given(method("POST"))
                .and(path(route))
                .respond_with(ok(&empty_result))
                .mount(&server)
                .await;
        }

        let mut query = UsersQuery::new(client_for(&server).await);

        query.users().await.unwrap();
        query.create_user("Ada", "ada@x.com").await.unwrap();
        assert!(query.cache().needs_fetch());

        query.users().await.unwrap();
        query.sync_all().await.unwrap();
        assert!(query.cache().needs_fetch());

        query.users().await.unwrap();
        query.unsync_all().await.unwrap();
        assert!(query.cache().needs_fetch());

        query.users().await.unwrap();
        query.delete_user(ada.id).await.unwrap();
        assert!(query.cache().needs_fetch());
    }
}
