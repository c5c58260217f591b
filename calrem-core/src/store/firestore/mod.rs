//! Cloud Firestore backend over the REST API.
//!
//! Reminders live in the `reminders` collection with store-assigned ids.
//! Users live in `users`, keyed by username.

mod document;
mod structured_query;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use self::document::{Document, REMINDER_UPDATE_MASK, RunQueryItem};
use super::{ReminderQuery, ReminderStore, UserStore};
use crate::error::{CalRemError, CalRemResult};
use crate::reminder::{Reminder, ReminderDraft};
use crate::user::User;

const DEFAULT_ENDPOINT: &str = "https://firestore.googleapis.com";
const REMINDERS: &str = "reminders";
const USERS: &str = "users";

fn default_database() -> String {
    "(default)".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirestoreConfig {
    pub project_id: String,

    #[serde(default = "default_database")]
    pub database: String,

    /// Web API key, sent as the `key` query parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// OAuth access token, sent as a bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Override for the API host, e.g. `http://localhost:8080` for the emulator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

pub struct FirestoreStore {
    client: Client,
    config: FirestoreConfig,
    database_url: Url,
}

impl FirestoreStore {
    pub fn new(config: FirestoreConfig) -> CalRemResult<Self> {
        if config.project_id.trim().is_empty() {
            return Err(CalRemError::Config(
                "store.project_id is required for the firestore backend".into(),
            ));
        }

        let endpoint = config.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        let mut database_url = Url::parse(endpoint)
            .map_err(|e| CalRemError::Config(format!("Invalid endpoint '{}': {}", endpoint, e)))?;
        database_url
            .path_segments_mut()
            .map_err(|_| CalRemError::Config(format!("Invalid endpoint '{}'", endpoint)))?
            .pop_if_empty()
            .extend([
                "v1",
                "projects",
                config.project_id.as_str(),
                "databases",
                config.database.as_str(),
            ]);

        Ok(FirestoreStore {
            client: Client::new(),
            config,
            database_url,
        })
    }

    /// `…/databases/{db}/{segments…}`
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.database_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url
    }

    fn document_url(&self, collection: &str, id: &str) -> Url {
        self.url(&["documents", collection, id])
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut builder = self.client.request(method, url);
        if let Some(key) = &self.config.api_key {
            builder = builder.query(&[("key", key)]);
        }
        if let Some(token) = &self.config.access_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn run_query(&self, query: &ReminderQuery) -> CalRemResult<Vec<Reminder>> {
        let body = structured_query::run_query_body(REMINDERS, query);
        let response = self
            .request(Method::POST, self.url(&["documents:runQuery"]))
            .json(&body)
            .send()
            .await?;
        let items: Vec<RunQueryItem> = check(response).await?.json().await?;

        // documents are schemaless; one that doesn't decode is skipped, not fatal
        let reminders = items
            .iter()
            .filter_map(|item| item.document.as_ref())
            .filter_map(|document| match document.to_reminder() {
                Ok(reminder) => Some(reminder),
                Err(error) => {
                    let name = document.name.as_deref().unwrap_or("<unnamed>");
                    tracing::warn!(name, %error, "skipping undecodable reminder document");
                    None
                }
            })
            .filter(|reminder| query.matches(reminder))
            .collect();
        Ok(reminders)
    }
}

/// Turn a non-success response into a store error carrying Firestore's message.
async fn check(response: Response) -> CalRemResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(%status, "firestore request failed");
    Err(CalRemError::Store(format!("Firestore returned {}: {}", status, body.trim())))
}

#[async_trait]
impl ReminderStore for FirestoreStore {
    async fn insert(&self, reminder: &Reminder) -> CalRemResult<Reminder> {
        let response = self
            .request(Method::POST, self.url(&["documents", REMINDERS]))
            .json(&Document::from_reminder(reminder))
            .send()
            .await?;
        let created: Document = check(response).await?.json().await?;

        let mut saved = reminder.clone();
        saved.id = created.id().map(str::to_string);
        Ok(saved)
    }

    async fn find(&self, query: &ReminderQuery) -> CalRemResult<Vec<Reminder>> {
        self.run_query(query).await
    }

    async fn update(&self, id: &str, draft: &ReminderDraft) -> CalRemResult<()> {
        let mut params: Vec<(&str, &str)> = REMINDER_UPDATE_MASK
            .iter()
            .map(|field| ("updateMask.fieldPaths", *field))
            .collect();
        params.push(("currentDocument.exists", "true"));

        let response = self
            .request(Method::PATCH, self.document_url(REMINDERS, id))
            .query(&params)
            .json(&Document::from_draft(draft))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CalRemError::ReminderNotFound(id.to_string()));
        }
        check(response).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> CalRemResult<()> {
        let response = self
            .request(Method::DELETE, self.document_url(REMINDERS, id))
            .query(&[("currentDocument.exists", "true")])
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CalRemError::ReminderNotFound(id.to_string()));
        }
        check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for FirestoreStore {
    async fn get_user(&self, username: &str) -> CalRemResult<Option<User>> {
        let response = self
            .request(Method::GET, self.document_url(USERS, username))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let document: Document = check(response).await?.json().await?;
        document.to_user().map(Some)
    }

    async fn put_user(&self, user: &User) -> CalRemResult<()> {
        let response = self
            .request(Method::PATCH, self.document_url(USERS, &user.username))
            .json(&Document::from_user(user))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FirestoreConfig {
        FirestoreConfig {
            project_id: "demo-calrem".into(),
            database: default_database(),
            api_key: None,
            access_token: None,
            endpoint: None,
        }
    }

    #[test]
    fn builds_document_urls() {
        let store = FirestoreStore::new(config()).unwrap();
        assert_eq!(
            store.document_url(REMINDERS, "abc").as_str(),
            "https://firestore.googleapis.com/v1/projects/demo-calrem/databases/(default)/documents/reminders/abc"
        );
        assert_eq!(
            store.url(&["documents:runQuery"]).as_str(),
            "https://firestore.googleapis.com/v1/projects/demo-calrem/databases/(default)/documents:runQuery"
        );
    }

    #[test]
    fn usernames_are_escaped_in_paths() {
        let store = FirestoreStore::new(config()).unwrap();
        let url = store.document_url(USERS, "a/b c");
        assert!(url.as_str().ends_with("/documents/users/a%2Fb%20c"));
    }

    #[test]
    fn endpoint_override_for_emulator() {
        let store = FirestoreStore::new(FirestoreConfig {
            endpoint: Some("http://localhost:8080/".into()),
            ..config()
        })
        .unwrap();
        assert_eq!(
            store.url(&["documents", USERS]).as_str(),
            "http://localhost:8080/v1/projects/demo-calrem/databases/(default)/documents/users"
        );
    }

    #[test]
    fn project_id_is_required() {
        let result = FirestoreStore::new(FirestoreConfig {
            project_id: " ".into(),
            ..config()
        });
        assert!(matches!(result, Err(CalRemError::Config(_))));
    }

    mod http {
        use chrono::NaiveDate;
        use serde_json::json;
        use wiremock::matchers::{body_partial_json, header, method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        use super::super::*;
        use super::config;
        use crate::reminder::{ReminderKey, ReminderTime};

        const DOCUMENTS: &str = "/v1/projects/demo-calrem/databases/(default)/documents";

        fn store(server: &MockServer) -> FirestoreStore {
            FirestoreStore::new(FirestoreConfig {
                endpoint: Some(server.uri()),
                ..config()
            })
            .unwrap()
        }

        fn reminder_document(id: &str, time: &str) -> serde_json::Value {
            json!({
                "document": {
                    "name": format!("projects/demo-calrem/databases/(default)/documents/reminders/{id}"),
                    "fields": {
                        "username": { "stringValue": "alice" },
                        "date": { "stringValue": "2025-12-01" },
                        "time": { "stringValue": time },
                        "title": { "stringValue": "Dentist" }
                    }
                },
                "readTime": "2025-11-21T08:00:00.000000Z"
            })
        }

        fn dentist_key(time: &str) -> ReminderKey {
            ReminderKey {
                username: "alice".into(),
                date: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
                time: ReminderTime::parse(time).unwrap(),
                title: "Dentist".into(),
            }
        }

        #[tokio::test]
        async fn undecodable_documents_are_skipped() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path(format!("{DOCUMENTS}:runQuery")))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                    reminder_document("good", "9:30 AM"),
                    reminder_document("bad", ""),
                ])))
                .mount(&server)
                .await;

            let reminders = store(&server).upcoming_reminders("alice", None).await.unwrap();
            assert_eq!(reminders.len(), 1);
            assert_eq!(reminders[0].id.as_deref(), Some("good"));
        }

        #[tokio::test]
        async fn key_lookup_matches_differently_spelled_times() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path(format!("{DOCUMENTS}:runQuery")))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                    reminder_document("padded", "09:30 AM"),
                    reminder_document("later", "10:00 AM"),
                ])))
                .mount(&server)
                .await;
            Mock::given(method("DELETE"))
                .and(path(format!("{DOCUMENTS}/reminders/padded")))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
                .expect(1)
                .mount(&server)
                .await;

            let deleted = store(&server).delete_by_key(&dentist_key("9:30 AM")).await.unwrap();
            assert_eq!(deleted, 1);
        }

        #[tokio::test]
        async fn insert_takes_id_from_document_name() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path(format!("{DOCUMENTS}/reminders")))
                .and(body_partial_json(json!({
                    "fields": {
                        "username": { "stringValue": "alice" },
                        "time": { "stringValue": "9:30 AM" }
                    }
                })))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "name": "projects/demo-calrem/databases/(default)/documents/reminders/new123",
                    "fields": {}
                })))
                .expect(1)
                .mount(&server)
                .await;

            let draft = ReminderDraft::new(
                NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
                ReminderTime::parse("9:30 AM").unwrap(),
                "Dentist",
                "",
            )
            .unwrap();
            let saved = store(&server).add_reminder("alice", draft).await.unwrap();
            assert_eq!(saved.id.as_deref(), Some("new123"));
            assert_eq!(saved.title, "Dentist");
        }

        #[tokio::test]
        async fn update_sends_mask_and_maps_missing_document() {
            let server = MockServer::start().await;
            Mock::given(method("PATCH"))
                .and(path(format!("{DOCUMENTS}/reminders/abc")))
                .and(query_param("updateMask.fieldPaths", "title"))
                .and(query_param("currentDocument.exists", "true"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
                .expect(1)
                .mount(&server)
                .await;
            Mock::given(method("PATCH"))
                .and(path(format!("{DOCUMENTS}/reminders/gone")))
                .respond_with(ResponseTemplate::new(404))
                .mount(&server)
                .await;

            let store = store(&server);
            let draft = ReminderDraft::new(
                NaiveDate::from_ymd_opt(2025, 12, 2).unwrap(),
                ReminderTime::parse("10:00 AM").unwrap(),
                "Dentist",
                "",
            )
            .unwrap();
            store.update_reminder("abc", &draft).await.unwrap();
            assert!(matches!(
                store.update_reminder("gone", &draft).await,
                Err(CalRemError::ReminderNotFound(id)) if id == "gone"
            ));
        }

        #[tokio::test]
        async fn delete_maps_missing_document() {
            let server = MockServer::start().await;
            Mock::given(method("DELETE"))
                .and(path(format!("{DOCUMENTS}/reminders/abc")))
                .and(query_param("currentDocument.exists", "true"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
                .expect(1)
                .mount(&server)
                .await;
            Mock::given(method("DELETE"))
                .and(path(format!("{DOCUMENTS}/reminders/gone")))
                .respond_with(ResponseTemplate::new(404))
                .mount(&server)
                .await;

            let store = store(&server);
            store.delete_reminder("abc").await.unwrap();
            assert!(matches!(
                store.delete_reminder("gone").await,
                Err(CalRemError::ReminderNotFound(_))
            ));
        }

        #[tokio::test]
        async fn get_user_is_none_when_missing() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path(format!("{DOCUMENTS}/users/alice")))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "name": "projects/demo-calrem/databases/(default)/documents/users/alice",
                    "fields": {
                        "username": { "stringValue": "alice" },
                        "password": { "stringValue": "s3cret" }
                    }
                })))
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path(format!("{DOCUMENTS}/users/bob")))
                .respond_with(ResponseTemplate::new(404))
                .mount(&server)
                .await;

            let store = store(&server);
            assert_eq!(
                store.get_user("alice").await.unwrap(),
                Some(User::new("alice", "s3cret"))
            );
            assert_eq!(store.get_user("bob").await.unwrap(), None);
        }

        #[tokio::test]
        async fn put_user_writes_document_keyed_by_username() {
            let server = MockServer::start().await;
            Mock::given(method("PATCH"))
                .and(path(format!("{DOCUMENTS}/users/alice")))
                .and(body_partial_json(json!({
                    "fields": {
                        "username": { "stringValue": "alice" },
                        "password": { "stringValue": "s3cret" }
                    }
                })))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
                .expect(1)
                .mount(&server)
                .await;

            store(&server)
                .put_user(&User::new("alice", "s3cret"))
                .await
                .unwrap();
        }

        #[tokio::test]
        async fn sends_api_key_and_bearer_token() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path(format!("{DOCUMENTS}/users/alice")))
                .and(query_param("key", "web-key"))
                .and(header("authorization", "Bearer token-123"))
                .respond_with(ResponseTemplate::new(404))
                .expect(1)
                .mount(&server)
                .await;

            let store = FirestoreStore::new(FirestoreConfig {
                endpoint: Some(server.uri()),
                api_key: Some("web-key".into()),
                access_token: Some("token-123".into()),
                ..config()
            })
            .unwrap();
            assert_eq!(store.get_user("alice").await.unwrap(), None);
        }

        #[tokio::test]
        async fn error_responses_carry_status_and_body() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path(format!("{DOCUMENTS}:runQuery")))
                .respond_with(ResponseTemplate::new(403).set_body_string("PERMISSION_DENIED\n"))
                .mount(&server)
                .await;

            match store(&server).upcoming_reminders("alice", None).await {
                Err(CalRemError::Store(message)) => {
                    assert!(message.contains("403"), "{message}");
                    assert!(message.ends_with("PERMISSION_DENIED"), "{message}");
                }
                other => panic!("expected a store error, got {other:?}"),
            }
        }
    }
}
