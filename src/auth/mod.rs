//! Authentication and account management

mod types;

use reqwest::Client;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::session::{Session, SessionStore};

pub use types::*;

/// Client for authentication against the Calorie Counter API
pub struct AuthClient {
    /// The API base URL (including the path prefix)
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// The session store written on sign-in and cleared on sign-out
    session: SessionStore,

    /// Client options
    options: ClientOptions,
}

impl AuthClient {
    /// Create a new AuthClient
    pub(crate) fn new(
        url: &str,
        client: Client,
        session: SessionStore,
        options: ClientOptions,
    ) -> Self {
        Self {
            url: url.to_string(),
            client,
            session,
            options,
        }
    }

    /// Sign in with username and password.
    ///
    /// On success the issued token pair is kept in the session store
    /// (unless session persistence is disabled) and returned.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<TokenPair, Error> {
        let url = format!("{}/token/", self.url);

        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };

        let result = Fetch::post(&self.client, &url)
            .json(&credentials)?
            .execute::<TokenPair>()
            .await;

        let tokens = match result {
            Ok(tokens) => tokens,
            // a 401 here is a credential failure, not an expired session
            Err(Error::Unauthorized) => {
                return Err(Error::auth("invalid username or password"));
            }
            Err(err) => return Err(err),
        };

        if self.options.persist_session {
            self.session.set(Session {
                access_token: tokens.access.clone(),
                refresh_token: tokens.refresh.clone(),
                username: username.to_string(),
            });
        }

        Ok(tokens)
    }

    /// Register a new account.
    ///
    /// Mismatched passwords are rejected before any request is sent.
    /// Field-level validation errors from the API come back flattened
    /// into a single message. The created account is returned together
    /// with its token pair; the session store is left untouched, matching
    /// the sign-in-after-registering flow.
    pub async fn register(&self, account: &NewAccount) -> Result<RegisteredAccount, Error> {
        if account.password != account.password2 {
            return Err(Error::validation("the two passwords do not match"));
        }

        let url = format!("{}/register/", self.url);

        let created = Fetch::post(&self.client, &url)
            .json(account)?
            .execute::<RegisteredAccount>()
            .await?;

        Ok(created)
    }

    /// Sign out: drop the stored session. Idempotent; the API keeps no
    /// server-side session state for this client.
    pub fn sign_out(&self) {
        self.session.clear();
    }

    /// Get the current session
    pub fn session(&self) -> Option<Session> {
        self.session.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, store: SessionStore) -> AuthClient {
        AuthClient::new(
            &format!("{}/api", server.uri()),
            Client::new(),
            store,
            ClientOptions::default(),
        )
    }

    #[test]
    fn test_sign_in_stores_session() {
        tokio_test::block_on(async {
            let server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/api/token/"))
                .and(body_json(serde_json::json!({
                    "username": "maria",
                    "password": "hunter2",
                })))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "access": "test_access",
                    "refresh": "test_refresh",
                })))
                .mount(&server)
                .await;

            let store = SessionStore::in_memory();
            let auth = client_for(&server, store.clone());

            let tokens = auth.sign_in("maria", "hunter2").await.unwrap();
            assert_eq!(tokens.access, "test_access");

            let session = store.get().unwrap();
            assert_eq!(session.access_token, "test_access");
            assert_eq!(session.refresh_token, "test_refresh");
            assert_eq!(session.username, "maria");
        });
    }

    #[test]
    fn test_sign_in_rejects_bad_credentials() {
        tokio_test::block_on(async {
            let server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/api/token/"))
                .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                    "detail": "No active account found with the given credentials"
                })))
                .mount(&server)
                .await;

            let store = SessionStore::in_memory();
            let auth = client_for(&server, store.clone());

            let result = auth.sign_in("maria", "wrong").await;
            assert!(matches!(result, Err(Error::Auth(_))));
            assert!(!store.is_signed_in());
        });
    }

    #[tokio::test]
    async fn test_register_checks_passwords_locally() {
        // no mock mounted: a request reaching the server would 404 and the
        // test would fail with an API error instead of a validation error
        let server = MockServer::start().await;
        let auth = client_for(&server, SessionStore::in_memory());

        let result = auth
            .register(&NewAccount {
                username: "maria".to_string(),
                email: "maria@example.com".to_string(),
                password: "hunter2".to_string(),
                password2: "hunter3".to_string(),
            })
            .await;

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(server.received_requests().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_register_flattens_field_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/register/"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "username": ["A user with that username already exists."],
            })))
            .mount(&server)
            .await;

        let auth = client_for(&server, SessionStore::in_memory());

        let result = auth
            .register(&NewAccount {
                username: "maria".to_string(),
                email: "maria@example.com".to_string(),
                password: "hunter2".to_string(),
                password2: "hunter2".to_string(),
            })
            .await;

        match result {
            Err(Error::Validation(message)) => {
                assert!(message.contains("already exists"));
            }
            other => panic!("expected validation error, got {:?}", other.map(|r| r.user.id)),
        }
    }

    #[tokio::test]
    async fn test_register_returns_account_and_tokens() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/register/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "user": {"id": 12, "username": "maria", "email": "maria@example.com"},
                "access": "fresh_access",
                "refresh": "fresh_refresh",
            })))
            .mount(&server)
            .await;

        let store = SessionStore::in_memory();
        let auth = client_for(&server, store.clone());

        let created = auth
            .register(&NewAccount {
                username: "maria".to_string(),
                email: "maria@example.com".to_string(),
                password: "hunter2".to_string(),
                password2: "hunter2".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(created.user.username, "maria");
        assert_eq!(created.access, "fresh_access");
        // registering does not sign the user in
        assert!(!store.is_signed_in());
    }

    #[tokio::test]
    async fn test_sign_out_clears_session() {
        let server = MockServer::start().await;
        let store = SessionStore::in_memory();
        store.set(Session {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            username: "maria".to_string(),
        });

        let auth = client_for(&server, store.clone());
        auth.sign_out();
        assert!(!store.is_signed_in());

        // signing out twice is fine
        auth.sign_out();
        assert!(!store.is_signed_in());
    }
}
