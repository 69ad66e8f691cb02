//! Calorie Counter Rust Client Library
//!
//! A Rust client library for the Calorie Counter API, covering account
//! registration and sign-in, food catalog search, meal logging with
//! client-side macro totals, and the daily nutrition summary.

pub mod auth;
pub mod catalog;
pub mod compose;
pub mod config;
pub mod error;
pub mod fetch;
pub mod guard;
pub mod meals;
pub mod nutrition;
pub mod session;
pub mod summary;

pub(crate) mod decimal;

use reqwest::Client;

use crate::auth::AuthClient;
use crate::catalog::CatalogClient;
use crate::config::ClientOptions;
use crate::meals::MealsClient;
use crate::session::SessionStore;

/// The main entry point for the Calorie Counter client
pub struct CalorieCounter {
    /// The base URL of the API deployment
    pub url: String,

    /// HTTP client used for requests
    pub http_client: Client,

    /// The session store shared by every sub-client
    pub session: SessionStore,

    /// Client options
    pub options: ClientOptions,
}

impl CalorieCounter {
    /// Create a new client with an in-memory session and default options
    ///
    /// # Example
    ///
    /// ```
    /// use calorie_counter::CalorieCounter;
    ///
    /// let client = CalorieCounter::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: &str) -> Self {
        Self::new_with_options(base_url, SessionStore::in_memory(), ClientOptions::default())
    }

    /// Create a new client over an explicit session store
    ///
    /// # Example
    ///
    /// ```
    /// use calorie_counter::CalorieCounter;
    /// use calorie_counter::session::{FileStorage, SessionStore};
    ///
    /// let store = SessionStore::with_backend(FileStorage::new("session.json"));
    /// let client = CalorieCounter::new_with_store("http://localhost:8000", store);
    /// ```
    pub fn new_with_store(base_url: &str, session: SessionStore) -> Self {
        Self::new_with_options(base_url, session, ClientOptions::default())
    }

    /// Create a new client with custom options
    pub fn new_with_options(base_url: &str, session: SessionStore, options: ClientOptions) -> Self {
        let http_client = match options.request_timeout {
            Some(timeout) => Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            None => Client::new(),
        };

        Self {
            url: base_url.trim_end_matches('/').to_string(),
            http_client,
            session,
            options,
        }
    }

    fn api_url(&self) -> String {
        format!("{}{}", self.url, self.options.api_prefix)
    }

    /// Get the auth client for registration and sign-in
    pub fn auth(&self) -> AuthClient {
        AuthClient::new(
            &self.api_url(),
            self.http_client.clone(),
            self.session.clone(),
            self.options.clone(),
        )
    }

    /// Get the catalog client for food search
    pub fn foods(&self) -> CatalogClient {
        CatalogClient::new(&self.api_url(), self.http_client.clone(), self.session.clone())
    }

    /// Get the meals client for logging and the daily summary
    pub fn meals(&self) -> MealsClient {
        MealsClient::new(&self.api_url(), self.http_client.clone(), self.session.clone())
    }

    /// Get a reference to the shared session store
    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::compose::{ComposeError, MealDraft};
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::guard::{Protected, RouteOutcome};
    pub use crate::nutrition::MacroTotals;
    pub use crate::session::SessionStore;
    pub use crate::CalorieCounter;
}
