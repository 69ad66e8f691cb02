//! Food catalog search and browsing

mod types;

use reqwest::Client;
use std::collections::HashMap;

use crate::error::Error;
use crate::fetch::Fetch;
use crate::session::SessionStore;

pub use types::*;

/// Client for the food catalog
pub struct CatalogClient {
    /// The API base URL (including the path prefix)
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// The session the bearer token is read from
    session: SessionStore,
}

impl CatalogClient {
    /// Create a new CatalogClient
    pub(crate) fn new(url: &str, client: Client, session: SessionStore) -> Self {
        Self {
            url: url.to_string(),
            client,
            session,
        }
    }

    fn foods_url(&self) -> String {
        format!("{}/foods/", self.url)
    }

    /// Search foods by name or brand.
    ///
    /// An empty query is a valid "list everything" request; the API matches
    /// substrings against both the name and the brand.
    pub async fn search(&self, query: &str) -> Result<Vec<FoodItem>, Error> {
        let mut params = HashMap::new();
        params.insert("search".to_string(), query.to_string());

        let foods = Fetch::get(&self.client, &self.foods_url())
            .authenticated(&self.session)?
            .query(params)
            .execute::<Vec<FoodItem>>()
            .await?;

        Ok(foods)
    }

    /// List the entire catalog
    pub async fn list_all(&self) -> Result<Vec<FoodItem>, Error> {
        self.search("").await
    }

    /// Add a custom food to the catalog
    pub async fn create(&self, food: &NewFoodItem) -> Result<FoodItem, Error> {
        let created = Fetch::post(&self.client, &self.foods_url())
            .authenticated(&self.session)?
            .json(food)?
            .execute::<FoodItem>()
            .await?;

        Ok(created)
    }
}
