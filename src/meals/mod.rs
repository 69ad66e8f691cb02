//! Meal persistence and the daily summary fetch

mod types;

use chrono::NaiveDate;
use reqwest::Client;
use std::collections::HashMap;

use crate::error::Error;
use crate::fetch::Fetch;
use crate::session::SessionStore;
use crate::summary::DailySummary;

pub use types::*;

/// Client for saved meals
pub struct MealsClient {
    /// The API base URL (including the path prefix)
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// The session the bearer token is read from
    session: SessionStore,
}

impl MealsClient {
    /// Create a new MealsClient
    pub(crate) fn new(url: &str, client: Client, session: SessionStore) -> Self {
        Self {
            url: url.to_string(),
            client,
            session,
        }
    }

    fn meals_url(&self) -> String {
        format!("{}/meals/", self.url)
    }

    fn meal_url(&self, id: i64) -> String {
        format!("{}/meals/{}", self.url, id)
    }

    /// List the authenticated user's meals, newest first.
    ///
    /// With a date filter the request asks the API for that day only.
    pub async fn list(&self, filter: Option<NaiveDate>) -> Result<Vec<Meal>, Error> {
        let mut request = Fetch::get(&self.client, &self.meals_url()).authenticated(&self.session)?;

        if let Some(date) = filter {
            let mut params = HashMap::new();
            params.insert("date".to_string(), date.format("%Y-%m-%d").to_string());
            request = request.query(params);
        }

        let meals = request.execute::<Vec<Meal>>().await?;
        Ok(meals)
    }

    /// Create a meal. The backend recomputes and persists the
    /// authoritative nutrient totals and returns the stored meal.
    pub async fn create(&self, meal: &NewMeal) -> Result<Meal, Error> {
        let created = Fetch::post(&self.client, &self.meals_url())
            .authenticated(&self.session)?
            .json(meal)?
            .execute::<Meal>()
            .await?;

        Ok(created)
    }

    /// Fetch one meal by id
    pub async fn get(&self, id: i64) -> Result<Meal, Error> {
        let meal = Fetch::get(&self.client, &self.meal_url(id))
            .authenticated(&self.session)?
            .execute::<Meal>()
            .await?;

        Ok(meal)
    }

    /// Delete one meal by id
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        Fetch::delete(&self.client, &self.meal_url(id))
            .authenticated(&self.session)?
            .execute_empty()
            .await
    }

    /// Fetch the meals for one day and derive its nutrition summary
    pub async fn daily_summary(&self, date: NaiveDate) -> Result<DailySummary, Error> {
        let meals = self.list(Some(date)).await?;
        Ok(DailySummary::from_meals(date, meals))
    }
}
