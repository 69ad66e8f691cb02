//! In-progress meal composition
//!
//! A [`MealDraft`] is the page-scoped state behind the meal logger: the
//! selected day and category, the line items assembled so far, the food
//! picked from the search results, and the search sub-state itself. It owns
//! no I/O; the caller runs the actual catalog fetches and feeds results
//! back in, keyed by the ticket issued for each search.

use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::catalog::FoodItem;
use crate::meals::{MealCategory, NewMeal, NewMealItem};
use crate::nutrition::{aggregate, line_totals, MacroTotals};
use crate::summary::clamp_to_today;

/// Queries shorter than this never go out; they reset the search instead
pub const MIN_SEARCH_LEN: usize = 3;

/// Local guard failures, raised before any network call
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeError {
    /// No food has been selected from the search results
    #[error("no food selected to add")]
    NoCandidate,

    /// The requested quantity is not a positive number
    #[error("quantity must be greater than zero")]
    InvalidQuantity,

    /// The food is already part of the meal
    #[error("this food is already in the meal; edit its quantity instead")]
    DuplicateFood,

    /// The meal has no line items to save
    #[error("a meal needs at least one food item")]
    EmptyMeal,
}

/// One food entry in the draft, with its derived macros
#[derive(Debug, Clone, PartialEq)]
pub struct MealLineItem {
    /// The referenced food
    pub food: FoodItem,

    /// The requested quantity, in the food's portion unit
    pub quantity: f64,

    /// Macros for this quantity, recomputed on every edit
    pub macros: MacroTotals,
}

/// The food selected from the search results, pending a quantity
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// The selected food
    pub food: FoodItem,

    /// The quantity to add, defaulting to one portion
    pub quantity: f64,
}

/// Identifies one search invocation.
///
/// Responses are only accepted for the most recently issued ticket, so a
/// slow response to an old query can never overwrite newer results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

#[derive(Debug, Default)]
struct SearchState {
    query: String,
    results: Vec<FoodItem>,
    latest: u64,
    in_flight: bool,
    error: Option<String>,
}

/// State machine for composing one meal
#[derive(Debug)]
pub struct MealDraft {
    date: NaiveDate,
    category: MealCategory,
    items: Vec<MealLineItem>,
    candidate: Option<Candidate>,
    search: SearchState,
}

impl MealDraft {
    /// Create an empty draft for today's breakfast
    pub fn new() -> Self {
        Self {
            date: Local::now().date_naive(),
            category: MealCategory::default(),
            items: Vec::new(),
            candidate: None,
            search: SearchState::default(),
        }
    }

    /// The selected day
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Select a day. Future dates are clamped to today.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = clamp_to_today(date, Local::now().date_naive());
    }

    /// The selected meal category
    pub fn category(&self) -> MealCategory {
        self.category
    }

    /// Select a meal category
    pub fn set_category(&mut self, category: MealCategory) {
        self.category = category;
    }

    /// Record a new search query.
    ///
    /// Returns the ticket the caller should attach to its catalog fetch.
    /// Queries below [`MIN_SEARCH_LEN`] reset the search instead and return
    /// `None`: no request should go out. Any previously issued ticket is
    /// invalidated either way.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
        self.search.latest += 1;
        self.search.query = query.to_string();
        self.search.results.clear();
        self.search.error = None;
        self.candidate = None;

        if query.chars().count() < MIN_SEARCH_LEN {
            self.search.in_flight = false;
            return None;
        }

        self.search.in_flight = true;
        Some(SearchTicket(self.search.latest))
    }

    /// Feed search results back in. Returns `false` when the ticket is
    /// stale and the results were discarded.
    pub fn apply_search_results(&mut self, ticket: SearchTicket, results: Vec<FoodItem>) -> bool {
        if !self.accepts(ticket) {
            return false;
        }

        self.search.in_flight = false;
        self.search.error = if results.is_empty() {
            Some("no foods matched the search".to_string())
        } else {
            None
        };
        self.search.results = results;
        true
    }

    /// Record a failed search. Returns `false` when the ticket is stale
    /// and the failure was discarded.
    pub fn fail_search(&mut self, ticket: SearchTicket, message: &str) -> bool {
        if !self.accepts(ticket) {
            return false;
        }

        self.search.in_flight = false;
        self.search.results.clear();
        self.search.error = Some(message.to_string());
        true
    }

    fn accepts(&self, ticket: SearchTicket) -> bool {
        self.search.in_flight && ticket.0 == self.search.latest
    }

    /// The current search query
    pub fn query(&self) -> &str {
        &self.search.query
    }

    /// The current search results
    pub fn search_results(&self) -> &[FoodItem] {
        &self.search.results
    }

    /// Whether a search response is still pending
    pub fn is_searching(&self) -> bool {
        self.search.in_flight
    }

    /// The current search or validation message, if any
    pub fn search_error(&self) -> Option<&str> {
        self.search.error.as_deref()
    }

    /// Pick a food from the search results. The quantity defaults to one
    /// portion; the query and results are cleared.
    pub fn select_candidate(&mut self, food: FoodItem) {
        let quantity = food.portion_size_g;
        self.candidate = Some(Candidate { food, quantity });
        self.search.query.clear();
        self.search.results.clear();
        self.search.error = None;
        self.search.in_flight = false;
    }

    /// The pending candidate, if any
    pub fn candidate(&self) -> Option<&Candidate> {
        self.candidate.as_ref()
    }

    /// Change the pending candidate's quantity
    pub fn set_candidate_quantity(&mut self, quantity: f64) {
        if let Some(candidate) = &mut self.candidate {
            candidate.quantity = quantity;
        }
    }

    /// Drop the pending candidate
    pub fn cancel_candidate(&mut self) {
        self.candidate = None;
        self.search.error = None;
    }

    /// Move the pending candidate into the meal.
    ///
    /// Rejects a non-positive quantity and a food already present in the
    /// meal; in both cases the candidate stays selected so the input can
    /// be corrected. On success the new line item carries freshly computed
    /// macros and the draft is ready for the next search.
    pub fn add_candidate_to_meal(&mut self) -> Result<(), ComposeError> {
        let candidate = self.candidate.as_ref().ok_or(ComposeError::NoCandidate)?;

        if !candidate.quantity.is_finite() || candidate.quantity <= 0.0 {
            return Err(ComposeError::InvalidQuantity);
        }

        if self.items.iter().any(|item| item.food.id == candidate.food.id) {
            return Err(ComposeError::DuplicateFood);
        }

        if let Some(Candidate { food, quantity }) = self.candidate.take() {
            let macros = line_totals(&food, quantity);
            self.items.push(MealLineItem {
                food,
                quantity,
                macros,
            });
        }
        self.search.error = None;
        Ok(())
    }

    /// Change a line item's quantity and recompute its macros.
    /// Non-positive or non-finite edits are ignored.
    pub fn update_quantity(&mut self, food_id: i64, quantity: f64) {
        if !quantity.is_finite() || quantity <= 0.0 {
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.food.id == food_id) {
            item.quantity = quantity;
            item.macros = line_totals(&item.food, quantity);
        }
    }

    /// Remove a line item by food id
    pub fn remove_item(&mut self, food_id: i64) {
        self.items.retain(|item| item.food.id != food_id);
    }

    /// The assembled line items
    pub fn items(&self) -> &[MealLineItem] {
        &self.items
    }

    /// The meal totals over the assembled line items
    pub fn totals(&self) -> MacroTotals {
        aggregate(self.items.iter().map(|item| item.macros))
    }

    /// Build the create-meal payload.
    ///
    /// Refuses an empty meal before any request is made. The payload only
    /// references foods and quantities; the backend recomputes the
    /// authoritative totals.
    pub fn save_payload(&self) -> Result<NewMeal, ComposeError> {
        if self.items.is_empty() {
            return Err(ComposeError::EmptyMeal);
        }

        Ok(NewMeal {
            date: self.date,
            meal_type: self.category,
            meal_food_items: self
                .items
                .iter()
                .map(|item| NewMealItem {
                    food_item: item.food.id,
                    quantity: item.quantity,
                })
                .collect(),
        })
    }

    /// Reset the draft after a successful save. The date and category are
    /// kept so another meal can be logged for the same slot of the day.
    pub fn clear_after_save(&mut self) {
        self.items.clear();
        self.candidate = None;
        self.search = SearchState {
            latest: self.search.latest,
            ..SearchState::default()
        };
    }
}

impl Default for MealDraft {
    fn default() -> Self {
        Self::new()
    }
}
