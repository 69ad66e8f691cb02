//! Types for meal persistence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The slot of the day a meal belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealCategory {
    #[serde(rename = "desayuno")]
    Breakfast,
    #[serde(rename = "media_manana")]
    MidMorning,
    #[serde(rename = "almuerzo")]
    Lunch,
    #[serde(rename = "merienda")]
    AfternoonSnack,
    #[serde(rename = "cena")]
    Dinner,
    #[serde(rename = "snack")]
    Snack,
}

impl MealCategory {
    /// Every category, in day order
    pub const ALL: [MealCategory; 6] = [
        MealCategory::Breakfast,
        MealCategory::MidMorning,
        MealCategory::Lunch,
        MealCategory::AfternoonSnack,
        MealCategory::Dinner,
        MealCategory::Snack,
    ];

    /// The wire value the API uses
    pub fn as_str(&self) -> &'static str {
        match self {
            MealCategory::Breakfast => "desayuno",
            MealCategory::MidMorning => "media_manana",
            MealCategory::Lunch => "almuerzo",
            MealCategory::AfternoonSnack => "merienda",
            MealCategory::Dinner => "cena",
            MealCategory::Snack => "snack",
        }
    }

    /// The display label
    pub fn label(&self) -> &'static str {
        match self {
            MealCategory::Breakfast => "Desayuno",
            MealCategory::MidMorning => "Media Mañana",
            MealCategory::Lunch => "Almuerzo",
            MealCategory::AfternoonSnack => "Merienda",
            MealCategory::Dinner => "Cena",
            MealCategory::Snack => "Snack",
        }
    }
}

impl Default for MealCategory {
    fn default() -> Self {
        MealCategory::Breakfast
    }
}

impl std::fmt::Display for MealCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One food entry inside a saved meal, as returned by the API.
///
/// The serializer denormalizes the food's name, brand and portion unit so
/// a meal can be displayed without extra catalog lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealEntry {
    /// The entry id
    pub id: i64,

    /// The referenced food id
    pub food_item: i64,

    /// The food name at save time
    #[serde(default)]
    pub food_item_name: String,

    /// The food brand at save time
    #[serde(default)]
    pub food_item_brand: Option<String>,

    /// The unit the quantity is measured in
    #[serde(default)]
    pub food_item_portion_unit: String,

    /// The consumed quantity
    #[serde(deserialize_with = "crate::decimal::deserialize")]
    pub quantity: f64,

    /// Calories computed by the backend for this entry
    #[serde(deserialize_with = "crate::decimal::deserialize")]
    pub calculated_calories: f64,

    /// Proteins computed by the backend for this entry
    #[serde(deserialize_with = "crate::decimal::deserialize")]
    pub calculated_proteins: f64,

    /// Fats computed by the backend for this entry
    #[serde(deserialize_with = "crate::decimal::deserialize")]
    pub calculated_fats: f64,

    /// Carbohydrates computed by the backend for this entry
    #[serde(deserialize_with = "crate::decimal::deserialize")]
    pub calculated_carbs: f64,
}

/// A saved meal with its backend-computed totals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    /// The meal id
    pub id: i64,

    /// The calendar day the meal belongs to
    pub date: NaiveDate,

    /// The slot of the day
    pub meal_type: MealCategory,

    /// Total calories across all entries (kcal)
    #[serde(deserialize_with = "crate::decimal::deserialize")]
    pub total_calories: f64,

    /// Total proteins across all entries (g)
    #[serde(deserialize_with = "crate::decimal::deserialize")]
    pub total_proteins: f64,

    /// Total fats across all entries (g)
    #[serde(deserialize_with = "crate::decimal::deserialize")]
    pub total_fats: f64,

    /// Total carbohydrates across all entries (g)
    #[serde(deserialize_with = "crate::decimal::deserialize")]
    pub total_carbs: f64,

    /// The saved entries
    #[serde(default)]
    pub meal_food_items: Vec<MealEntry>,
}

/// One food reference in a create-meal payload
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewMealItem {
    /// The food id
    pub food_item: i64,

    /// The consumed quantity, in the food's portion unit
    pub quantity: f64,
}

/// Payload for creating a meal.
///
/// Only food references and quantities are sent; the backend is the sole
/// authority for the persisted nutrient totals.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewMeal {
    /// The calendar day
    pub date: NaiveDate,

    /// The slot of the day
    pub meal_type: MealCategory,

    /// The foods making up the meal
    pub meal_food_items: Vec<NewMealItem>,
}
