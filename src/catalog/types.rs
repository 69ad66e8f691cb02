//! Types for the food catalog

use serde::{Deserialize, Serialize};

/// A food record from the catalog.
///
/// Nutrient values are given for one reference portion of
/// `portion_size_g` in `portion_unit`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodItem {
    /// The food id
    pub id: i64,

    /// The food name
    pub name: String,

    /// The brand, if any
    #[serde(default)]
    pub brand: Option<String>,

    /// The reference portion size. Always positive for catalog records.
    #[serde(deserialize_with = "crate::decimal::deserialize")]
    pub portion_size_g: f64,

    /// The unit the portion (and any requested quantity) is measured in
    pub portion_unit: String,

    /// Calories per portion (kcal)
    #[serde(deserialize_with = "crate::decimal::deserialize")]
    pub calories: f64,

    /// Proteins per portion (g)
    #[serde(deserialize_with = "crate::decimal::deserialize")]
    pub proteins: f64,

    /// Fats per portion (g)
    #[serde(deserialize_with = "crate::decimal::deserialize")]
    pub fats: f64,

    /// Carbohydrates per portion (g)
    #[serde(deserialize_with = "crate::decimal::deserialize")]
    pub carbs: f64,

    /// Sugars per portion (g)
    #[serde(default, deserialize_with = "crate::decimal::deserialize_opt")]
    pub sugars: Option<f64>,

    /// Fiber per portion (g)
    #[serde(default, deserialize_with = "crate::decimal::deserialize_opt")]
    pub fiber: Option<f64>,

    /// Sodium per portion (mg)
    #[serde(default, deserialize_with = "crate::decimal::deserialize_opt")]
    pub sodium: Option<f64>,
}

impl FoodItem {
    /// Display name with the brand in parentheses when present
    pub fn display_name(&self) -> String {
        match &self.brand {
            Some(brand) => format!("{} ({})", self.name, brand),
            None => self.name.clone(),
        }
    }
}

/// Payload for adding a custom food to the catalog
#[derive(Debug, Clone, Serialize)]
pub struct NewFoodItem {
    /// The food name
    pub name: String,

    /// The brand, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// The reference portion size
    pub portion_size_g: f64,

    /// The unit the portion is measured in
    pub portion_unit: String,

    /// Calories per portion (kcal)
    pub calories: f64,

    /// Proteins per portion (g)
    pub proteins: f64,

    /// Fats per portion (g)
    pub fats: f64,

    /// Carbohydrates per portion (g)
    pub carbs: f64,

    /// Sugars per portion (g)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sugars: Option<f64>,

    /// Fiber per portion (g)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,

    /// Sodium per portion (mg)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
}
