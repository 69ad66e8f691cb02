//! Macro arithmetic for food portions
//!
//! Every food in the catalog carries nutrient values for one reference
//! portion. Eating a different quantity scales each nutrient linearly by
//! `quantity / portion_size`. Values are rounded to two decimals, which is
//! what the API stores and the UI displays.

use crate::catalog::FoodItem;

/// The four tracked macros
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MacroTotals {
    /// Calories (kcal)
    pub calories: f64,

    /// Proteins (g)
    pub proteins: f64,

    /// Fats (g)
    pub fats: f64,

    /// Carbohydrates (g)
    pub carbs: f64,
}

impl MacroTotals {
    /// All-zero totals
    pub const ZERO: MacroTotals = MacroTotals {
        calories: 0.0,
        proteins: 0.0,
        fats: 0.0,
        carbs: 0.0,
    };
}

/// Round to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the macros for `quantity` of a food.
///
/// Returns all-zero totals for a non-positive or non-finite quantity, or a
/// non-positive portion size. Incomplete user input must still render as
/// something, so the degenerate cases are a safe default, not an error.
pub fn line_totals(food: &FoodItem, quantity: f64) -> MacroTotals {
    if !quantity.is_finite() || quantity <= 0.0 || food.portion_size_g <= 0.0 {
        return MacroTotals::ZERO;
    }

    let ratio = quantity / food.portion_size_g;
    MacroTotals {
        calories: round2(food.calories * ratio),
        proteins: round2(food.proteins * ratio),
        fats: round2(food.fats * ratio),
        carbs: round2(food.carbs * ratio),
    }
}

/// Sum a collection of macro totals.
///
/// Plain field-wise summation: order-independent, empty input sums to zero.
pub fn aggregate(items: impl IntoIterator<Item = MacroTotals>) -> MacroTotals {
    let mut total = MacroTotals::ZERO;
    for item in items {
        total.calories += item.calories;
        total.proteins += item.proteins;
        total.fats += item.fats;
        total.carbs += item.carbs;
    }

    MacroTotals {
        calories: round2(total.calories),
        proteins: round2(total.proteins),
        fats: round2(total.fats),
        carbs: round2(total.carbs),
    }
}
