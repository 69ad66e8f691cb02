//! Daily nutrition summary

use chrono::NaiveDate;

use crate::meals::Meal;
use crate::nutrition::{aggregate, MacroTotals};

/// The nutrition summary for one calendar day.
///
/// Derived on demand from the day's meals and never cached across dates.
/// A day without meals is a valid, displayable summary.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    /// The summarized day
    pub date: NaiveDate,

    /// The meals logged on that day
    pub meals: Vec<Meal>,

    /// The summed macro totals across those meals
    pub totals: MacroTotals,
}

impl DailySummary {
    /// Build the summary for `date` from a meal list.
    ///
    /// Meals on other dates are dropped, so the result is correct whether
    /// the list was pre-filtered by the API or fetched wholesale.
    pub fn from_meals(date: NaiveDate, meals: Vec<Meal>) -> Self {
        let meals: Vec<Meal> = meals.into_iter().filter(|meal| meal.date == date).collect();

        let totals = aggregate(meals.iter().map(|meal| MacroTotals {
            calories: meal.total_calories,
            proteins: meal.total_proteins,
            fats: meal.total_fats,
            carbs: meal.total_carbs,
        }));

        Self {
            date,
            meals,
            totals,
        }
    }

    /// Whether nothing was logged on this day
    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}

/// Clamp a selected date so it never exceeds today
pub fn clamp_to_today(selected: NaiveDate, today: NaiveDate) -> NaiveDate {
    selected.min(today)
}
