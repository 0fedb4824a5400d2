//! Meal-type classification from the hour of day.

use crate::models::order::MealType;

/// Classify an hour of day (0-23) into a meal type.
///
/// Rules are evaluated in order and the first match wins. The lunch and
/// breakfast ranges overlap at 10, which therefore classifies as lunch.
pub fn classify(hour: u32) -> MealType {
    if (10..17).contains(&hour) {
        MealType::Lunch
    } else if (8..11).contains(&hour) {
        MealType::Breakfast
    } else if hour >= 18 {
        MealType::Dinner
    } else {
        MealType::Unknown
    }
}
