//! Order record models shared by receipt and export extraction.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ExtractionError;
use crate::orders::rules::amounts::parse_amount;
use crate::orders::rules::meal::classify;
use crate::orders::rules::timestamps::weekday_name;

/// A single ordered item with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemLine {
    /// Item name exactly as it appears in the source.
    pub name: String,

    /// Ordered quantity (0 when no digit could be recovered).
    pub quantity: u64,
}

impl ItemLine {
    pub fn new(name: impl Into<String>, quantity: u64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

impl fmt::Display for ItemLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.quantity)
    }
}

/// Coarse time-of-day classification of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Unknown,
}

impl MealType {
    /// Label used in report tables and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "BREAKFAST",
            MealType::Lunch => "LUNCH",
            MealType::Dinner => "DINNER",
            MealType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BREAKFAST" => Ok(MealType::Breakfast),
            "LUNCH" => Ok(MealType::Lunch),
            "DINNER" => Ok(MealType::Dinner),
            "UNKNOWN" => Ok(MealType::Unknown),
            _ => Err(ExtractionError::Parse {
                field: "meal type".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Normalized representation of one receipt or export row.
///
/// Absent fields stay `None`; nothing mutates a record once it has been built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRecord {
    /// Order identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    /// When the order was placed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordered_at: Option<NaiveDateTime>,

    /// Day of week the order was placed on.
    #[serde(
        serialize_with = "serialize_weekday",
        skip_serializing_if = "Option::is_none"
    )]
    pub weekday: Option<Weekday>,

    /// Meal classification from the hour of day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,

    /// Item lines in source order.
    pub items: Vec<ItemLine>,

    /// Total amount as printed on the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<String>,

    /// Promo amount as printed on the source ("0" when absent).
    pub promo_amount: String,
}

impl OrderRecord {
    /// Build a record, deriving weekday and meal type from the timestamp.
    pub fn new(
        order_id: Option<String>,
        ordered_at: Option<NaiveDateTime>,
        items: Vec<ItemLine>,
    ) -> Self {
        Self {
            order_id,
            weekday: ordered_at.map(|t| t.weekday()),
            meal_type: ordered_at.map(|t| classify(t.hour())),
            ordered_at,
            items,
            total_amount: None,
            promo_amount: "0".to_string(),
        }
    }

    /// Set the total and promo amounts.
    pub fn with_amounts(mut self, total_amount: Option<String>, promo_amount: Option<String>) -> Self {
        self.total_amount = total_amount;
        self.promo_amount = promo_amount.unwrap_or_else(|| "0".to_string());
        self
    }

    /// Override the weekday (used when it is inherited from a previous row).
    pub fn with_weekday(mut self, weekday: Option<Weekday>) -> Self {
        self.weekday = weekday;
        self
    }

    /// Override the meal type.
    pub fn with_meal_type(mut self, meal_type: Option<MealType>) -> Self {
        self.meal_type = meal_type;
        self
    }

    /// Total amount parsed as a decimal.
    pub fn total_value(&self) -> Option<Decimal> {
        self.total_amount.as_deref().and_then(parse_amount)
    }

    /// Promo amount parsed as a decimal.
    pub fn promo_value(&self) -> Decimal {
        parse_amount(&self.promo_amount).unwrap_or_default()
    }

    /// Time of day part of the timestamp, e.g. "08:15 PM".
    pub fn ordered_time(&self) -> Option<String> {
        self.ordered_at.map(|t| t.format("%I:%M %p").to_string())
    }
}

fn serialize_weekday<S: Serializer>(weekday: &Option<Weekday>, serializer: S) -> Result<S::Ok, S::Error> {
    match weekday {
        Some(day) => serializer.serialize_str(weekday_name(*day)),
        None => serializer.serialize_none(),
    }
}
