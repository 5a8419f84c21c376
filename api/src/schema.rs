use serde::Deserialize;
use thiserror::Error;

use crate::model::{Category, CustomerType, PrepMethod, PricingRank};

/// Body of `POST /add/`. Every value arrives as text and is parsed in `validate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddEventForm {
    pub guestno: String,
    pub serveno: String,
    pub price: String,
    pub prep: String,
    pub regular: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid input: please enter valid numbers.")]
    NotANumber { field: &'static str },

    #[error("Values must be positive numbers.")]
    NotPositive { field: &'static str },

    #[error("Category ranks are out of range.")]
    UnknownRank { field: &'static str },

    #[error("Invalid input: please fill in every field.")]
    Malformed(String),
}

/// A submission whose numbers parsed, passed range checks and select known categories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedEvent {
    pub guest_no: i64,
    pub serve_no: i64,
    pub pricing: PricingRank,
    pub prep_method: PrepMethod,
    pub customer: CustomerType,
}

fn parse_int(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::NotANumber { field })
}

fn parse_real(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(ValidationError::NotANumber { field })
}

fn category<C: Category>(field: &'static str, rank: i64) -> Result<C, ValidationError> {
    C::from_rank(rank).ok_or(ValidationError::UnknownRank { field })
}

impl AddEventForm {
    pub fn validate(&self) -> Result<ValidatedEvent, ValidationError> {
        let guest_no = parse_int("guestno", &self.guestno)?;
        let serve_no = parse_int("serveno", &self.serveno)?;
        let price = parse_real("price", &self.price)?;
        let prep = parse_int("prep", &self.prep)?;
        let regular = parse_int("regular", &self.regular)?;

        let positive = [
            ("guestno", guest_no > 0),
            ("serveno", serve_no > 0),
            ("price", price > 0.0),
            ("prep", prep >= 0),
            ("regular", regular >= 0),
        ];
        if let Some((field, _)) = positive.into_iter().find(|(_, ok)| !ok) {
            return Err(ValidationError::NotPositive { field });
        }

        // price is a rank typed as a real; only whole values name a category
        if price.fract() != 0.0 {
            return Err(ValidationError::UnknownRank { field: "price" });
        }

        Ok(ValidatedEvent {
            guest_no,
            serve_no,
            pricing: category("price", price as i64)?,
            prep_method: category("prep", prep)?,
            customer: category("regular", regular)?,
        })
    }
}
