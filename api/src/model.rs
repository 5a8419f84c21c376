use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A fixed, ordered set of labels selected by a one-indexed rank.
pub trait Category: Copy + PartialEq + Sized + 'static {
    /// Every variant, in rank order.
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    /// Rank 1 selects the first variant. Rank 0 and ranks past the end select nothing.
    fn from_rank(rank: i64) -> Option<Self> {
        let index = usize::try_from(rank.checked_sub(1)?).ok()?;
        Self::ALL.get(index).copied()
    }

    fn rank(self) -> i64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingRank {
    Low,
    Moderate,
    High,
}

impl Category for PricingRank {
    const ALL: &'static [Self] = &[Self::Low, Self::Moderate, Self::High];

    fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    fn rank(self) -> i64 {
        match self {
            Self::Low => 1,
            Self::Moderate => 2,
            Self::High => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrepMethod {
    FingerFood,
    SitDownDinner,
    Buffet,
}

impl Category for PrepMethod {
    const ALL: &'static [Self] = &[Self::FingerFood, Self::SitDownDinner, Self::Buffet];

    fn label(self) -> &'static str {
        match self {
            Self::FingerFood => "Finger Food",
            Self::SitDownDinner => "Sit-down Dinner",
            Self::Buffet => "Buffet",
        }
    }

    fn rank(self) -> i64 {
        match self {
            Self::FingerFood => 1,
            Self::SitDownDinner => 2,
            Self::Buffet => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerType {
    Occasional,
    Regular,
}

impl Category for CustomerType {
    const ALL: &'static [Self] = &[Self::Occasional, Self::Regular];

    fn label(self) -> &'static str {
        match self {
            Self::Occasional => "Occasional",
            Self::Regular => "Regular",
        }
    }

    fn rank(self) -> i64 {
        match self {
            Self::Occasional => 1,
            Self::Regular => 2,
        }
    }
}

/// An event ready to be written. Categories are still typed ranks here;
/// the store turns them into labels on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub epoch: i64,
    pub guest_no: i64,
    pub servings_no: i64,
    pub pricing: PricingRank,
    pub prep_method: PrepMethod,
    pub customer: CustomerType,
    pub servings_wasted: Option<f64>,
    pub date_time: String,
}

/// A row of the `FoodWaste` table as stored, with category labels.
#[derive(Debug, Clone, PartialEq, Deserialize, FromRow, Serialize)]
#[serde(rename_all = "PascalCase")]
#[sqlx(rename_all = "PascalCase")]
pub struct EventRecord {
    pub epoch: i64,
    pub guest_no: i64,
    pub servings_no: i64,
    pub pricing_rank: String,
    pub prep_method_rank: String,
    pub customer_rank: String,
    pub servings_wasted: Option<f64>,
    pub date_time: String,
}
