//! One-shot notices carried across a redirect.
//!
//! The notice travels as a short code in the `flash` cookie. The next page
//! that renders it also expires the cookie.

use axum::http::{header, HeaderMap};

use crate::schema::ValidationError;

const COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Added,
    InvalidNumber,
    NotPositive,
    UnknownRank,
    Malformed,
}

impl Notice {
    const ALL: [Notice; 5] = [
        Notice::Added,
        Notice::InvalidNumber,
        Notice::NotPositive,
        Notice::UnknownRank,
        Notice::Malformed,
    ];

    fn code(self) -> &'static str {
        match self {
            Notice::Added => "added",
            Notice::InvalidNumber => "invalid_number",
            Notice::NotPositive => "not_positive",
            Notice::UnknownRank => "unknown_rank",
            Notice::Malformed => "malformed",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|notice| notice.code() == code)
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::Added => "Data added successfully!",
            Notice::InvalidNumber => "Invalid input: please enter valid numbers.",
            Notice::NotPositive => "Values must be positive numbers.",
            Notice::UnknownRank => "Category ranks are out of range.",
            Notice::Malformed => "Invalid input: please fill in every field.",
        }
    }

    /// CSS class of the rendered notice.
    pub fn category(self) -> &'static str {
        match self {
            Notice::Added => "success",
            _ => "error",
        }
    }
}

impl From<&ValidationError> for Notice {
    fn from(err: &ValidationError) -> Self {
        match err {
            ValidationError::NotANumber { .. } => Notice::InvalidNumber,
            ValidationError::NotPositive { .. } => Notice::NotPositive,
            ValidationError::UnknownRank { .. } => Notice::UnknownRank,
            ValidationError::Malformed(_) => Notice::Malformed,
        }
    }
}

/// Header that stores `notice` for the next page.
pub fn set(notice: Notice) -> [(header::HeaderName, String); 1] {
    [(
        header::SET_COOKIE,
        format!("{COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", notice.code()),
    )]
}

/// Header that expires the cookie once its notice has been shown.
pub fn clear() -> [(header::HeaderName, String); 1] {
    [(
        header::SET_COOKIE,
        format!("{COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax"),
    )]
}

/// The pending notice, if the request carries one.
pub fn peek(headers: &HeaderMap) -> Option<Notice> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE)
        .and_then(|(_, code)| Notice::from_code(code))
}
