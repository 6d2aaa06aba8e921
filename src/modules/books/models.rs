use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::CatalogError;
use crate::modules::authors::models::Author;
use crate::utils::null_as_default;

/// Published years must lie strictly between these bounds.
pub const PUBLISHED_YEAR_FLOOR: i32 = 1880;
pub const PUBLISHED_YEAR_CEILING: i32 = 2022;

/// A catalog book.
///
/// `auth` is filled from the Author table on reads and ignored on writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Book {
    /// Caller-chosen primary key
    #[serde(rename = "bookID", deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(rename = "authorID", deserialize_with = "null_as_default")]
    pub author_id: i64,
    #[serde(rename = "auth", deserialize_with = "null_as_default")]
    pub author: Author,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// One of the names in [`Publication`]
    #[serde(deserialize_with = "null_as_default")]
    pub publication: String,
    /// `DD/MM/YYYY`
    #[serde(deserialize_with = "null_as_default")]
    pub published_date: String,
}

impl Book {
    /// True when title, publication or published date is empty.
    pub fn has_missing_fields(&self) -> bool {
        self.title.is_empty() || self.publication.is_empty() || self.published_date.is_empty()
    }
}

/// Publishers the catalog accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Publication {
    Scholastic,
    Arihant,
    Penguin,
}

impl Publication {
    pub const ALL: [Publication; 3] = [
        Publication::Scholastic,
        Publication::Arihant,
        Publication::Penguin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Publication::Scholastic => "Scholastic",
            Publication::Arihant => "Arihant",
            Publication::Penguin => "Penguin",
        }
    }
}

impl FromStr for Publication {
    type Err = CatalogError;

    /// Exact, case-sensitive match.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Publication::ALL
            .into_iter()
            .find(|publication| publication.as_str() == value)
            .ok_or(CatalogError::InvalidPublication)
    }
}

/// Year component of a `DD/MM/YYYY` date.
///
/// Only the shape (exactly three `/`-separated segments) and the year are
/// looked at; day and month are not checked.
pub fn published_year(date: &str) -> Option<i32> {
    let segments: Vec<&str> = date.split('/').collect();
    match segments.as_slice() {
        [_, _, year] => year.parse().ok(),
        _ => None,
    }
}

/// Whether the date's year lies strictly inside the accepted range.
pub fn is_valid_published_date(date: &str) -> bool {
    published_year(date)
        .map(|year| year > PUBLISHED_YEAR_FLOOR && year < PUBLISHED_YEAR_CEILING)
        .unwrap_or(false)
}
