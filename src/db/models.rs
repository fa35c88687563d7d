//! Domain models for the song catalog.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use chrono::NaiveDate;

// =============================================================================
// Query Types for Pagination and Filtering
// =============================================================================

/// 1-based page selection.
///
/// Values are not validated: zero or negative numbers are handed to the
/// store as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number, starting at 1.
    pub page: i64,
    /// Number of items per page.
    pub items: i64,
}

impl PageRequest {
    pub fn new(page: i64, items: i64) -> Self {
        Self { page, items }
    }

    /// Number of rows to skip: `(page - 1) * items`.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.items)
    }
}

/// Sparse filter set for song listing.
///
/// `None` means "not filtering on this field". `Some("")` filters on an
/// empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    pub group: Option<String>,
    pub song: Option<String>,
    /// Release date in `DD.MM.YYYY` format.
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

impl SongFilter {
    pub fn is_empty(&self) -> bool {
        self.group.is_none()
            && self.song.is_none()
            && self.release_date.is_none()
            && self.text.is_none()
            && self.link.is_none()
    }
}

/// Partial update of a song. Group and song name are identity and never edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongPatch {
    /// Release date in `DD.MM.YYYY` format.
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

impl SongPatch {
    pub fn is_empty(&self) -> bool {
        self.release_date.is_none() && self.text.is_none() && self.link.is_none()
    }
}

// =============================================================================
// Entities
// =============================================================================

/// Input for inserting a song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub group: String,
    pub song: String,
    /// Release date in `DD.MM.YYYY` format.
    pub release_date: String,
    pub text: String,
    pub link: String,
}

/// A song joined with its group name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub group: String,
    pub song: String,
    pub release_date: NaiveDate,
    pub text: String,
    pub link: String,
}
