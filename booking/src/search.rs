//! Film-name search input and the range of bookable dates.

use crate::error::{BookingError, Result};
use crate::types::ScreeningDay;
use serde::{Deserialize, Serialize};

/// Longest film name accepted from search, in characters
pub const MAX_FILM_NAME_CHARS: usize = 64;

/// Lowercases and checks a searched film name
///
/// # Errors
///
/// Returns [`BookingError::InvalidFilmName`] for an empty name or one without a
/// single alphanumeric character.
pub fn normalize_film_name(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(BookingError::InvalidFilmName(
            "Film name cannot be empty".to_string(),
        ));
    }
    if !raw.chars().any(char::is_alphanumeric) {
        return Err(BookingError::InvalidFilmName(
            "Film name must contain a letter or digit".to_string(),
        ));
    }
    Ok(raw
        .to_lowercase()
        .chars()
        .take(MAX_FILM_NAME_CHARS)
        .collect())
}

/// Dates a customer may pick: `today` through `today + days` inclusive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWindow {
    today: ScreeningDay,
    days: u32,
}

impl BookingWindow {
    /// Creates a window starting today
    #[must_use]
    pub const fn new(today: ScreeningDay, days: u32) -> Self {
        Self { today, days }
    }

    /// First selectable day
    #[must_use]
    pub const fn first(&self) -> ScreeningDay {
        self.today
    }

    /// Last selectable day
    #[must_use]
    pub fn last(&self) -> ScreeningDay {
        self.today.plus_days(self.days)
    }

    /// Whether `day` can be booked
    #[must_use]
    pub fn contains(&self, day: ScreeningDay) -> bool {
        (self.first()..=self.last()).contains(&day)
    }

    /// Pulls `day` into the window
    #[must_use]
    pub fn clamp(&self, day: ScreeningDay) -> ScreeningDay {
        day.clamp(self.first(), self.last())
    }

    /// Every selectable day, earliest first
    pub fn days(&self) -> impl Iterator<Item = ScreeningDay> + '_ {
        (0..=self.days).map(|offset| self.today.plus_days(offset))
    }
}
