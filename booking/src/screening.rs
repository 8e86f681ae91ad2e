//! Screenings and the three ways to build one.
//!
//! - [`Screening::generate`]: a film looked up by name, word derived from a name hash
//! - [`Screening::from_word`]: a catalog entry with a known word
//! - [`Screening::from_arrangement`]: a hand-built 5x9 seating plan
//!
//! Every path ORs in the seats already recorded in the ledger for that exact
//! film and day.

use crate::codec::ScreeningWord;
use crate::error::{BookingError, Result};
use crate::ledger::Ledger;
use crate::population::populate;
use crate::pricing::{self, Commit};
use crate::types::{AgeRating, COLUMNS, ROWS, ScreeningDay, Seat};
use serde::{Deserialize, Serialize};

const HASH_MULTIPLIER: u64 = 0x5851_F42D_4C95_7F2D;

/// One showing of a film on one day
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screening {
    name: String,
    day: ScreeningDay,
    word: ScreeningWord,
}

/// A hand-built catalog entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManualScreening {
    /// Film name
    pub name: String,
    /// Seating plan, 5 rows of 9; any non-zero cell is occupied
    pub seating: Vec<Vec<u8>>,
    /// Age rating label: `"12"`, `"15"`, `"18"`, anything else is U
    pub age_rating: String,
    /// Quality score, reduced mod 32
    pub quality: u8,
    /// Screening day
    pub day: ScreeningDay,
    /// Also run quality population over the plan
    pub populate: bool,
}

impl Screening {
    /// Derives a fresh screening for `name` on `day`
    ///
    /// The word comes from [`name_hash`]; ledger bookings are merged in and the
    /// quality band then populates the seats.
    #[must_use]
    pub fn generate(name: &str, day: ScreeningDay, ledger: &Ledger) -> Self {
        Self::seeded(name, day, name_hash(name), ledger)
    }

    /// Like [`Self::generate`] but starting from an explicit base word
    #[must_use]
    pub fn seeded(name: &str, day: ScreeningDay, base: ScreeningWord, ledger: &Ledger) -> Self {
        let name = name.to_lowercase();
        let merged = base.merge_seats(ledger.lookup(&name, day));
        let word = populate(merged, day);
        tracing::debug!(film = %name, %day, ?word, "generated screening");
        Self { name, day, word }
    }

    /// Rebuilds a screening from a stored word, without population
    #[must_use]
    pub fn from_word(name: &str, word: ScreeningWord, day: ScreeningDay, ledger: &Ledger) -> Self {
        let name = name.to_lowercase();
        let word = word.merge_seats(ledger.lookup(&name, day));
        Self { name, day, word }
    }

    /// Builds a screening from a manual seating plan
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidSeatingArrangementShape`] unless the plan is
    /// exactly 5 rows of 9 seats.
    pub fn from_arrangement(manual: ManualScreening, ledger: &Ledger) -> Result<Self> {
        let ManualScreening {
            name,
            seating,
            age_rating,
            quality,
            day,
            populate: repopulate,
        } = manual;

        if seating.len() != usize::from(ROWS)
            || seating.iter().any(|row| row.len() != usize::from(COLUMNS))
        {
            return Err(BookingError::InvalidSeatingArrangementShape {
                rows: seating.len(),
                cols: seating.iter().map(Vec::len).collect(),
            });
        }

        let planned = Seat::all()
            .filter(|seat| seating[usize::from(seat.row())][usize::from(seat.col())] != 0)
            .fold(ScreeningWord::default(), |word, seat| {
                word.encode_seat(seat.row(), seat.col(), true)
            })
            .with_age_rating(AgeRating::from_label(&age_rating))
            .with_quality(quality);

        let name = name.to_lowercase();
        let mut word = planned.merge_seats(ledger.lookup(&name, day));
        if repopulate {
            word = populate(word, day);
        }
        Ok(Self { name, day, word })
    }

    /// Lowercase film name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Screening day
    #[must_use]
    pub const fn day(&self) -> ScreeningDay {
        self.day
    }

    /// Current packed word
    #[must_use]
    pub const fn word(&self) -> ScreeningWord {
        self.word
    }

    /// Age rating, U if the field is unrecognised
    #[must_use]
    pub fn age_rating(&self) -> AgeRating {
        self.word.age_rating().unwrap_or(AgeRating::U)
    }

    /// Whether `seat` is already taken
    #[must_use]
    pub const fn is_occupied(&self, seat: Seat) -> bool {
        self.word.is_occupied(seat)
    }

    /// Occupies `selected` seats and returns the bits to merge into the ledger
    pub fn book(&mut self, selected: &[Seat]) -> Commit {
        let commit = pricing::commit(selected, self.word);
        self.word = commit.word;
        commit
    }
}

/// Mixes a film name into a starting word
///
/// Starts from the last UTF-16 unit of the name and multiplies in every unit;
/// the product wraps. Empty names hash to zero.
#[must_use]
pub fn name_hash(name: &str) -> ScreeningWord {
    let units: Vec<u16> = name.encode_utf16().collect();
    let Some(&last) = units.last() else {
        return ScreeningWord::default();
    };

    let hash = units
        .iter()
        .enumerate()
        .fold(u64::from(last), |hash, (index, &unit)| {
            let factor = HASH_MULTIPLIER
                .wrapping_mul(u64::from(unit))
                .wrapping_add(index as u64)
                .wrapping_sub(1);
            hash.wrapping_mul(factor)
        });
    ScreeningWord::new(hash)
}
