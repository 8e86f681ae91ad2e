//! Ticket composition validation, pricing and commit.

use crate::codec::ScreeningWord;
use crate::error::{BookingError, Result};
use crate::types::{AgeRating, Money, Seat, TicketComposition, TicketKind};
use serde::{Deserialize, Serialize};

/// Checks that a composition may be committed for `seat_count` seats
///
/// # Errors
///
/// - [`BookingError::AdultOnlyViolation`] if the showing is 18-rated and any
///   child or student tickets are present
/// - [`BookingError::IncompleteAllocation`] if fewer tickets than seats were allocated
pub fn validate(
    composition: &TicketComposition,
    seat_count: u32,
    age_rating: AgeRating,
) -> Result<()> {
    if age_rating.is_adult_only() && (composition.child > 0 || composition.student > 0) {
        return Err(BookingError::AdultOnlyViolation);
    }
    if composition.total() < seat_count {
        return Err(BookingError::IncompleteAllocation {
            remaining: seat_count - composition.total(),
        });
    }
    Ok(())
}

/// Total price of a composition
#[must_use]
pub fn price(composition: &TicketComposition) -> Money {
    TicketKind::ALL.iter().fold(Money::ZERO, |total, &kind| {
        total.saturating_add(kind.unit_price().saturating_multiply(composition.count(kind)))
    })
}

/// Outcome of committing a seat selection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The screening word with the new seats occupied
    pub word: ScreeningWord,
    /// Only the seats booked by this commit, for merging into the ledger
    pub overwrite: u64,
}

/// Marks `selected` seats occupied in `word`
///
/// Call only after [`validate`] has succeeded.
#[must_use]
pub fn commit(selected: &[Seat], word: ScreeningWord) -> Commit {
    let overwrite = booking_bitmask(selected);
    Commit {
        word: word.merge_seats(overwrite),
        overwrite,
    }
}

/// Seat bits for a selection, in screening-word position
#[must_use]
pub fn booking_bitmask(selected: &[Seat]) -> u64 {
    selected
        .iter()
        .fold(ScreeningWord::default(), |mask, seat| {
            mask.encode_seat(seat.row(), seat.col(), true)
        })
        .raw()
}
