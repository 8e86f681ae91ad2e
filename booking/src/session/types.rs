//! Session state and the records it produces.

use crate::error::BookingError;
use crate::pricing;
use crate::screening::Screening;
use crate::types::{Money, Seat, TicketComposition, TicketKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the customer is in the booking flow
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Looking at the screening summary
    #[default]
    Overview,
    /// Moving the cursor over the seat grid
    ChoosingSeats,
    /// Distributing ticket kinds over the selected seats
    ChoosingTickets,
    /// Booking committed
    Completed,
    /// Session over; further actions are ignored
    Left,
}

/// A correctable problem shown to the customer until their next action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionNotice {
    /// Tried to confirm with no seats selected
    EmptySelection,
    /// Some seats have no ticket yet
    IncompleteAllocation {
        /// Seats still without a ticket
        remaining: u32,
    },
    /// Child or student tickets on an 18-rated showing
    AdultOnlyViolation,
}

impl SessionNotice {
    /// Notice for a user-correctable error, `None` for anything else
    #[must_use]
    pub const fn from_error(error: &BookingError) -> Option<Self> {
        match error {
            BookingError::EmptySelection => Some(Self::EmptySelection),
            BookingError::IncompleteAllocation { remaining } => Some(Self::IncompleteAllocation {
                remaining: *remaining,
            }),
            BookingError::AdultOnlyViolation => Some(Self::AdultOnlyViolation),
            _ => None,
        }
    }

    fn as_error(self) -> BookingError {
        match self {
            Self::EmptySelection => BookingError::EmptySelection,
            Self::IncompleteAllocation { remaining } => {
                BookingError::IncompleteAllocation { remaining }
            },
            Self::AdultOnlyViolation => BookingError::AdultOnlyViolation,
        }
    }
}

impl fmt::Display for SessionNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_error(), f)
    }
}

/// Summary of a committed booking
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingReceipt {
    /// Film name
    pub film: String,
    /// Seats booked, in the order they were selected
    pub seats: Vec<Seat>,
    /// Ticket kinds paid for
    pub tickets: TicketComposition,
    /// Amount paid
    pub total: Money,
    /// Seat bits added by this booking
    pub overwrite: u64,
    /// When the booking was committed
    pub booked_at: DateTime<Utc>,
    /// Set once the ledger file has been written
    pub persisted: bool,
}

/// Everything a session knows
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// The screening being booked
    pub screening: Screening,
    /// Current stage
    pub stage: Stage,
    /// Seat under the cursor
    pub cursor: Seat,
    /// Selected seats, in selection order
    pub selected: Vec<Seat>,
    /// Ticket kinds allocated so far
    pub tickets: TicketComposition,
    /// Ticket kind the left/right keys act on
    pub ticket_cursor: TicketKind,
    /// Problem to show, cleared by the next action
    pub notice: Option<SessionNotice>,
    /// Set after tickets are confirmed
    pub receipt: Option<BookingReceipt>,
}

impl SessionState {
    /// Fresh session at the overview for `screening`
    #[must_use]
    pub const fn new(screening: Screening) -> Self {
        Self {
            screening,
            stage: Stage::Overview,
            cursor: Seat::wrapping(0, 0),
            selected: Vec::new(),
            tickets: TicketComposition::new(0, 0, 0),
            ticket_cursor: TicketKind::Child,
            notice: None,
            receipt: None,
        }
    }

    /// Number of seats selected
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // at most 45 seats
    pub fn seat_count(&self) -> u32 {
        self.selected.len() as u32
    }

    /// Whether `seat` is in the current selection
    #[must_use]
    pub fn is_selected(&self, seat: Seat) -> bool {
        self.selected.contains(&seat)
    }

    /// Price of the tickets allocated so far
    #[must_use]
    pub fn total(&self) -> Money {
        pricing::price(&self.tickets)
    }
}
