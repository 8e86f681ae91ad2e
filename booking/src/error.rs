//! Error taxonomy for the booking core.

use thiserror::Error;

/// Errors raised by the codec, ledger, pricing and screening constructors
#[derive(Error, Debug)]
pub enum BookingError {
    /// A ledger line could not be parsed; the line is skipped on load
    #[error("malformed ledger line {line}: {reason}")]
    MalformedLedgerLine {
        /// 1-based line number in the ledger file
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Fewer tickets were allocated than seats were selected
    #[error("You must pay for all tickets ({remaining} left)")]
    IncompleteAllocation {
        /// Seats still without a ticket
        remaining: u32,
    },

    /// Child or student tickets on an 18-rated showing
    #[error("This is an adult-only viewing, you cannot book child or student tickets")]
    AdultOnlyViolation,

    /// Confirmation attempted with no seats selected
    #[error("You haven't selected any seats!")]
    EmptySelection,

    /// A manual seating arrangement was not 5 rows of 9 seats
    #[error("seating arrangement must be 5x9, got {rows} rows (row widths {cols:?})")]
    InvalidSeatingArrangementShape {
        /// Number of rows supplied
        rows: usize,
        /// Width of every supplied row
        cols: Vec<usize>,
    },

    /// A searched film name was rejected
    #[error("{0}")]
    InvalidFilmName(String),

    /// Ledger storage failure
    #[error("ledger I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl BookingError {
    /// True for validation failures the user can correct and retry
    #[must_use]
    pub const fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Self::IncompleteAllocation { .. }
                | Self::AdultOnlyViolation
                | Self::EmptySelection
                | Self::InvalidFilmName(_)
        )
    }
}

/// Result alias for booking operations
pub type Result<T> = std::result::Result<T, BookingError>;
