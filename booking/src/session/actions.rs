//! Inputs to the session reducer.

use serde::{Deserialize, Serialize};

/// Arrow-key direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards row 0, or the previous ticket kind
    Up,
    /// Towards row 4, or the next ticket kind
    Down,
    /// Towards column A, or one ticket fewer
    Left,
    /// Towards column I, or one ticket more
    Right,
}

/// Everything the UI can ask of a session, plus effect feedback
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionAction {
    /// Start choosing seats from the overview
    BeginBooking,

    /// Leave the screening (from the overview or after completing)
    Leave,

    /// Move the seat cursor one step; stops at the grid edge
    MoveCursor(Direction),

    /// Select or deselect the free seat under the cursor
    ToggleSeat,

    /// Accept the seat selection and move on to tickets
    ConfirmSeats,

    /// Pick a ticket kind (up/down) or change its count (left/right)
    AdjustTicket(Direction),

    /// Validate tickets and commit the booking
    ConfirmTickets,

    /// Go back one stage
    Cancel,

    /// The ledger now holds this booking on disk
    ///
    /// Emitted by the commit effect, never by the UI.
    BookingPersisted {
        /// Ledger bitmap for the film and day after the merge
        merged_seats: u64,
    },
}
