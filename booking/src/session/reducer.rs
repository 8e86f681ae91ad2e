//! Reducer driving a screening session.

use crate::error::BookingError;
use crate::pricing;
use crate::session::{
    BookingReceipt, Direction, SessionAction, SessionEnvironment, SessionNotice, SessionState,
    Stage,
};
use crate::types::{Seat, TicketComposition, TicketKind};
use multiplex_core::{effect::Effect, reducer::Reducer};
use smallvec::{smallvec, SmallVec};

/// Reducer for one customer's pass through a screening
///
/// Actions that make no sense in the current stage are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionReducer;

impl SessionReducer {
    /// Creates the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn toggle_seat(state: &mut SessionState) {
        let seat = state.cursor;
        if state.screening.is_occupied(seat) {
            return;
        }
        if let Some(index) = state.selected.iter().position(|&s| s == seat) {
            state.selected.remove(index);
        } else {
            state.selected.push(seat);
        }
    }

    fn adjust_ticket(state: &mut SessionState, direction: Direction) {
        match direction {
            Direction::Up => {
                state.ticket_cursor = state.ticket_cursor.previous().unwrap_or(state.ticket_cursor);
            },
            Direction::Down => {
                state.ticket_cursor = state.ticket_cursor.next().unwrap_or(state.ticket_cursor);
            },
            Direction::Left => {
                state.tickets.decrement(state.ticket_cursor);
            },
            Direction::Right => {
                let seats = state.seat_count();
                state.tickets.increment(state.ticket_cursor, seats);
            },
        }
    }

    fn confirm_tickets(
        state: &mut SessionState,
        env: &SessionEnvironment,
    ) -> SmallVec<[Effect<SessionAction>; 4]> {
        if let Err(error) = pricing::validate(
            &state.tickets,
            state.seat_count(),
            state.screening.age_rating(),
        ) {
            tracing::debug!(%error, "ticket validation failed");
            state.notice = SessionNotice::from_error(&error);
            return smallvec![Effect::None];
        }

        let commit = state.screening.book(&state.selected);
        let receipt = BookingReceipt {
            film: state.screening.name().to_string(),
            seats: state.selected.clone(),
            tickets: state.tickets,
            total: state.total(),
            overwrite: commit.overwrite,
            booked_at: env.clock().now(),
            persisted: false,
        };
        tracing::info!(
            film = %receipt.film,
            day = %state.screening.day(),
            seats = receipt.seats.len(),
            total = %receipt.total,
            "booking committed"
        );
        state.receipt = Some(receipt);
        state.stage = Stage::Completed;

        let ledger = env.ledger().clone();
        let path = env.ledger_path().to_path_buf();
        let film = state.screening.name().to_string();
        let day = state.screening.day();
        let overwrite = commit.overwrite;

        smallvec![Effect::run(move || {
            let merged_seats = ledger.borrow_mut().merge_add(&film, day, overwrite);
            ledger.borrow().save(&path)?;
            Ok(Some(SessionAction::BookingPersisted { merged_seats }))
        })]
    }
}

impl Reducer for SessionReducer {
    type State = SessionState;
    type Action = SessionAction;
    type Environment = SessionEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::debug!(stage = ?state.stage, ?action, "session action");
        state.notice = None;

        match (state.stage, action) {
            (Stage::Overview, SessionAction::BeginBooking) => {
                state.stage = Stage::ChoosingSeats;
                smallvec![Effect::None]
            },

            (Stage::Overview | Stage::Completed, SessionAction::Leave) => {
                state.stage = Stage::Left;
                smallvec![Effect::None]
            },

            (Stage::ChoosingSeats, SessionAction::MoveCursor(direction)) => {
                state.cursor = step(state.cursor, direction);
                smallvec![Effect::None]
            },

            (Stage::ChoosingSeats, SessionAction::ToggleSeat) => {
                Self::toggle_seat(state);
                smallvec![Effect::None]
            },

            (Stage::ChoosingSeats, SessionAction::ConfirmSeats) => {
                if state.selected.is_empty() {
                    state.notice = SessionNotice::from_error(&BookingError::EmptySelection);
                } else {
                    state.stage = Stage::ChoosingTickets;
                }
                smallvec![Effect::None]
            },

            (Stage::ChoosingSeats, SessionAction::Cancel) => {
                state.selected.clear();
                state.cursor = Seat::wrapping(0, 0);
                state.stage = Stage::Overview;
                smallvec![Effect::None]
            },

            (Stage::ChoosingTickets, SessionAction::AdjustTicket(direction)) => {
                Self::adjust_ticket(state, direction);
                smallvec![Effect::None]
            },

            (Stage::ChoosingTickets, SessionAction::ConfirmTickets) => {
                Self::confirm_tickets(state, env)
            },

            (Stage::ChoosingTickets, SessionAction::Cancel) => {
                state.tickets = TicketComposition::default();
                state.ticket_cursor = TicketKind::Child;
                state.stage = Stage::ChoosingSeats;
                smallvec![Effect::None]
            },

            (_, SessionAction::BookingPersisted { merged_seats }) => {
                if let Some(receipt) = state.receipt.as_mut() {
                    receipt.persisted = true;
                    tracing::info!(
                        film = %receipt.film,
                        path = %env.ledger_path().display(),
                        merged_seats,
                        "booking saved to ledger"
                    );
                }
                smallvec![Effect::None]
            },

            (stage, action) => {
                tracing::trace!(?stage, ?action, "action ignored in this stage");
                smallvec![Effect::None]
            },
        }
    }
}

/// One cursor step, staying put at the grid edge
fn step(seat: Seat, direction: Direction) -> Seat {
    let (row, col) = (seat.row(), seat.col());
    let moved = match direction {
        Direction::Up => row.checked_sub(1).and_then(|row| Seat::new(row, col)),
        Direction::Down => Seat::new(row + 1, col),
        Direction::Left => col.checked_sub(1).and_then(|col| Seat::new(row, col)),
        Direction::Right => Seat::new(row, col + 1),
    };
    moved.unwrap_or(seat)
}
