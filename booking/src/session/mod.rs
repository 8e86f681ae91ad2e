//! Screening session: one customer booking seats for one screening.
//!
//! # Flow
//!
//! ```text
//! Overview ──BeginBooking──▶ ChoosingSeats ──ConfirmSeats──▶ ChoosingTickets
//!    │  ▲                       │   ▲                           │
//!  Leave└──────Cancel───────────┘   └───────────Cancel──────────┤
//!    ▼                                                    ConfirmTickets
//!  Left ◀──────────────Leave───────────── Completed ◀───────────┘
//! ```
//!
//! Confirming tickets commits the seats into the screening word straight away
//! and returns one effect that merges them into the ledger and saves it. The
//! effect answers with [`SessionAction::BookingPersisted`].
//!
//! The UI collaborator sends [`SessionAction`]s in and reads a
//! [`render::RenderFrame`] back out; nothing here draws anything.

pub mod actions;
pub mod environment;
pub mod reducer;
pub mod render;
pub mod types;

pub use actions::{Direction, SessionAction};
pub use environment::SessionEnvironment;
pub use reducer::SessionReducer;
pub use render::{render, RenderFrame};
pub use types::{BookingReceipt, SessionNotice, SessionState, Stage};
