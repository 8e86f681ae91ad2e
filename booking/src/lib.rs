//! # Multiplex Booking
//!
//! Seat booking for a small cinema multiplex.
//!
//! A screening is a single packed `u64` ([`codec::ScreeningWord`]) holding its
//! age rating, a 5x9 seat bitmap, a quality score and a screen number. Bookings
//! are OR-merged into that word and into a text [`ledger::Ledger`], so nobody
//! can take a seat someone else already paid for.
//!
//! # Architecture
//!
//! ```text
//!   name + day ──▶ screening ──▶ ledger OR-merge ──▶ population
//!                                                        │
//!   SessionAction ──▶ SessionReducer ◀───────────────────┘
//!                          │
//!               validate + price + commit
//!                          │
//!                   Effect::Run ──▶ ledger merge + save ──▶ BookingPersisted
//! ```
//!
//! [`session::render`] turns session state into key/value pairs for whatever
//! terminal or window shows it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod codec;
pub mod config;
pub mod error;
pub mod ledger;
pub mod population;
pub mod pricing;
pub mod screening;
pub mod search;
pub mod session;
pub mod types;

pub use catalog::{CatalogEntry, CATALOG};
pub use codec::{ScreeningView, ScreeningWord};
pub use config::Config;
pub use error::{BookingError, Result};
pub use ledger::{Ledger, LedgerHandle, LedgerStamp};
pub use screening::{ManualScreening, Screening};
pub use search::BookingWindow;
pub use session::{
    render, Direction, RenderFrame, SessionAction, SessionEnvironment, SessionReducer,
    SessionState, Stage,
};
pub use types::{AgeRating, Money, ScreeningDay, Seat, TicketComposition, TicketKind};
