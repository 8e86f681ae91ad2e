//! Domain value objects for the booking core.
//!
//! Seats, age ratings, ticket kinds, money and calendar days. Everything here is
//! `Copy` or cheap to clone and carries no I/O.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Auditorium Geometry
// ============================================================================

/// Rows in every auditorium
pub const ROWS: u8 = 5;

/// Seats per row in every auditorium
pub const COLUMNS: u8 = 9;

/// Total seats in every auditorium
pub const SEAT_COUNT: u32 = ROWS as u32 * COLUMNS as u32;

/// A seat position: row 0 is the front row, column 0 is seat `A`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Seat {
    row: u8,
    col: u8,
}

impl Seat {
    /// Creates a seat, returning `None` outside the 5x9 grid
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < ROWS && col < COLUMNS {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Creates a seat with row reduced mod 5 and column reduced mod 9
    #[must_use]
    pub const fn wrapping(row: u8, col: u8) -> Self {
        Self {
            row: row % ROWS,
            col: col % COLUMNS,
        }
    }

    /// Row index, 0..5
    #[must_use]
    pub const fn row(&self) -> u8 {
        self.row
    }

    /// Column index, 0..9
    #[must_use]
    pub const fn col(&self) -> u8 {
        self.col
    }

    /// Position of this seat's bit inside a packed screening word
    #[must_use]
    pub const fn bit_index(&self) -> u32 {
        2 + self.row as u32 * COLUMNS as u32 + self.col as u32
    }

    /// Every seat, row by row
    pub fn all() -> impl Iterator<Item = Self> {
        (0..ROWS).flat_map(|row| (0..COLUMNS).map(move |col| Self { row, col }))
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", char::from(b'A' + self.col), self.row + 1)
    }
}

// ============================================================================
// Age Rating
// ============================================================================

/// Classification stored in the two low bits of a screening word
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeRating {
    /// Universal
    U,
    /// 12 and over, or accompanied
    TwelveA,
    /// 15 and over
    Fifteen,
    /// Adults only
    Eighteen,
}

impl AgeRating {
    /// Decodes the two-bit field value
    #[must_use]
    pub const fn from_bits(bits: u64) -> Option<Self> {
        match bits {
            0 => Some(Self::U),
            1 => Some(Self::TwelveA),
            2 => Some(Self::Fifteen),
            3 => Some(Self::Eighteen),
            _ => None,
        }
    }

    /// Parses the label used by manual catalog entries; anything unknown is `U`
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "12" | "12A" => Self::TwelveA,
            "15" => Self::Fifteen,
            "18" => Self::Eighteen,
            _ => Self::U,
        }
    }

    /// Two-bit field value
    #[must_use]
    pub const fn bits(self) -> u64 {
        match self {
            Self::U => 0,
            Self::TwelveA => 1,
            Self::Fifteen => 2,
            Self::Eighteen => 3,
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::U => "U",
            Self::TwelveA => "12A",
            Self::Fifteen => "15",
            Self::Eighteen => "18",
        }
    }

    /// Colour the presentation layer uses for this rating
    #[must_use]
    pub const fn severity(self) -> SeverityColor {
        match self {
            Self::U => SeverityColor::Green,
            Self::TwelveA => SeverityColor::Yellow,
            Self::Fifteen => SeverityColor::Magenta,
            Self::Eighteen => SeverityColor::Red,
        }
    }

    /// Only adult tickets may be sold
    #[must_use]
    pub const fn is_adult_only(self) -> bool {
        matches!(self, Self::Eighteen)
    }
}

/// Severity colour for an age rating, kept free of any terminal API
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeverityColor {
    /// U
    Green,
    /// 12A
    Yellow,
    /// 15
    Magenta,
    /// 18
    Red,
    /// Unrecognised rating
    Neutral,
}

impl SeverityColor {
    /// Stable name for the UI collaborator
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Magenta => "magenta",
            Self::Red => "red",
            Self::Neutral => "neutral",
        }
    }
}

// ============================================================================
// Money Value Object (pence-based to avoid floating point errors)
// ============================================================================

/// Represents money in pence
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(u64);

impl Money {
    /// Zero
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from pence
    #[must_use]
    pub const fn from_pence(pence: u64) -> Self {
        Self(pence)
    }

    /// Returns the amount in pence
    #[must_use]
    pub const fn pence(&self) -> u64 {
        self.0
    }

    /// Checks if the amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two money amounts, saturating at `u64::MAX`
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiplies money by a quantity, saturating at `u64::MAX`
    #[must_use]
    pub const fn saturating_multiply(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// ============================================================================
// Ticket Kinds
// ============================================================================

/// The three ticket types on sale
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketKind {
    /// Child ticket
    Child,
    /// Adult ticket
    Adult,
    /// Student ticket
    Student,
}

impl TicketKind {
    /// All kinds in display order
    pub const ALL: [Self; 3] = [Self::Child, Self::Adult, Self::Student];

    /// Fixed unit price
    #[must_use]
    pub const fn unit_price(self) -> Money {
        match self {
            Self::Child => Money::from_pence(350),
            Self::Adult => Money::from_pence(700),
            Self::Student => Money::from_pence(400),
        }
    }

    /// Stable key component for rendering (`tickets.child` etc.)
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Child => "child",
            Self::Adult => "adult",
            Self::Student => "student",
        }
    }

    /// The kind listed before this one, if any
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Child => None,
            Self::Adult => Some(Self::Child),
            Self::Student => Some(Self::Adult),
        }
    }

    /// The kind listed after this one, if any
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Child => Some(Self::Adult),
            Self::Adult => Some(Self::Student),
            Self::Student => None,
        }
    }
}

/// How many of each ticket kind make up one booking attempt
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketComposition {
    /// Child tickets
    pub child: u32,
    /// Adult tickets
    pub adult: u32,
    /// Student tickets
    pub student: u32,
}

impl TicketComposition {
    /// Creates a composition from explicit counts
    #[must_use]
    pub const fn new(child: u32, adult: u32, student: u32) -> Self {
        Self {
            child,
            adult,
            student,
        }
    }

    /// Tickets allocated so far
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.child + self.adult + self.student
    }

    /// Count for one kind
    #[must_use]
    pub const fn count(&self, kind: TicketKind) -> u32 {
        match kind {
            TicketKind::Child => self.child,
            TicketKind::Adult => self.adult,
            TicketKind::Student => self.student,
        }
    }

    const fn slot(&mut self, kind: TicketKind) -> &mut u32 {
        match kind {
            TicketKind::Child => &mut self.child,
            TicketKind::Adult => &mut self.adult,
            TicketKind::Student => &mut self.student,
        }
    }

    /// Adds one ticket of `kind` unless every seat already has a ticket
    ///
    /// Returns whether the count changed.
    pub fn increment(&mut self, kind: TicketKind, seat_count: u32) -> bool {
        if self.total() >= seat_count {
            return false;
        }
        *self.slot(kind) += 1;
        true
    }

    /// Removes one ticket of `kind` if there is one
    ///
    /// Returns whether the count changed.
    pub fn decrement(&mut self, kind: TicketKind) -> bool {
        let slot = self.slot(kind);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}

// ============================================================================
// Calendar Days
// ============================================================================

/// 100-nanosecond ticks in one day
pub const TICKS_PER_DAY: i64 = 864_000_000_000;

/// A screening date with any time of day discarded
///
/// The ledger stores days as ticks: 100 ns intervals since 0001-01-01T00:00:00.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScreeningDay(NaiveDate);

impl ScreeningDay {
    /// Wraps a calendar date
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Truncates a timestamp to its UTC calendar day
    #[must_use]
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.date_naive())
    }

    /// Builds a day from year/month/day, `None` if the date does not exist
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Decodes ticks, discarding any time-of-day remainder
    #[must_use]
    pub fn from_ticks(ticks: i64) -> Option<Self> {
        if ticks < 0 {
            return None;
        }
        let days = i32::try_from(ticks / TICKS_PER_DAY).ok()?;
        NaiveDate::from_num_days_from_ce_opt(days.checked_add(1)?).map(Self)
    }

    /// Ticks at midnight of this day
    #[must_use]
    pub fn ticks(&self) -> i64 {
        (i64::from(self.0.num_days_from_ce()) - 1) * TICKS_PER_DAY
    }

    /// The wrapped date
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.0
    }

    /// Day of the month, 1..=31
    #[must_use]
    pub fn day_of_month(&self) -> u32 {
        self.0.day()
    }

    /// The day `days` later, saturating at the last representable date
    #[must_use]
    pub fn plus_days(&self, days: u32) -> Self {
        Self(
            self.0
                .checked_add_days(chrono::Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MAX),
        )
    }
}

impl fmt::Display for ScreeningDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%d/%m/%Y"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn seat_labels_use_column_letter_and_row_number() {
        assert_eq!(Seat::new(0, 0).unwrap().to_string(), "A1");
        assert_eq!(Seat::new(4, 8).unwrap().to_string(), "I5");
    }

    #[test]
    fn seat_new_rejects_out_of_grid() {
        assert!(Seat::new(5, 0).is_none());
        assert!(Seat::new(0, 9).is_none());
        assert_eq!(Seat::wrapping(6, 10), Seat::new(1, 1).unwrap());
    }

    #[test]
    fn all_seats_cover_the_grid_once() {
        let indexes: Vec<u32> = Seat::all().map(|s| s.bit_index()).collect();
        assert_eq!(indexes.len(), 45);
        assert_eq!(indexes.first(), Some(&2));
        assert_eq!(indexes.last(), Some(&46));
    }

    #[test]
    fn age_rating_labels() {
        assert_eq!(AgeRating::from_label("12"), AgeRating::TwelveA);
        assert_eq!(AgeRating::from_label("PG"), AgeRating::U);
        assert_eq!(AgeRating::Eighteen.label(), "18");
        assert_eq!(AgeRating::from_bits(4), None);
    }

    #[test]
    fn money_displays_two_decimals() {
        assert_eq!(Money::from_pence(1400).to_string(), "14.00");
        assert_eq!(Money::from_pence(350).to_string(), "3.50");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn composition_refuses_over_allocation() {
        let mut tickets = TicketComposition::default();
        assert!(tickets.increment(TicketKind::Adult, 2));
        assert!(tickets.increment(TicketKind::Child, 2));
        assert!(!tickets.increment(TicketKind::Student, 2));
        assert_eq!(tickets.total(), 2);
        assert!(tickets.decrement(TicketKind::Child));
        assert!(!tickets.decrement(TicketKind::Child));
    }

    #[test]
    fn ticks_count_from_year_one() {
        let day = ScreeningDay::from_ymd(2023, 9, 28).unwrap();
        assert_eq!(day.ticks(), 638_314_560_000_000_000);
        assert_eq!(ScreeningDay::from_ticks(day.ticks()), Some(day));
        assert_eq!(ScreeningDay::from_ticks(day.ticks() + 3_600 * 10_000_000), Some(day));
        assert_eq!(ScreeningDay::from_ymd(1, 1, 1).unwrap().ticks(), 0);
    }

    #[test]
    fn day_displays_british_order() {
        let day = ScreeningDay::from_ymd(2023, 9, 2).unwrap();
        assert_eq!(day.to_string(), "02/09/2023");
        assert_eq!(day.plus_days(30).to_string(), "02/10/2023");
    }
}
