//! Packed screening word codec.
//!
//! A screening is one `u64`:
//!
//! ```text
//! bit 63                                                              bit 0
//! ┌──────────┬──────────┬─────────┬─────────────────────────────┬────────┐
//! │ unused 8 │ screen 4 │ quality │   seat bitmap (5 x 9 = 45)   │ age 2  │
//! │  56..63  │  52..55  │ 47..51  │            2..46             │  0..1  │
//! └──────────┴──────────┴─────────┴─────────────────────────────┴────────┘
//! ```
//!
//! Seat `(row, col)` lives at bit `2 + row * 9 + col`; a set bit means the seat
//! is occupied. The top byte holds leftover hash entropy and is never read.
//!
//! Only this module touches raw bits. Everything above it works with
//! [`ScreeningView`] or the accessor methods on [`ScreeningWord`].

use crate::types::{AgeRating, COLUMNS, SEAT_COUNT, Seat, SeverityColor};
use serde::{Deserialize, Serialize};
use std::fmt;

const AGE_MASK: u64 = 0b11;
const SEAT_SHIFT: u32 = 2;
const SEAT_FIELD: u64 = (1 << SEAT_COUNT) - 1;
/// Seat bitmap bits in place within a word
pub const SEAT_MASK: u64 = SEAT_FIELD << SEAT_SHIFT;
const QUALITY_SHIFT: u32 = 47;
const QUALITY_FIELD: u64 = 0b1_1111;
const SCREEN_SHIFT: u32 = 52;
const SCREEN_FIELD: u64 = 0b1111;
const UNUSED_MASK: u64 = 0xFF << 56;

/// Highest quality score
pub const MAX_QUALITY: u8 = 31;

const FILLED_STAR: char = '★';
const EMPTY_STAR: char = '☆';
const STARS: usize = 5;

/// One packed screening
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreeningWord(u64);

impl ScreeningWord {
    /// Wraps a raw word
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Reinterprets a signed catalog value as a word
    #[must_use]
    #[allow(clippy::cast_sign_loss)] // two's complement reinterpretation is the point
    pub const fn from_signed(raw: i64) -> Self {
        Self(raw as u64)
    }

    /// The raw word
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Mask with only one seat's bit set; row and col wrap mod 5 and mod 9
    #[must_use]
    pub const fn seat_bit(row: u8, col: u8) -> u64 {
        1_u64 << Seat::wrapping(row, col).bit_index()
    }

    /// Whether seat `(row, col)` is occupied
    ///
    /// `row` is reduced mod 5 and `col` mod 9 first, so out-of-range indexes
    /// wrap around rather than fail.
    #[must_use]
    pub const fn decode_seat(self, row: u8, col: u8) -> bool {
        self.0 & Self::seat_bit(row, col) != 0
    }

    /// Sets or clears seat `(row, col)`, with the same wraparound as [`Self::decode_seat`]
    #[must_use]
    pub const fn encode_seat(self, row: u8, col: u8, occupied: bool) -> Self {
        let bit = Self::seat_bit(row, col);
        if occupied {
            Self(self.0 | bit)
        } else {
            Self(self.0 & !bit)
        }
    }

    /// Whether `seat` is occupied
    #[must_use]
    pub const fn is_occupied(self, seat: Seat) -> bool {
        self.decode_seat(seat.row(), seat.col())
    }

    /// The 45 seat bits, in place (bits 2..=46)
    #[must_use]
    pub const fn seat_bitmap(self) -> u64 {
        self.0 & SEAT_MASK
    }

    /// ORs seat bits into the word; bits outside the seat field are ignored
    #[must_use]
    pub const fn merge_seats(self, seats: u64) -> Self {
        Self(self.0 | (seats & SEAT_MASK))
    }

    /// Marks every seat occupied
    #[must_use]
    pub const fn fill_seats(self) -> Self {
        Self(self.0 | SEAT_MASK)
    }

    /// Marks every seat free
    #[must_use]
    pub const fn clear_seats(self) -> Self {
        Self(self.0 & !SEAT_MASK)
    }

    /// Seats still free
    #[must_use]
    pub const fn availability(self) -> u32 {
        SEAT_COUNT - self.seat_bitmap().count_ones()
    }

    /// True when all 45 seats are occupied
    #[must_use]
    pub const fn is_sold_out(self) -> bool {
        self.seat_bitmap() == SEAT_MASK
    }

    /// Decoded age rating
    #[must_use]
    pub const fn age_rating(self) -> Option<AgeRating> {
        AgeRating::from_bits(self.0 & AGE_MASK)
    }

    /// Age rating label, or `""` for an unrecognised field value
    #[must_use]
    pub const fn age_rating_label(self) -> &'static str {
        match self.age_rating() {
            Some(rating) => rating.label(),
            None => "",
        }
    }

    /// Age rating colour, or [`SeverityColor::Neutral`] for an unrecognised field value
    #[must_use]
    pub const fn age_rating_severity_color(self) -> SeverityColor {
        match self.age_rating() {
            Some(rating) => rating.severity(),
            None => SeverityColor::Neutral,
        }
    }

    /// Quality score, 0..=31
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // masked to five bits
    pub const fn quality(self) -> u8 {
        ((self.0 >> QUALITY_SHIFT) & QUALITY_FIELD) as u8
    }

    /// Screen number as displayed (field value + 1, so 1..=16)
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // masked to four bits
    pub const fn screen_number(self) -> u8 {
        ((self.0 >> SCREEN_SHIFT) & SCREEN_FIELD) as u8 + 1
    }

    /// Replaces the age rating
    #[must_use]
    pub const fn with_age_rating(self, rating: AgeRating) -> Self {
        Self((self.0 & !AGE_MASK) | rating.bits())
    }

    /// Replaces the quality, reduced mod 32
    #[must_use]
    pub const fn with_quality(self, quality: u8) -> Self {
        let field = (quality as u64) & QUALITY_FIELD;
        Self((self.0 & !(QUALITY_FIELD << QUALITY_SHIFT)) | (field << QUALITY_SHIFT))
    }

    /// Replaces the screen field (0-based, reduced mod 16)
    #[must_use]
    pub const fn with_screen(self, screen: u8) -> Self {
        let field = (screen as u64) & SCREEN_FIELD;
        Self((self.0 & !(SCREEN_FIELD << SCREEN_SHIFT)) | (field << SCREEN_SHIFT))
    }

    /// `floor(5 * quality / 32)` filled stars followed by empty ones, always 5 glyphs
    #[must_use]
    pub fn star_rating_string(self) -> String {
        let filled = STARS * usize::from(self.quality()) / 32;
        std::iter::repeat_n(FILLED_STAR, filled)
            .chain(std::iter::repeat_n(EMPTY_STAR, STARS - filled))
            .collect()
    }

    /// Decoded view of the semantic fields
    #[must_use]
    pub const fn view(self) -> ScreeningView {
        ScreeningView::decode(self)
    }

    /// Writes a view's fields, keeping the unused top byte of this word
    #[must_use]
    pub const fn apply(self, view: &ScreeningView) -> Self {
        Self((self.0 & UNUSED_MASK) | view.encode().0)
    }
}

impl fmt::Debug for ScreeningWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScreeningWord({:#018x})", self.0)
    }
}

impl From<u64> for ScreeningWord {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<ScreeningWord> for u64 {
    fn from(word: ScreeningWord) -> Self {
        word.0
    }
}

/// Plain record form of a screening word
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningView {
    /// Age rating
    pub age_rating: AgeRating,
    /// Occupied seats, bit `row * 9 + col` (not shifted into word position)
    pub seats: u64,
    /// Quality score, 0..=31
    pub quality: u8,
    /// Screen field, 0-based (displayed as `screen + 1`)
    pub screen: u8,
}

impl ScreeningView {
    /// Decodes a word
    #[must_use]
    pub const fn decode(word: ScreeningWord) -> Self {
        Self {
            age_rating: match word.age_rating() {
                Some(rating) => rating,
                None => AgeRating::U,
            },
            seats: word.seat_bitmap() >> SEAT_SHIFT,
            quality: word.quality(),
            screen: word.screen_number() - 1,
        }
    }

    /// Encodes into a word with the unused byte zeroed
    #[must_use]
    pub const fn encode(&self) -> ScreeningWord {
        ScreeningWord(self.age_rating.bits())
            .merge_seats((self.seats & SEAT_FIELD) << SEAT_SHIFT)
            .with_quality(self.quality)
            .with_screen(self.screen)
    }

    /// Occupied seats, row by row
    pub fn occupied(&self) -> impl Iterator<Item = Seat> + '_ {
        Seat::all().filter(|seat| {
            let index = u32::from(seat.row()) * u32::from(COLUMNS) + u32::from(seat.col());
            self.seats & (1_u64 << index) != 0
        })
    }
}
