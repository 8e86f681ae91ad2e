//! Property tests for the codec, ledger, pricing and population.
//!
//! Covers:
//! - seat encode/decode touches one bit and leaves the rest of the word alone
//! - availability stays in 0..=45 and is 45 exactly when no seat is taken
//! - saving then loading a ledger preserves every lookup
//! - `merge_add` is idempotent and order-independent
//! - population is a pure function of quality and day

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

use multiplex_booking::codec::SEAT_MASK;
use multiplex_booking::population::populate;
use multiplex_booking::pricing;
use multiplex_booking::{Ledger, ScreeningDay, ScreeningWord, Seat};
use multiplex_testing::properties::{
    ledger_contents, midnight_ticks, raw_word, seat_bits, seat_position, seat_selection,
};
use multiplex_testing::TempLedger;
use proptest::prelude::*;

fn day(ticks: i64) -> ScreeningDay {
    ScreeningDay::from_ticks(ticks).unwrap()
}

proptest! {
    #[test]
    fn seat_round_trip_touches_only_that_seat(word in raw_word(), (row, col) in seat_position(), occupied: bool) {
        let word = ScreeningWord::new(word);
        let written = word.encode_seat(row, col, occupied);
        prop_assert_eq!(written.decode_seat(row, col), occupied);
        let bit = ScreeningWord::seat_bit(row, col);
        prop_assert_eq!(written.raw() & !bit, word.raw() & !bit);
    }

    #[test]
    fn availability_is_bounded(word in raw_word()) {
        let word = ScreeningWord::new(word);
        let available = word.availability();
        prop_assert!(available <= 45);
        prop_assert_eq!(available == 45, word.raw() & SEAT_MASK == 0);
        prop_assert_eq!(available == 0, word.is_sold_out());
    }

    #[test]
    fn quality_is_always_masked(word in raw_word(), quality: u8) {
        let word = ScreeningWord::new(word).with_quality(quality);
        prop_assert_eq!(word.quality(), quality % 32);
        prop_assert_eq!(word.star_rating_string().chars().count(), 5);
    }

    #[test]
    fn ledger_save_load_preserves_lookups(contents in ledger_contents()) {
        let mut ledger = Ledger::new();
        for (film, stamps) in &contents {
            for (ticks, seats) in stamps {
                ledger.merge_add(film, day(*ticks), *seats);
            }
        }

        let file = TempLedger::empty().unwrap();
        ledger.save(file.path()).unwrap();
        let reloaded = Ledger::load(file.path()).unwrap();

        prop_assert_eq!(reloaded.len(), contents.len());
        for (film, stamps) in &contents {
            for (ticks, seats) in stamps {
                prop_assert_eq!(reloaded.lookup(film, day(*ticks)), *seats);
            }
        }
        prop_assert_eq!(reloaded.render(), ledger.render());
    }

    #[test]
    fn merge_add_is_idempotent(ticks in midnight_ticks(), seats in seat_bits()) {
        let mut ledger = Ledger::new();
        ledger.merge_add("rush", day(ticks), seats);
        let once = ledger.render();
        ledger.merge_add("rush", day(ticks), seats);
        prop_assert_eq!(ledger.render(), once);
        prop_assert_eq!(ledger.stamps("rush").len(), 1);
    }

    #[test]
    fn merge_add_order_does_not_matter(ticks in midnight_ticks(), a in seat_bits(), b in seat_bits()) {
        let mut forward = Ledger::new();
        forward.merge_add("filth", day(ticks), a);
        forward.merge_add("filth", day(ticks), b);

        let mut backward = Ledger::new();
        backward.merge_add("filth", day(ticks), b);
        backward.merge_add("filth", day(ticks), a);

        prop_assert_eq!(forward.lookup("filth", day(ticks)), a | b);
        prop_assert_eq!(backward.lookup("filth", day(ticks)), a | b);
    }

    #[test]
    fn population_is_deterministic(quality in 0_u8..32, ticks in midnight_ticks(), seats in seat_bits()) {
        let word = ScreeningWord::default().with_quality(quality).merge_seats(seats);
        let first = populate(word, day(ticks));
        prop_assert_eq!(first, populate(word, day(ticks)));
        prop_assert_eq!(first.raw() & !SEAT_MASK, word.raw() & !SEAT_MASK);
    }

    #[test]
    fn commit_marks_exactly_the_selection(word in raw_word(), selection in seat_selection()) {
        let seats: Vec<Seat> = selection
            .iter()
            .map(|&(row, col)| Seat::new(row, col).unwrap())
            .collect();
        let word = ScreeningWord::new(word);
        let commit = pricing::commit(&seats, word);

        prop_assert_eq!(commit.overwrite.count_ones() as usize, seats.len());
        prop_assert_eq!(commit.word.raw(), word.raw() | commit.overwrite);
        for seat in &seats {
            prop_assert!(commit.word.is_occupied(*seat));
        }
    }
}
