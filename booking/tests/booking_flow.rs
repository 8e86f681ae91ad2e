//! End-to-end booking through a store, a real ledger file and a reload.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

use multiplex_booking::population::populate;
use multiplex_booking::{
    Direction, Ledger, Screening, ScreeningDay, ScreeningWord, Seat, SessionAction,
    SessionEnvironment, SessionReducer, SessionState, Stage,
};
use multiplex_core::store::Store;
use multiplex_testing::{init_test_tracing, test_clock, TempLedger};
use std::sync::Arc;

fn today() -> ScreeningDay {
    ScreeningDay::from_ymd(2023, 9, 28).unwrap()
}

/// Fresh "rush" at quality 10, populated for today
fn rush(ledger: &Ledger) -> Screening {
    let base = ScreeningWord::default().with_quality(10).clear_seats();
    Screening::seeded("rush", today(), base, ledger)
}

fn book(store: &mut Store<SessionState, SessionReducer, SessionEnvironment>, seats: &[Seat]) {
    store.send(SessionAction::BeginBooking).unwrap();
    let mut cursor = Seat::new(0, 0).unwrap();
    for seat in seats {
        while cursor.row() < seat.row() {
            store.send(SessionAction::MoveCursor(Direction::Down)).unwrap();
            cursor = Seat::new(cursor.row() + 1, cursor.col()).unwrap();
        }
        while cursor.row() > seat.row() {
            store.send(SessionAction::MoveCursor(Direction::Up)).unwrap();
            cursor = Seat::new(cursor.row() - 1, cursor.col()).unwrap();
        }
        while cursor.col() < seat.col() {
            store.send(SessionAction::MoveCursor(Direction::Right)).unwrap();
            cursor = Seat::new(cursor.row(), cursor.col() + 1).unwrap();
        }
        while cursor.col() > seat.col() {
            store.send(SessionAction::MoveCursor(Direction::Left)).unwrap();
            cursor = Seat::new(cursor.row(), cursor.col() - 1).unwrap();
        }
        store.send(SessionAction::ToggleSeat).unwrap();
    }
    store.send(SessionAction::ConfirmSeats).unwrap();
    store.send(SessionAction::AdjustTicket(Direction::Down)).unwrap();
    for _ in seats {
        store.send(SessionAction::AdjustTicket(Direction::Right)).unwrap();
    }
    store.send(SessionAction::ConfirmTickets).unwrap();
}

#[test]
fn quality_ten_rush_booking_is_saved_and_stable() {
    init_test_tracing();
    let file = TempLedger::empty().unwrap();
    let ledger = Ledger::load(file.path()).unwrap().into_handle();
    assert!(file.path().exists());

    let screening = rush(&ledger.borrow());
    let generated = populate(ScreeningWord::default().with_quality(10), today());
    assert_eq!(screening.word(), generated);

    // A1 and B3 are left free by the generator on this day
    let seats = [Seat::new(0, 0).unwrap(), Seat::new(1, 2).unwrap()];
    assert!(seats.iter().all(|seat| !screening.is_occupied(*seat)));
    assert_eq!(screening.word().availability(), 40);
    let bits: u64 = (1 << 2) | (1 << 13);

    let env = SessionEnvironment::new(Arc::new(test_clock()), ledger.clone(), file.path());
    let mut store = Store::new(SessionState::new(screening), SessionReducer::new(), env);
    book(&mut store, &seats);

    let state = store.into_state();
    assert_eq!(state.stage, Stage::Completed);
    let receipt = state.receipt.as_ref().unwrap();
    assert!(receipt.persisted);
    assert_eq!(receipt.overwrite, bits);
    assert_eq!(state.screening.word().raw(), generated.raw() | bits);

    // Only the booked seats go to the ledger
    let reloaded = Ledger::load(file.path()).unwrap();
    assert_eq!(reloaded.lookup("rush", today()), bits);
    assert_eq!(reloaded.lookup("rush", today().plus_days(1)), 0);

    // Regenerating for the same day keeps the booked seats
    let again = rush(&reloaded);
    assert_eq!(again.word().raw() & bits, bits);
    assert_eq!(again.word(), rush(&reloaded).word());
}

#[test]
fn second_booking_merges_into_the_same_day() {
    let file = TempLedger::empty().unwrap();
    let ledger = Ledger::load(file.path()).unwrap().into_handle();

    let word = ScreeningWord::default().with_quality(12);
    for seat in [Seat::new(2, 2).unwrap(), Seat::new(3, 5).unwrap()] {
        let screening = Screening::from_word("planes", word, today(), &ledger.borrow());
        let env = SessionEnvironment::new(Arc::new(test_clock()), ledger.clone(), file.path());
        let mut store = Store::new(SessionState::new(screening), SessionReducer::new(), env);
        book(&mut store, &[seat]);
        assert_eq!(store.state(|state| state.stage), Stage::Completed);
    }

    let reloaded = Ledger::load(file.path()).unwrap();
    assert_eq!(reloaded.stamps("planes").len(), 1);
    assert_eq!(reloaded.lookup("planes", today()), (1 << 22) | (1 << 34));
    assert_eq!(
        file.read().unwrap(),
        format!("planesX(<{}.{}>)\n", (1_u64 << 22) | (1 << 34), today().ticks())
    );
}

#[test]
fn aborted_session_leaves_ledger_untouched() {
    let file = TempLedger::with_contents("rushX(<4.638314560000000000>)\n").unwrap();
    let ledger = Ledger::load(file.path()).unwrap().into_handle();
    let screening = Screening::from_word("rush", ScreeningWord::default(), today(), &ledger.borrow());
    assert!(screening.is_occupied(Seat::new(0, 0).unwrap()));

    let env = SessionEnvironment::new(Arc::new(test_clock()), ledger.clone(), file.path());
    let mut store = Store::new(SessionState::new(screening), SessionReducer::new(), env);
    for action in [
        SessionAction::BeginBooking,
        SessionAction::MoveCursor(Direction::Right),
        SessionAction::ToggleSeat,
        SessionAction::ConfirmSeats,
        SessionAction::Cancel,
        SessionAction::Cancel,
        SessionAction::Leave,
    ] {
        store.send(action).unwrap();
    }

    assert_eq!(store.state(|state| state.stage), Stage::Left);
    assert_eq!(file.read().unwrap(), "rushX(<4.638314560000000000>)\n");
    assert_eq!(ledger.borrow().lookup("rush", today()), 4);
}
