//! Multiplex booking demo
//!
//! Loads the ledger, prints today's listing, then books seats for one film by
//! driving a session the way a terminal front end would.
//!
//! # Usage
//!
//! ```bash
//! # Book the first listed film
//! cargo run --bin multiplex
//!
//! # Book a film by name, three days from now
//! cargo run --bin multiplex -- "thor: the dark world" 3
//! ```

use multiplex_booking::{
    catalog, search, BookingWindow, Config, Direction, Ledger, Screening, ScreeningDay, Seat,
    SessionAction, SessionEnvironment, SessionReducer, SessionState, Stage,
};
use multiplex_core::environment::{Clock, SystemClock};
use multiplex_core::store::Store;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Seats the demo books
const DEMO_SEATS: usize = 2;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("multiplex_booking={}", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        ledger_path = %config.ledger_path.display(),
        recommended_limit = config.recommended_limit,
        booking_window_days = config.booking_window_days,
        "Configuration loaded"
    );

    let clock = Arc::new(SystemClock);
    let today = ScreeningDay::from_datetime(clock.now());
    let ledger = Ledger::load(&config.ledger_path)?.into_handle();

    println!("\n🎬 ============================================");
    println!("   Aquinas Multiplex - We are showing today:");
    println!("============================================\n");

    let listing = catalog::recommended_screenings(config.recommended_limit, today, &ledger.borrow());
    for (index, screening) in listing.iter().enumerate() {
        let word = screening.word();
        println!(
            "  {}. {:<24} {}  {:>3}  {}",
            index + 1,
            multiplex_booking::session::render::title_case(screening.name()),
            word.star_rating_string(),
            word.age_rating_label(),
            multiplex_booking::session::render::seats_left_label(word.availability()),
        );
    }
    println!();

    let mut args = std::env::args().skip(1);
    let screening = match args.next() {
        Some(raw) => {
            let name = search::normalize_film_name(&raw)?;
            let window = BookingWindow::new(today, config.booking_window_days);
            let offset = args.next().and_then(|s| s.parse().ok()).unwrap_or(0);
            let day = window.clamp(today.plus_days(offset));
            Screening::generate(&name, day, &ledger.borrow())
        },
        None => match listing.into_iter().next() {
            Some(screening) => screening,
            None => return Err("nothing is showing today".into()),
        },
    };

    let env = SessionEnvironment::new(clock, ledger.clone(), config.ledger_path.clone());
    let mut store = Store::new(SessionState::new(screening), SessionReducer::new(), env);

    for action in script(&store.state(Clone::clone)) {
        store.send(action)?;
    }

    let state = store.into_state();
    println!("{}", multiplex_booking::render(&state));

    match (&state.stage, &state.receipt) {
        (Stage::Completed, Some(receipt)) => {
            println!("✅ Booked {} seat(s) for £{}. Enjoy the film!", receipt.seats.len(), receipt.total);
        },
        _ => println!("⚠️  No booking was made"),
    }

    Ok(())
}

/// Keystrokes that book the first free seats with adult tickets
fn script(state: &SessionState) -> Vec<SessionAction> {
    let targets: Vec<Seat> = Seat::all()
        .filter(|seat| !state.screening.is_occupied(*seat))
        .take(DEMO_SEATS)
        .collect();

    let mut actions = vec![SessionAction::BeginBooking];
    let mut cursor = state.cursor;
    for target in &targets {
        actions.extend(moves(cursor, *target));
        actions.push(SessionAction::ToggleSeat);
        cursor = *target;
    }
    actions.push(SessionAction::ConfirmSeats);
    actions.push(SessionAction::AdjustTicket(Direction::Down));
    actions.extend(targets.iter().map(|_| SessionAction::AdjustTicket(Direction::Right)));
    actions.push(SessionAction::ConfirmTickets);
    actions
}

fn moves(from: Seat, to: Seat) -> impl Iterator<Item = SessionAction> {
    let vertical = if to.row() >= from.row() { Direction::Down } else { Direction::Up };
    let horizontal = if to.col() >= from.col() { Direction::Right } else { Direction::Left };
    let rows = usize::from(to.row().abs_diff(from.row()));
    let cols = usize::from(to.col().abs_diff(from.col()));
    std::iter::repeat_n(SessionAction::MoveCursor(vertical), rows)
        .chain(std::iter::repeat_n(SessionAction::MoveCursor(horizontal), cols))
}
