//! Key/value view of a session for the UI collaborator.

use crate::session::{SessionState, Stage};
use crate::types::{COLUMNS, ROWS, Seat, TicketKind};
use std::fmt;

/// Seat under the cursor is in the selection
pub const STATUS_SELECTED: &str = "SELECTED";
/// Seat under the cursor belongs to someone else
pub const STATUS_BOOKED: &str = "ALREADY BOOKED";
/// Seat under the cursor can be selected
pub const STATUS_FREE: &str = "FREE SEATING";

/// Ordered key/value pairs describing what to show
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderFrame {
    entries: Vec<(String, String)>,
}

impl RenderFrame {
    fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Value for `key`, if the frame has one
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every entry, in display order
    #[must_use]
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Keys in display order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl fmt::Display for RenderFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.entries {
            writeln!(f, "{key}: {value}")?;
        }
        Ok(())
    }
}

/// Builds the frame for the current state
///
/// The summary keys are always present. Seat keys appear while seats or
/// tickets are being chosen, ticket keys from the ticket stage on.
#[must_use]
pub fn render(state: &SessionState) -> RenderFrame {
    let mut frame = RenderFrame::default();
    let word = state.screening.word();

    frame.push("stage", stage_name(state.stage));
    frame.push("title", title_case(state.screening.name()));
    frame.push("stars", word.star_rating_string());
    frame.push("age_rating", word.age_rating_label());
    frame.push("age_rating_color", word.age_rating_severity_color().as_str());
    frame.push("availability", availability_label(word.is_sold_out()));
    frame.push("seats_left", seats_left_label(word.availability()));
    frame.push("screen", format!("Screen {:>2}", word.screen_number()));
    frame.push("date", state.screening.day().to_string());

    if matches!(state.stage, Stage::ChoosingSeats | Stage::ChoosingTickets) {
        for row in 0..ROWS {
            frame.push(format!("seats.{}", row + 1), seat_row(state, row));
        }
        frame.push("cursor", state.cursor.to_string());
        frame.push("cursor_status", cursor_status(state));
        frame.push("selected", seat_list(&state.selected));
    }

    if matches!(state.stage, Stage::ChoosingTickets | Stage::Completed) {
        for kind in TicketKind::ALL {
            frame.push(
                format!("tickets.{}", kind.key()),
                state.tickets.count(kind).to_string(),
            );
        }
        frame.push("tickets.cursor", state.ticket_cursor.key());
        frame.push("total", state.total().to_string());
    }

    if let Some(receipt) = &state.receipt {
        frame.push("booked", seat_list(&receipt.seats));
        frame.push("persisted", receipt.persisted.to_string());
    }

    if let Some(notice) = state.notice {
        frame.push("notice", notice.to_string());
    }

    frame
}

/// Capitalises the first letter of every whitespace-separated word
#[must_use]
pub fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `"AVAILABLE SEATS"` or `"UNAVAILABLE SEATS"`
#[must_use]
pub const fn availability_label(sold_out: bool) -> &'static str {
    if sold_out {
        "UNAVAILABLE SEATS"
    } else {
        "AVAILABLE SEATS"
    }
}

/// `"1 Seat left"`, `"12 Seats left"`
#[must_use]
pub fn seats_left_label(available: u32) -> String {
    let plural = if available == 1 { "" } else { "s" };
    format!("{available} Seat{plural} left")
}

const fn stage_name(stage: Stage) -> &'static str {
    match stage {
        Stage::Overview => "overview",
        Stage::ChoosingSeats => "choosing_seats",
        Stage::ChoosingTickets => "choosing_tickets",
        Stage::Completed => "completed",
        Stage::Left => "left",
    }
}

fn cursor_status(state: &SessionState) -> &'static str {
    if state.is_selected(state.cursor) {
        STATUS_SELECTED
    } else if state.screening.is_occupied(state.cursor) {
        STATUS_BOOKED
    } else {
        STATUS_FREE
    }
}

/// One grid row: `0` selected, `X` occupied, `.` free
fn seat_row(state: &SessionState, row: u8) -> String {
    (0..COLUMNS)
        .map(|col| Seat::wrapping(row, col))
        .map(|seat| {
            if state.is_selected(seat) {
                '0'
            } else if state.screening.is_occupied(seat) {
                'X'
            } else {
                '.'
            }
        })
        .collect()
}

fn seat_list(seats: &[Seat]) -> String {
    seats
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_capitalises_each_word() {
        assert_eq!(title_case("thor: the dark world"), "Thor: The Dark World");
        assert_eq!(title_case("how i live"), "How I Live");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn seat_count_label_pluralises() {
        assert_eq!(seats_left_label(1), "1 Seat left");
        assert_eq!(seats_left_label(0), "0 Seats left");
        assert_eq!(seats_left_label(22), "22 Seats left");
    }

    #[test]
    fn availability_label_flips_when_sold_out() {
        assert_eq!(availability_label(false), "AVAILABLE SEATS");
        assert_eq!(availability_label(true), "UNAVAILABLE SEATS");
    }
}
