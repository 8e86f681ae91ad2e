//! The booking ledger: which seats have been sold for each film and day.
//!
//! # File format
//!
//! One line per film:
//!
//! ```text
//! rushX(<8196.638314560000000000><4.638315424000000000>)
//! ```
//!
//! The film name runs up to the first `X`; each `<seats.ticks>` group holds a
//! signed 64-bit seat bitmap and the day as ticks (100 ns since
//! 0001-01-01). Lines shorter than five characters are ignored. Groups are
//! scanned from one character *before* the `X`, so a name ending in `<` opens a
//! bogus group and the whole line is rejected.
//!
//! The ledger is only ever merged into: [`Ledger::merge_add`] ORs seat bits and
//! never clears them.

use crate::error::{BookingError, Result};
use crate::types::ScreeningDay;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::Path;
use std::rc::Rc;

/// Shortest line that can carry a booking
const MIN_LINE_LEN: usize = 5;

/// Terminates the film name on each line
const NAME_TERMINATOR: char = 'X';

/// Shared handle to the process-wide ledger
pub type LedgerHandle = Rc<RefCell<Ledger>>;

/// Seats booked for one film on one day
///
/// Ticks are kept exactly as read. A stamp off midnight is carried through
/// saves unchanged but never matches a lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStamp {
    /// Seat bits, in screening-word position
    pub seats: u64,
    /// Screening day as ticks
    pub ticks: i64,
}

impl LedgerStamp {
    /// Stamp for midnight of `day`
    #[must_use]
    pub fn new(seats: u64, day: ScreeningDay) -> Self {
        Self {
            seats,
            ticks: day.ticks(),
        }
    }

    /// The screening day, `None` unless the ticks fall exactly on midnight
    #[must_use]
    pub fn day(&self) -> Option<ScreeningDay> {
        ScreeningDay::from_ticks(self.ticks).filter(|day| day.ticks() == self.ticks)
    }
}

/// In-memory ledger, keyed by lowercase film name
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    entries: BTreeMap<String, Vec<LedgerStamp>>,
}

impl Ledger {
    /// Creates an empty ledger
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Wraps the ledger in a shared handle
    #[must_use]
    pub fn into_handle(self) -> LedgerHandle {
        Rc::new(RefCell::new(self))
    }

    /// Loads the ledger file at `path`
    ///
    /// A missing file is created empty. Bytes that are not valid UTF-8 are
    /// replaced with U+FFFD and the rest of the file is kept. Malformed lines
    /// are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Io`] if the file exists but cannot be read, or is
    /// missing and cannot be created.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read(path) {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                if matches!(text, Cow::Owned(_)) {
                    tracing::warn!(path = %path.display(), "ledger holds invalid UTF-8, replacing bad bytes");
                }
                let ledger = Self::parse(&text);
                tracing::info!(
                    path = %path.display(),
                    films = ledger.len(),
                    "ledger loaded"
                );
                Ok(ledger)
            },
            Err(error) if error.kind() == ErrorKind::NotFound => {
                std::fs::File::create(path)?;
                tracing::info!(path = %path.display(), "ledger created");
                Ok(Self::new())
            },
            Err(error) => Err(error.into()),
        }
    }

    /// Parses ledger text, skipping malformed lines
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut ledger = Self::new();
        for (index, line) in text.lines().enumerate() {
            match parse_line(index + 1, line) {
                Ok(Some((name, stamps))) => {
                    let mut merged = Vec::with_capacity(stamps.len());
                    for stamp in stamps {
                        merge_stamp(&mut merged, stamp);
                    }
                    if ledger.entries.insert(name.clone(), merged).is_some() {
                        tracing::debug!(film = %name, "duplicate ledger line replaces earlier one");
                    }
                },
                Ok(None) => {},
                Err(error) => tracing::warn!(%error, "skipping ledger line"),
            }
        }
        ledger
    }

    /// Writes the whole ledger to `path`, replacing its previous contents
    ///
    /// The text goes to a sibling temporary file first and is then renamed over
    /// `path`, so a failed save leaves the old file in place.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Io`] if the file cannot be written or renamed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let staging = staging_path(path);
        std::fs::write(&staging, self.render())?;
        std::fs::rename(&staging, path)?;
        tracing::info!(path = %path.display(), films = self.len(), "ledger saved");
        Ok(())
    }

    /// Serialises the ledger in file format
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, stamps) in &self.entries {
            if stamps.is_empty() {
                continue;
            }
            out.push_str(name);
            out.push(NAME_TERMINATOR);
            out.push('(');
            for stamp in stamps {
                // Seats are written as signed decimal
                #[allow(clippy::cast_possible_wrap)]
                let seats = stamp.seats as i64;
                out.push_str(&format!("<{seats}.{}>", stamp.ticks));
            }
            out.push_str(")\n");
        }
        out
    }

    /// Seats booked for `name` on `day`, or `0` when nothing is recorded
    #[must_use]
    pub fn lookup(&self, name: &str, day: ScreeningDay) -> u64 {
        self.entries
            .get(&name.to_lowercase())
            .and_then(|stamps| stamps.iter().find(|stamp| stamp.ticks == day.ticks()))
            .map_or(0, |stamp| stamp.seats)
    }

    /// ORs `seats` into the record for `name` on `day`, creating it if needed
    ///
    /// Returns the seats now recorded for that day.
    pub fn merge_add(&mut self, name: &str, day: ScreeningDay, seats: u64) -> u64 {
        let stamps = self.entries.entry(name.to_lowercase()).or_default();
        let merged = merge_stamp(stamps, LedgerStamp::new(seats, day));
        tracing::debug!(film = %name, %day, seats = merged, "ledger merged");
        merged
    }

    /// Films with at least one line in the ledger
    pub fn films(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Recorded days for one film, in insertion order
    #[must_use]
    pub fn stamps(&self, name: &str) -> &[LedgerStamp] {
        self.entries
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of films
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been booked
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn merge_stamp(stamps: &mut Vec<LedgerStamp>, incoming: LedgerStamp) -> u64 {
    if let Some(existing) = stamps.iter_mut().find(|stamp| stamp.ticks == incoming.ticks) {
        if existing.seats != incoming.seats {
            existing.seats |= incoming.seats;
        }
        existing.seats
    } else {
        stamps.push(incoming);
        incoming.seats
    }
}

fn staging_path(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().map(ToOwned::to_owned).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Parses one ledger line
///
/// `Ok(None)` for lines too short to matter.
pub(crate) fn parse_line(line_no: usize, line: &str) -> Result<Option<(String, Vec<LedgerStamp>)>> {
    if line.chars().count() < MIN_LINE_LEN {
        return Ok(None);
    }

    let malformed = |reason: &str| BookingError::MalformedLedgerLine {
        line: line_no,
        reason: reason.to_string(),
    };

    let terminator = line
        .find(NAME_TERMINATOR)
        .ok_or_else(|| malformed("missing name terminator"))?;
    let name = &line[..terminator];
    let region_start = name
        .char_indices()
        .next_back()
        .map(|(index, _)| index)
        .ok_or_else(|| malformed("empty film name"))?;

    let stamps = groups(&line[region_start..])
        .map(|group| parse_group(group).ok_or_else(|| malformed(&format!("bad group <{group}>"))))
        .collect::<Result<Vec<_>>>()?;

    if stamps.is_empty() {
        return Ok(None);
    }
    Ok(Some((name.to_lowercase(), stamps)))
}

/// Contents of each `<...>` group, left to right, non-overlapping
fn groups(region: &str) -> impl Iterator<Item = &str> {
    let mut rest = region;
    std::iter::from_fn(move || {
        let open = rest.find('<')?;
        let after = &rest[open + 1..];
        let close = after.find('>')?;
        let group = &after[..close];
        rest = &after[close + 1..];
        Some(group)
    })
}

fn parse_group(group: &str) -> Option<LedgerStamp> {
    let mut parts = group.split('.');
    let seats = parse_seats(parts.next()?)?;
    let ticks = parts.next()?.parse::<i64>().ok()?;
    Some(LedgerStamp { seats, ticks })
}

#[allow(clippy::cast_sign_loss)] // negative values are two's complement bitmaps
fn parse_seats(text: &str) -> Option<u64> {
    text.parse::<i64>()
        .map(|seats| seats as u64)
        .or_else(|_| text.parse::<u64>())
        .ok()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use multiplex_testing::TempLedger;

    fn day(d: u32) -> ScreeningDay {
        ScreeningDay::from_ymd(2023, 9, d).unwrap()
    }

    #[test]
    fn lookup_defaults_to_zero() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.lookup("rush", day(28)), 0);
        ledger.merge_add("rush", day(28), 1 << 2);
        assert_eq!(ledger.lookup("rush", day(29)), 0);
        assert_eq!(ledger.lookup("planes", day(28)), 0);
    }

    #[test]
    fn merge_add_ors_into_matching_day() {
        let mut ledger = Ledger::new();
        ledger.merge_add("Rush", day(28), 1 << 2);
        let merged = ledger.merge_add("rush", day(28), 1 << 13);
        assert_eq!(merged, (1 << 2) | (1 << 13));
        assert_eq!(ledger.lookup("RUSH", day(28)), merged);
        assert_eq!(ledger.stamps("rush").len(), 1);
    }

    #[test]
    fn merge_add_appends_new_days_in_order() {
        let mut ledger = Ledger::new();
        ledger.merge_add("filth", day(29), 4);
        ledger.merge_add("filth", day(28), 8);
        let days: Vec<Option<ScreeningDay>> =
            ledger.stamps("filth").iter().map(LedgerStamp::day).collect();
        assert_eq!(days, vec![Some(day(29)), Some(day(28))]);
    }

    #[test]
    fn render_matches_file_format() {
        let mut ledger = Ledger::new();
        ledger.merge_add("rush", day(28), 8196);
        ledger.merge_add("rush", day(29), 4);
        assert_eq!(
            ledger.render(),
            "rushX(<8196.638314560000000000><4.638315424000000000>)\n"
        );
    }

    #[test]
    fn parse_reads_rendered_text() {
        let text = "rushX(<8196.638314560000000000><4.638315424000000000>)\nfilthX(<-4.638314560000000000>)\n";
        let ledger = Ledger::parse(text);
        assert_eq!(ledger.lookup("rush", day(28)), 8196);
        assert_eq!(ledger.lookup("rush", day(29)), 4);
        assert_eq!(ledger.lookup("filth", day(28)), (-4_i64) as u64);
        assert_eq!(Ledger::parse(&ledger.render()), ledger);
    }

    #[test]
    fn short_and_malformed_lines_are_skipped() {
        let text = "abc\n\nnoterminator(<1.0>)\nrushX(<oops.0>)\nplanesX(<4.638314560000000000>)\n";
        let ledger = Ledger::parse(text);
        assert_eq!(ledger.films().collect::<Vec<_>>(), vec!["planes"]);
    }

    #[test]
    fn parse_line_reports_malformed_groups() {
        let err = parse_line(3, "rushX(<12>)").unwrap_err();
        assert!(matches!(err, BookingError::MalformedLedgerLine { line: 3, .. }));
        assert!(parse_line(1, "Xabc(<1.0>)").is_err());
        assert!(parse_line(1, "ab").unwrap().is_none());
    }

    #[test]
    fn group_scan_starts_one_character_before_terminator() {
        // A one-letter name still parses: the scan region is "aX(...)"
        let (name, stamps) = parse_line(1, "aX(<4.638314560000000000>)").unwrap().unwrap();
        assert_eq!(name, "a");
        assert_eq!(stamps[0].seats, 4);

        // A trailing '<' in the name is swallowed into the first group
        assert!(parse_line(1, "a<X(<4.638314560000000000>)").is_err());
    }

    #[test]
    fn duplicate_days_on_one_line_are_merged() {
        let ledger = Ledger::parse("rushX(<4.638314560000000000><8.638314560000000000>)\n");
        assert_eq!(ledger.stamps("rush").len(), 1);
        assert_eq!(ledger.lookup("rush", day(28)), 12);
    }

    #[test]
    fn off_midnight_ticks_survive_but_never_match() {
        let ticks = day(28).ticks() + 36_000_000_000;
        let text = format!("rushX(<4.{ticks}>)\n");
        let mut ledger = Ledger::parse(&text);
        assert_eq!(ledger.lookup("rush", day(28)), 0);
        assert_eq!(ledger.stamps("rush")[0].day(), None);

        ledger.merge_add("rush", day(28), 8);
        assert_eq!(ledger.lookup("rush", day(28)), 8);
        assert_eq!(
            ledger.render(),
            format!("rushX(<4.{ticks}><8.{}>)\n", day(28).ticks())
        );
    }

    #[test]
    fn invalid_utf8_keeps_the_other_lines() {
        let mut bytes = b"rushX(<4.638314560000000000>)\ncaf".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b"X(<8.638314560000000000>)\n");
        let file = TempLedger::with_contents(bytes).unwrap();

        let mut ledger = Ledger::load(file.path()).unwrap();
        assert_eq!(ledger.lookup("rush", day(28)), 4);
        assert_eq!(ledger.lookup("caf\u{FFFD}", day(28)), 8);

        ledger.merge_add("planes", day(28), 1 << 46);
        ledger.save(file.path()).unwrap();
        let reloaded = Ledger::load(file.path()).unwrap();
        assert_eq!(reloaded.lookup("rush", day(28)), 4);
        assert_eq!(reloaded.lookup("planes", day(28)), 1 << 46);
    }

    #[test]
    fn unreadable_path_propagates() {
        let file = TempLedger::empty().unwrap();
        let err = Ledger::load(file.dir()).unwrap_err();
        assert!(matches!(err, BookingError::Io(_)));
    }
}
