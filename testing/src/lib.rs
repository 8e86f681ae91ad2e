//! # Multiplex Testing
//!
//! Testing utilities and helpers for the Multiplex booking workspace.
//!
//! This crate provides:
//! - A deterministic [`Clock`] implementation
//! - A Given-When-Then harness for reducers
//! - Temporary ledger files
//! - proptest strategies for seats, words and ledger contents
//!
//! ## Example
//!
//! ```
//! use multiplex_testing::{test_clock, TempLedger};
//! use multiplex_core::environment::Clock;
//!
//! let ledger = TempLedger::with_contents("rushX(<4.0>)\n").unwrap();
//! assert!(ledger.path().exists());
//! assert_eq!(test_clock().now().to_rfc3339(), "2023-09-28T14:30:00+00:00");
//! ```

use chrono::{DateTime, Utc};
use multiplex_core::environment::Clock;


pub use reducer_test::{assertions, ReducerTest};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use chrono::TimeZone;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use multiplex_testing::mocks::FixedClock;
    /// use multiplex_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }

        /// Fixed clock at a UTC wall-clock time
        ///
        /// # Panics
        ///
        /// Panics if the components do not form a valid time.
        #[must_use]
        #[allow(clippy::expect_used)]
        pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
            Self::new(
                Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
                    .single()
                    .expect("test clock components should form a valid time"),
            )
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Default fixed clock for tests: 2023-09-28 14:30 UTC, mid-afternoon on a
    /// Thursday
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::at(2023, 9, 28, 14, 30)
    }
}

/// Test helpers and utilities
pub mod helpers {
    use std::io;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Ledger file name inside a [`TempLedger`] directory
    pub const LEDGER_FILE_NAME: &str = "CACHE";

    /// A ledger path inside a private temporary directory
    ///
    /// The directory and everything in it is removed on drop.
    #[derive(Debug)]
    pub struct TempLedger {
        dir: TempDir,
        path: PathBuf,
    }

    impl TempLedger {
        /// A path where no ledger file exists yet
        ///
        /// # Errors
        ///
        /// Returns an error if the temporary directory cannot be created.
        pub fn empty() -> io::Result<Self> {
            let dir = tempfile::tempdir()?;
            let path = dir.path().join(LEDGER_FILE_NAME);
            Ok(Self { dir, path })
        }

        /// A ledger file pre-filled with `contents`
        ///
        /// # Errors
        ///
        /// Returns an error if the directory or file cannot be written.
        pub fn with_contents(contents: impl AsRef<[u8]>) -> io::Result<Self> {
            let ledger = Self::empty()?;
            std::fs::write(&ledger.path, contents)?;
            Ok(ledger)
        }

        /// The ledger file path
        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        /// The enclosing temporary directory
        #[must_use]
        pub fn dir(&self) -> &Path {
            self.dir.path()
        }

        /// Current file contents
        ///
        /// # Errors
        ///
        /// Returns an error if the file is missing or not UTF-8.
        pub fn read(&self) -> io::Result<String> {
            std::fs::read_to_string(&self.path)
        }
    }

    /// Installs a test-writer tracing subscriber once per process
    ///
    /// Honours `RUST_LOG`; later calls are no-ops.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::collection::{btree_map, vec};
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    /// Ticks in one day
    const TICKS_PER_DAY: i64 = 864_000_000_000;

    /// Midnight of 2000-01-01 in ticks
    const TICKS_2000: i64 = 630_822_816_000_000_000;

    /// Any `(row, col)` inside the 5x9 grid
    pub fn seat_position() -> impl Strategy<Value = (u8, u8)> {
        (0_u8..5, 0_u8..9)
    }

    /// Any word, including garbage in the unused top byte
    pub fn raw_word() -> impl Strategy<Value = u64> {
        any::<u64>()
    }

    /// Any 45-bit seat bitmap, already shifted into word position
    pub fn seat_bits() -> impl Strategy<Value = u64> {
        (0_u64..(1 << 45)).prop_map(|bits| bits << 2)
    }

    /// Lowercase film names free of the ledger's delimiter characters
    pub fn film_name() -> impl Strategy<Value = String> {
        "[a-wyz][a-wyz0-9 :']{0,20}"
    }

    /// Midnight tick values from 2000 onward, over roughly a century
    pub fn midnight_ticks() -> impl Strategy<Value = i64> {
        (0_i64..36_500).prop_map(|days| TICKS_2000 + days * TICKS_PER_DAY)
    }

    /// A whole ledger: film name to distinct `(ticks, seat bits)` stamps
    pub fn ledger_contents() -> impl Strategy<Value = BTreeMap<String, BTreeMap<i64, u64>>> {
        btree_map(
            film_name(),
            btree_map(midnight_ticks(), seat_bits().prop_filter("non-empty", |b| *b != 0), 1..4),
            0..6,
        )
    }

    /// Short ordered selections of distinct seats
    pub fn seat_selection() -> impl Strategy<Value = Vec<(u8, u8)>> {
        vec(seat_position(), 1..6).prop_map(|mut seats| {
            let mut seen = std::collections::BTreeSet::new();
            seats.retain(|seat| seen.insert(*seat));
            seats
        })
    }
}

// Re-export commonly used items
pub use helpers::{init_test_tracing, TempLedger};
pub use mocks::{FixedClock, test_clock};
