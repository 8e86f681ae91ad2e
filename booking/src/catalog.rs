//! The films on the home page and how today's listing is picked.

use crate::codec::ScreeningWord;
use crate::ledger::Ledger;
use crate::screening::Screening;
use crate::types::ScreeningDay;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One seeded film
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Lowercase film name
    pub name: &'static str,
    /// Stored screening word
    pub word: ScreeningWord,
}

/// Films always on offer, in listing order
pub const CATALOG: [CatalogEntry; 5] = [
    CatalogEntry {
        name: "rush",
        word: ScreeningWord::from_signed(3_659_202_005_296_886),
    },
    CatalogEntry {
        name: "how i live",
        word: ScreeningWord::from_signed(3_377_701_360_956_074),
    },
    CatalogEntry {
        name: "thor: the dark world",
        word: ScreeningWord::from_signed(-961_972_275),
    },
    CatalogEntry {
        name: "filth",
        word: ScreeningWord::from_signed(-767_804_001),
    },
    CatalogEntry {
        name: "planes",
        word: ScreeningWord::from_signed(2_111_062_325_434_456),
    },
];

/// Today's listing: at most `limit` catalog entries, in catalog order
///
/// When the catalog holds more than `limit` films, entries are dropped at
/// random with a generator seeded by the day of the month, so the listing is
/// stable for a whole day.
#[must_use]
pub fn recommended(limit: usize, today: ScreeningDay) -> Vec<CatalogEntry> {
    let mut rng = StdRng::seed_from_u64(u64::from(today.day_of_month()));
    let mut picks = CATALOG.to_vec();
    while picks.len() > limit {
        let drop = rng.gen_range(0..picks.len());
        picks.remove(drop);
    }
    picks
}

/// Today's listing as screenings, with ledger bookings merged in
#[must_use]
pub fn recommended_screenings(limit: usize, today: ScreeningDay, ledger: &Ledger) -> Vec<Screening> {
    let listing: Vec<Screening> = recommended(limit, today)
        .into_iter()
        .map(|entry| Screening::from_word(entry.name, entry.word, today, ledger))
        .collect();
    tracing::debug!(films = listing.len(), %today, "built recommended listing");
    listing
}
