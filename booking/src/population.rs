//! Quality-driven seat population.
//!
//! A brand-new screening gets a plausible crowd before anyone books: low
//! quality films stay nearly empty, high quality ones are nearly full. The
//! pseudo-random picks are seeded from the screening day, so the same
//! `(quality, day)` always produces the same occupancy.

use crate::codec::ScreeningWord;
use crate::types::{COLUMNS, ROWS, ScreeningDay};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Highest quality in the sparse band
const SPARSE_MAX_QUALITY: u8 = 7;

/// Lowest quality in the packed band (scores of 29.4 and above)
const PACKED_MIN_QUALITY: u8 = 30;

/// How a quality score shapes initial occupancy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopulationBand {
    /// Clear every seat, then occupy up to `quality` random seats
    Sparse {
        /// Random seats to occupy
        picks: u8,
    },
    /// Keep occupancy, then occupy up to `quality / 2` more random seats
    Moderate {
        /// Random seats to occupy
        picks: u8,
    },
    /// Occupy every seat, then free up to `quality % 8` random seats
    Packed {
        /// Random seats to free
        picks: u8,
    },
}

impl PopulationBand {
    /// Band for a quality score (masked to 0..=31)
    #[must_use]
    pub const fn for_quality(quality: u8) -> Self {
        let quality = quality & 0b1_1111;
        if quality <= SPARSE_MAX_QUALITY {
            Self::Sparse { picks: quality }
        } else if quality < PACKED_MIN_QUALITY {
            Self::Moderate { picks: quality / 2 }
        } else {
            Self::Packed { picks: quality % 8 }
        }
    }
}

/// Generator seed for a day: the high 32 bits of its midnight tick value
#[must_use]
#[allow(clippy::cast_sign_loss)] // ticks are never negative
pub fn seed_for(day: ScreeningDay) -> u64 {
    (day.ticks() >> 32) as u64
}

/// Applies the quality band of `word` to its seat bitmap
///
/// Picks are not deduplicated: a seat drawn twice counts once, so the number of
/// seats changed can fall short of the band's pick count. The sparse band clears
/// existing occupancy first, including seats merged in from the ledger.
#[must_use]
pub fn populate(word: ScreeningWord, day: ScreeningDay) -> ScreeningWord {
    let mut rng = StdRng::seed_from_u64(seed_for(day));
    let band = PopulationBand::for_quality(word.quality());

    let (start, picks, occupied) = match band {
        PopulationBand::Sparse { picks } => (word.clear_seats(), picks, true),
        PopulationBand::Moderate { picks } => (word, picks, true),
        PopulationBand::Packed { picks } => (word.fill_seats(), picks, false),
    };

    let populated = (0..picks).fold(start, |word, _| {
        let (row, col) = random_seat(&mut rng);
        word.encode_seat(row, col, occupied)
    });

    tracing::trace!(
        ?band,
        %day,
        available = populated.availability(),
        "populated screening"
    );
    populated
}

fn random_seat(rng: &mut StdRng) -> (u8, u8) {
    let col = rng.gen_range(0..COLUMNS);
    let row = rng.gen_range(0..ROWS);
    (row, col)
}
