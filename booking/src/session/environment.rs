//! Dependencies injected into the session reducer.

use crate::ledger::LedgerHandle;
use multiplex_core::environment::Clock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Clock, shared ledger and the file the ledger is saved to
#[derive(Clone)]
pub struct SessionEnvironment {
    clock: Arc<dyn Clock>,
    ledger: LedgerHandle,
    ledger_path: PathBuf,
}

impl SessionEnvironment {
    /// Creates an environment
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ledger: LedgerHandle, ledger_path: impl Into<PathBuf>) -> Self {
        Self {
            clock,
            ledger,
            ledger_path: ledger_path.into(),
        }
    }

    /// Clock used to stamp receipts
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Shared booking ledger
    #[must_use]
    pub const fn ledger(&self) -> &LedgerHandle {
        &self.ledger
    }

    /// Where the ledger is saved
    #[must_use]
    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }
}

impl std::fmt::Debug for SessionEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEnvironment")
            .field("ledger_films", &self.ledger.try_borrow().map(|ledger| ledger.len()).ok())
            .field("ledger_path", &self.ledger_path)
            .finish_non_exhaustive()
    }
}
