use crate::effect::TaskError;
use thiserror::Error;

/// Errors that can occur during Store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// An effect task failed
    ///
    /// The failure halts the current `send` so the caller sees it; the state
    /// changes already applied by the reducer are kept.
    #[error("Effect execution failed: {0}")]
    EffectFailed(#[source] TaskError),

    /// Too many feedback actions were produced by a single `send`
    ///
    /// Guards against reducers that keep re-sending actions to themselves.
    #[error("Feedback loop exceeded {0} actions")]
    FeedbackOverflow(usize),
}
