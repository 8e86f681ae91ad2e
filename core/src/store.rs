//! The Store owns state, reducer and environment, and runs the
//! action → reducer → effects → action feedback loop.
//!
//! Everything runs on the caller's thread: `send` returns once the queue of
//! feedback actions has drained or an effect has failed.

use crate::effect::Effect;
use crate::error::StoreError;
use crate::reducer::Reducer;
use std::collections::VecDeque;

/// Upper bound on actions processed by one `send`
pub const MAX_FEEDBACK_ACTIONS: usize = 1024;

/// The Store runtime
///
/// # Example
///
/// ```ignore
/// let mut store = Store::new(initial_state, my_reducer, environment);
///
/// store.send(Action::DoSomething)?;
///
/// let value = store.state(|s| s.some_field);
/// ```
pub struct Store<S, R, E> {
    state: S,
    reducer: R,
    environment: E,
}

impl<S, R, E> Store<S, R, E>
where
    R: Reducer<State = S, Environment = E>,
{
    /// Create a new store
    #[must_use]
    pub const fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self {
            state: initial_state,
            reducer,
            environment,
        }
    }

    /// Send an action through the reducer and execute resulting effects
    ///
    /// # Errors
    ///
    /// - [`StoreError::EffectFailed`]: a `Run` task returned an error
    /// - [`StoreError::FeedbackOverflow`]: more than [`MAX_FEEDBACK_ACTIONS`] actions were queued
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub fn send(&mut self, action: R::Action) -> Result<(), StoreError> {
        let mut queue = VecDeque::from([action]);
        let mut processed = 0usize;

        while let Some(action) = queue.pop_front() {
            processed += 1;
            if processed > MAX_FEEDBACK_ACTIONS {
                return Err(StoreError::FeedbackOverflow(MAX_FEEDBACK_ACTIONS));
            }

            let effects = self
                .reducer
                .reduce(&mut self.state, action, &self.environment);

            for effect in effects {
                Self::execute(effect, &mut queue)?;
            }
        }

        tracing::trace!(processed, "store drained");
        Ok(())
    }

    fn execute(
        effect: Effect<R::Action>,
        queue: &mut VecDeque<R::Action>,
    ) -> Result<(), StoreError> {
        match effect {
            Effect::None => Ok(()),
            Effect::Sequential(effects) => {
                for effect in effects {
                    Self::execute(effect, queue)?;
                }
                Ok(())
            },
            Effect::Send(action) => {
                queue.push_back(*action);
                Ok(())
            },
            Effect::Run(task) => match task() {
                Ok(Some(action)) => {
                    queue.push_back(action);
                    Ok(())
                },
                Ok(None) => Ok(()),
                Err(error) => {
                    tracing::error!(%error, "effect task failed");
                    Err(StoreError::EffectFailed(error))
                },
            },
        }
    }

    /// Read state through a projection function
    pub fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        f(&self.state)
    }

    /// Access the injected environment
    pub const fn environment(&self) -> &E {
        &self.environment
    }

    /// Consume the store, returning its final state
    pub fn into_state(self) -> S {
        self.state
    }
}
