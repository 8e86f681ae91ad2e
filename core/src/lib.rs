//! # Multiplex Core
//!
//! Core traits and types for the Multiplex booking architecture.
//!
//! Business logic is written as reducers: pure functions that take the current
//! state and an action, mutate the state in place and describe any side effects
//! as values. A synchronous [`store::Store`] owns the state and runs those
//! effects, feeding resulting actions back into the reducer.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature
//! - **Action**: All possible inputs to a reducer (user intents and feedback)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Example
//!
//! ```
//! use multiplex_core::{effect::Effect, reducer::Reducer, smallvec, store::Store, SmallVec};
//!
//! struct Counter;
//!
//! impl Reducer for Counter {
//!     type State = u32;
//!     type Action = ();
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut u32, _action: (), _env: &()) -> SmallVec<[Effect<()>; 4]> {
//!         *state += 1;
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut store = Store::new(0, Counter, ());
//! store.send(()).unwrap();
//! assert_eq!(store.state(|count| *count), 1);
//! ```

pub use smallvec::{smallvec, SmallVec};

/// Error types for the Store runtime
pub mod error;

/// Synchronous Store runtime
pub mod store;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the store. They are values,
/// returned from reducers, and only run when the store executes them.
pub mod effect {
    /// Error produced by a failing [`Effect::Run`] task.
    pub type TaskError = Box<dyn std::error::Error + Send + Sync>;

    /// Deferred synchronous computation carried by [`Effect::Run`].
    ///
    /// Returning `Ok(Some(action))` feeds `action` back into the reducer.
    pub type Task<Action> = Box<dyn FnOnce() -> Result<Option<Action>, TaskError>>;

    /// Effect type - describes a side effect to be executed
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects one after another
        Sequential(Vec<Effect<Action>>),

        /// Feed an action straight back into the reducer
        Send(Box<Action>),

        /// Run a task (typically I/O) and feed its resulting action back
        Run(Task<Action>),
    }

    // Manual Debug implementation since tasks don't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Send(action) => f.debug_tuple("Effect::Send").field(action).finish(),
                Effect::Run(_) => write!(f, "Effect::Run(<task>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Wrap a closure as a [`Effect::Run`] task
        #[must_use]
        pub fn run<F>(task: F) -> Effect<Action>
        where
            F: FnOnce() -> Result<Option<Action>, TaskError> + 'static,
        {
            Effect::Run(Box::new(task))
        }

        /// Returns true if this is [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use multiplex_core::environment::{Clock, SystemClock};
    ///
    /// let now = SystemClock.now();
    /// assert!(now.timestamp() > 0);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
