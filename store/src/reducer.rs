//! The Reducer trait — the single sanctioned mutation path.
//!
//! All state transitions go through a reducer: a pure function from
//! `(state, action, environment)` to effect descriptions, mutating state in
//! place. UI code never touches store state directly; it sends actions.

use crate::effect::Effect;
use smallvec::SmallVec;

/// Business logic for a store.
///
/// # Type Parameters
///
/// - `State`: the state this reducer operates on
/// - `Action`: the closed set of transitions it processes
/// - `Environment`: injected dependencies (clock, id generation, ...)
///
/// # Contract
///
/// `reduce` must complete the whole transition synchronously — the store
/// holds the write lock for the duration, so no observer ever sees a torn
/// state. Side effects are returned as [`Effect`] descriptions, never
/// performed inline.
///
/// # Example
///
/// ```ignore
/// impl Reducer for CounterReducer {
///     type State = CounterState;
///     type Action = CounterAction;
///     type Environment = CounterEnvironment;
///
///     fn reduce(
///         &self,
///         state: &mut CounterState,
///         action: CounterAction,
///         _env: &CounterEnvironment,
///     ) -> SmallVec<[Effect<CounterAction>; 4]> {
///         match action {
///             CounterAction::Increment => {
///                 state.count += 1;
///                 SmallVec::new()
///             }
///         }
///     }
/// }
/// ```
pub trait Reducer {
    /// The state type this reducer operates on.
    type State;

    /// The action type this reducer processes.
    type Action;

    /// The environment type with injected dependencies.
    type Environment;

    /// Apply `action` to `state`, returning effects to be executed.
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]>;
}
