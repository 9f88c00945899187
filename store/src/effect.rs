//! Side effect descriptions.
//!
//! Effects are values, not execution: reducers return descriptions of what
//! should happen and the [`Store`](crate::store::Store) runtime executes
//! them. This keeps reducers pure and makes every side effect assertable in
//! tests.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Key identifying a cancellable scheduled effect.
///
/// Callers choose the key — the UI store keys toast-dismiss timers by toast
/// id — so a later [`Effect::Cancel`] can target exactly that task.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EffectId(String);

impl EffectId {
    /// Create an effect id from a caller-chosen key.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EffectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EffectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A side effect description returned by a reducer.
///
/// # Type Parameters
///
/// - `Action`: the action type effects can feed back into the reducer
pub enum Effect<Action> {
    /// No-op effect.
    None,

    /// Arbitrary async computation.
    ///
    /// Returns `Option<Action>` — if `Some`, the action is fed back into
    /// the reducer.
    Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),

    /// Dispatch an action after a delay.
    Delay {
        /// How long to wait.
        duration: Duration,
        /// Action to dispatch after the delay.
        action: Box<Action>,
    },

    /// Run an effect under a cancellation key.
    ///
    /// The wrapped effect runs on its own task; a later
    /// [`Effect::Cancel`] with the same id aborts it if it has not
    /// completed yet.
    Cancellable {
        /// Cancellation key.
        id: EffectId,
        /// The effect to run.
        effect: Box<Effect<Action>>,
    },

    /// Abort the pending cancellable effect with this key.
    ///
    /// A no-op when nothing is pending under the key — cancelling an
    /// already-completed or already-cancelled effect is always safe.
    Cancel {
        /// Cancellation key.
        id: EffectId,
    },
}

impl<Action> Effect<Action> {
    /// An async computation whose resulting action (if any) feeds back into
    /// the reducer.
    #[must_use]
    pub fn future<F>(future: F) -> Self
    where
        F: Future<Output = Option<Action>> + Send + 'static,
    {
        Self::Future(Box::pin(future))
    }

    /// Dispatch `action` after `duration`.
    #[must_use]
    pub fn delay(duration: Duration, action: Action) -> Self {
        Self::Delay {
            duration,
            action: Box::new(action),
        }
    }

    /// Run `effect` under the cancellation key `id`.
    #[must_use]
    pub fn cancellable(id: impl Into<EffectId>, effect: Self) -> Self {
        Self::Cancellable {
            id: id.into(),
            effect: Box::new(effect),
        }
    }

    /// Abort the pending cancellable effect keyed by `id`.
    #[must_use]
    pub fn cancel(id: impl Into<EffectId>) -> Self {
        Self::Cancel { id: id.into() }
    }
}

// Manual Debug implementation since Future doesn't implement Debug
impl<Action> std::fmt::Debug for Effect<Action>
where
    Action: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::None => write!(f, "Effect::None"),
            Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            Effect::Delay { duration, action } => f
                .debug_struct("Effect::Delay")
                .field("duration", duration)
                .field("action", action)
                .finish(),
            Effect::Cancellable { id, effect } => f
                .debug_struct("Effect::Cancellable")
                .field("id", id)
                .field("effect", effect)
                .finish(),
            Effect::Cancel { id } => {
                f.debug_struct("Effect::Cancel").field("id", id).finish()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::panic)] // Test code can panic
    fn constructors_build_the_expected_variants() {
        let delay: Effect<u8> = Effect::delay(Duration::from_secs(1), 7);
        assert!(matches!(delay, Effect::Delay { .. }));

        let cancellable: Effect<u8> =
            Effect::cancellable("toast-1", Effect::delay(Duration::from_secs(5), 1));
        let Effect::Cancellable { id, effect } = cancellable else {
            panic!("expected cancellable");
        };
        assert_eq!(id.as_str(), "toast-1");
        assert!(matches!(*effect, Effect::Delay { .. }));

        let cancel: Effect<u8> = Effect::cancel("toast-1".to_owned());
        assert!(matches!(cancel, Effect::Cancel { id } if id.as_str() == "toast-1"));
    }

    #[test]
    fn debug_formats_without_exposing_futures() {
        let effect: Effect<u8> = Effect::future(async { None });
        assert_eq!(format!("{effect:?}"), "Effect::Future(<future>)");
    }
}
