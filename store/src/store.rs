//! Store runtime: coordinates reducer execution and effect handling.

use crate::effect::{Effect, EffectId};
use crate::persist::{PersistedState, SlicePersistence, save_slice};
use crate::reducer::Reducer;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{RwLock, broadcast, watch};
use tokio::task::AbortHandle;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store is shutting down and not accepting new actions.
    #[error("Store is shutting down")]
    ShutdownInProgress,

    /// Shutdown timed out waiting for effects to complete.
    #[error("Shutdown timed out with {0} effects still running")]
    ShutdownTimeout(usize),

    /// Timed out waiting for an action's effects to complete.
    #[error("Timed out waiting for effects")]
    EffectWaitTimeout,
}

/// Handle for awaiting the effects spawned by one action.
///
/// Returned by [`Store::send`]. Waiting is only needed when a caller (or a
/// test) must observe the result of the action's effects; fire-and-forget is
/// the normal mode.
#[derive(Clone)]
pub struct EffectHandle {
    pending: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    fn new() -> (Self, EffectTracking) {
        let pending = Arc::new(AtomicUsize::new(0));
        let (notifier, completion) = watch::channel(());

        let handle = Self {
            pending: Arc::clone(&pending),
            completion,
        };
        let tracking = EffectTracking { pending, notifier };

        (handle, tracking)
    }

    /// A handle that is already complete.
    #[must_use]
    pub fn completed() -> Self {
        let (notifier, completion) = watch::channel(());
        let _ = notifier.send(());
        Self {
            pending: Arc::new(AtomicUsize::new(0)),
            completion,
        }
    }

    /// Wait until every effect spawned by the action has completed.
    pub async fn wait(&mut self) {
        while self.pending.load(Ordering::SeqCst) > 0 {
            let _ = self.completion.changed().await;
        }
    }

    /// Wait for effect completion with a timeout.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EffectWaitTimeout`] when the timeout elapses
    /// first.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::EffectWaitTimeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending", &self.pending.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: counts in-flight effects for one action and notifies waiters.
#[derive(Clone)]
struct EffectTracking {
    pending: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
}

impl EffectTracking {
    fn increment(&self) {
        self.pending.fetch_add(1, Ordering::SeqCst);
    }

    fn decrement(&self) {
        if self.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.notifier.send(());
        }
    }
}

/// Internal: RAII guard so the effect counter is decremented even when a
/// task panics or is aborted.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements the store-wide pending counter on drop.
struct PendingGuard(Arc<AtomicUsize>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

type PersistHook<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// The store — runtime coordinator for one reducer.
///
/// Holds state behind a write lock, runs the reducer to completion for each
/// action (mutations are atomic: no observer sees a half-applied action),
/// then executes the returned effects on background tasks. Actions produced
/// by effects feed back through [`Store::send`] and are broadcast to
/// observers.
///
/// Stores are plain values: construct one per feature, clone it where it
/// needs to be shared, and inject it where the UI needs it. There is no
/// ambient global instance, which is what lets every test build a fresh
/// store.
///
/// # Type Parameters
///
/// - `S`: state type
/// - `A`: action type
/// - `E`: environment type
/// - `R`: reducer implementation
///
/// # Example
///
/// ```ignore
/// let store = Store::new(CompetitionsState::default(), CompetitionsReducer, env);
///
/// store.send(CompetitionsAction::SetLoading { loading: true }).await?;
/// let loading = store.state(|s| s.loading).await;
/// ```
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
    shutdown: Arc<AtomicBool>,
    pending_effects: Arc<AtomicUsize>,
    /// Actions produced by effects, for observers (UI refresh triggers,
    /// loggers).
    action_broadcast: broadcast::Sender<A>,
    /// Full state after every mutation, for subscribers.
    state_watch: Arc<watch::Sender<S>>,
    /// Abort handles for pending cancellable effects, keyed by effect id.
    cancellations: Arc<Mutex<HashMap<EffectId, AbortHandle>>>,
    persist: Option<PersistHook<S>>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
    A: Send + Clone + 'static,
    E: Send + Sync + 'static,
{
    /// Create a store with initial state, reducer, and environment.
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        let (action_broadcast, _) = broadcast::channel(16);
        let (state_watch, _) = watch::channel(initial_state.clone());

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            shutdown: Arc::new(AtomicBool::new(false)),
            pending_effects: Arc::new(AtomicUsize::new(0)),
            action_broadcast,
            state_watch: Arc::new(state_watch),
            cancellations: Arc::new(Mutex::new(HashMap::new())),
            persist: None,
        }
    }

    /// Create a store whose whitelisted slice persists across sessions.
    ///
    /// Any previously-persisted slice is restored into `initial_state`
    /// before the store starts; after every action the current slice is
    /// written back synchronously. Persistence failures are logged and
    /// never fail the action — losing a saved filter beats losing the
    /// mutation.
    #[must_use]
    pub fn with_persistence(
        mut initial_state: S,
        reducer: R,
        environment: E,
        backend: Arc<dyn SlicePersistence>,
    ) -> Self
    where
        S: PersistedState,
    {
        match crate::persist::load_slice(backend.as_ref(), &mut initial_state) {
            Ok(found) => {
                tracing::debug!(key = S::KEY, found, "Restored persisted slice");
            },
            Err(error) => {
                tracing::warn!(key = S::KEY, %error, "Failed to restore persisted slice");
            },
        }

        let hook: PersistHook<S> = Arc::new(move |state: &S| {
            if let Err(error) = save_slice(backend.as_ref(), state) {
                tracing::warn!(key = S::KEY, %error, "Failed to persist slice");
            }
        });

        let mut store = Self::new(initial_state, reducer, environment);
        store.persist = Some(hook);
        store
    }

    /// Send an action through the reducer and execute its effects.
    ///
    /// The reducer runs under the state write lock; the returned handle
    /// resolves when all effects spawned by this action have completed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError>
    where
        R: Clone,
        E: Clone,
    {
        if self.shutdown.load(Ordering::Acquire) {
            tracing::warn!("Rejected action: store is shutting down");
            return Err(StoreError::ShutdownInProgress);
        }

        metrics::counter!("store.actions.total").increment(1);

        let (handle, tracking) = EffectHandle::new();

        let effects = {
            let mut state = self.state.write().await;

            let start = std::time::Instant::now();
            let effects = self.reducer.reduce(&mut state, action, &self.environment);
            metrics::histogram!("store.reducer.duration_seconds")
                .record(start.elapsed().as_secs_f64());

            // Publish and persist while still holding the lock, so
            // subscribers and the persisted slice see mutations in order.
            self.state_watch.send_replace(state.clone());
            if let Some(persist) = &self.persist {
                persist(&state);
            }

            effects
        };

        tracing::trace!("Reducer returned {} effects", effects.len());
        for effect in effects {
            self.execute_effect(effect, tracking.clone());
        }

        Ok(handle)
    }

    /// Read current state via a closure.
    ///
    /// The lock is released as soon as the closure returns:
    ///
    /// ```ignore
    /// let page = store.state(|s| s.current_page).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Subscribe to state snapshots.
    ///
    /// The receiver holds the latest state after every mutation; UI layers
    /// await `changed()` and re-render.
    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<S> {
        self.state_watch.subscribe()
    }

    /// Subscribe to actions produced by effects.
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
        self.action_broadcast.subscribe()
    }

    /// Whether a cancellable effect is still pending under `id`.
    #[must_use]
    pub fn has_pending(&self, id: &EffectId) -> bool {
        self.cancellations
            .lock()
            .map(|map| map.contains_key(id))
            .unwrap_or(false)
    }

    /// Stop accepting actions, abort pending cancellable effects, and wait
    /// for in-flight effects to finish.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] when effects are still
    /// running after `timeout`.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        self.shutdown.store(true, Ordering::Release);

        let aborted: Vec<AbortHandle> = match self.cancellations.lock() {
            Ok(mut map) => map.drain().map(|(_, handle)| handle).collect(),
            Err(_) => Vec::new(),
        };
        for handle in &aborted {
            handle.abort();
        }
        tracing::debug!(aborted = aborted.len(), "Aborted pending cancellable effects");

        let wait = async {
            while self.pending_effects.load(Ordering::SeqCst) > 0 {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        };
        tokio::time::timeout(timeout, wait)
            .await
            .map_err(|_| StoreError::ShutdownTimeout(self.pending_effects.load(Ordering::SeqCst)))
    }

    /// Arm the per-action and store-wide effect counters, returning guards
    /// that release them on drop.
    fn arm_guards(&self, tracking: EffectTracking) -> (DecrementGuard, PendingGuard) {
        tracking.increment();
        self.pending_effects.fetch_add(1, Ordering::SeqCst);
        (
            DecrementGuard(tracking),
            PendingGuard(Arc::clone(&self.pending_effects)),
        )
    }

    /// Execute one effect description.
    ///
    /// Effects run on spawned tasks; [`DecrementGuard`] keeps the handle
    /// accurate even when a task panics or is aborted.
    fn execute_effect(&self, effect: Effect<A>, tracking: EffectTracking)
    where
        R: Clone,
        E: Clone,
    {
        match effect {
            Effect::None => {
                metrics::counter!("store.effects.executed", "type" => "none").increment(1);
            },
            Effect::Future(future) => {
                metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                let (guard, pending_guard) = self.arm_guards(tracking);
                let store = self.clone();

                tokio::spawn(async move {
                    // Guards are moved in, so dropping the task at any
                    // point — even before its first poll — releases them.
                    let (_guard, _pending_guard) = (guard, pending_guard);

                    if let Some(action) = future.await {
                        store.feed_back(action).await;
                    }
                });
            },
            Effect::Delay { duration, action } => {
                metrics::counter!("store.effects.executed", "type" => "delay").increment(1);
                let (guard, pending_guard) = self.arm_guards(tracking);
                let store = self.clone();

                tokio::spawn(async move {
                    let (_guard, _pending_guard) = (guard, pending_guard);

                    tokio::time::sleep(duration).await;
                    store.feed_back(*action).await;
                });
            },
            Effect::Cancellable { id, effect } => {
                metrics::counter!("store.effects.executed", "type" => "cancellable").increment(1);
                let (guard, pending_guard) = self.arm_guards(tracking);
                let store = self.clone();
                let cancellations = Arc::clone(&self.cancellations);
                let task_id = id.clone();

                let task = tokio::spawn(async move {
                    let (_guard, _pending_guard) = (guard, pending_guard);

                    store.run_scoped(*effect).await;

                    // Natural completion: forget our own abort handle.
                    if let Ok(mut map) = store.cancellations.lock() {
                        map.remove(&task_id);
                    }
                });

                if let Ok(mut map) = cancellations.lock() {
                    // A second effect under the same key replaces the first;
                    // the superseded timer is aborted.
                    if let Some(previous) = map.insert(id, task.abort_handle()) {
                        previous.abort();
                    }
                }
            },
            Effect::Cancel { id } => {
                metrics::counter!("store.effects.executed", "type" => "cancel").increment(1);
                let pending = self
                    .cancellations
                    .lock()
                    .ok()
                    .and_then(|mut map| map.remove(&id));
                match pending {
                    Some(handle) => {
                        handle.abort();
                        tracing::trace!(%id, "Cancelled pending effect");
                    },
                    // Cancelling nothing is a no-op: the effect already
                    // completed or was never scheduled.
                    None => tracing::trace!(%id, "Cancel target not pending"),
                }
            },
        }
    }

    /// Run an effect inside a cancellation scope, inline on the current
    /// task so aborting the task aborts the effect.
    async fn run_scoped(&self, effect: Effect<A>)
    where
        R: Clone,
        E: Clone,
    {
        match effect {
            Effect::None => {},
            Effect::Future(future) => {
                if let Some(action) = future.await {
                    self.feed_back(action).await;
                }
            },
            Effect::Delay { duration, action } => {
                tokio::time::sleep(duration).await;
                self.feed_back(*action).await;
            },
            Effect::Cancellable { effect, .. } => {
                // Nested scopes are flattened into the outer key.
                tracing::debug!("Nested cancellation scope flattened");
                Box::pin(self.run_scoped(*effect)).await;
            },
            Effect::Cancel { id } => {
                if let Some(handle) = self
                    .cancellations
                    .lock()
                    .ok()
                    .and_then(|mut map| map.remove(&id))
                {
                    handle.abort();
                }
            },
        }
    }

    /// Broadcast an effect-produced action and send it back to the reducer.
    async fn feed_back(&self, action: A)
    where
        R: Clone,
        E: Clone,
    {
        let _ = self.action_broadcast.send(action.clone());
        if let Ok(mut handle) = self.send(action).await {
            // Keep the feedback action's own effects inside this task's
            // lifetime so handle waiters observe the full cascade.
            handle.wait().await;
        }
    }
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone,
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: self.reducer.clone(),
            environment: self.environment.clone(),
            shutdown: Arc::clone(&self.shutdown),
            pending_effects: Arc::clone(&self.pending_effects),
            action_broadcast: self.action_broadcast.clone(),
            state_watch: Arc::clone(&self.state_watch),
            cancellations: Arc::clone(&self.cancellations),
            persist: self.persist.clone(),
        }
    }
}
