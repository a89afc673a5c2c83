//! # StageLink Runtime
//!
//! Runtime implementation for the StageLink client architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core components
//!
//! - **Store**: the runtime that manages state and executes effects
//! - **Effect executor**: executes effect descriptions and feeds resulting
//!   actions back into the reducer
//! - **Action broadcast**: observers (request/response waiters, loggers)
//!   receive every action produced by an effect
//!
//! ## Example
//!
//! ```ignore
//! use stagelink_runtime::Store;
//!
//! let store = Store::new(EventsState::default(), EventsReducer::new(), env);
//!
//! // Send an action
//! let handle = store.send(EventsAction::Refresh).await?;
//! handle.wait().await;
//!
//! // Read state
//! let page = store.state(|s| s.page).await;
//! ```

use stagelink_core::{effect::Effect, reducer::Reducer};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Notify, RwLock, broadcast};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for a terminal action
        ///
        /// Returned by `send_and_wait_for` when the timeout expires before
        /// a matching action is received.
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        ///
        /// Typically means the store is shutting down.
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Tracks outstanding effects spawned on behalf of one `send` call.
///
/// Cloned into every spawned effect task; the paired [`EffectHandle`] waits
/// for the count to drain back to zero.
#[derive(Clone)]
struct EffectTracking {
    count: Arc<AtomicUsize>,
    notify: Arc<Notify>,
}

impl EffectTracking {
    fn new() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            notify: Arc::new(Notify::new()),
        }
    }

    fn increment(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    fn decrement(&self) {
        self.count.fetch_sub(1, Ordering::SeqCst);
        self.notify.notify_waiters();
    }
}

/// Guard ensuring the tracking counter is decremented even if an effect
/// task panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard for the store-wide pending-effect counter used by shutdown.
struct PendingGuard(Arc<AtomicUsize>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Handle returned by [`Store::send`] for waiting on effect completion.
///
/// `send()` returns after *starting* effect execution, not after it
/// finishes. Tests (and shutdown-sensitive callers) use the handle to wait
/// for quiescence:
///
/// ```ignore
/// let handle = store.send(ChatsAction::ListRequested).await?;
/// handle.wait().await;
/// ```
///
/// The handle covers the effects produced directly by the sent action, plus
/// the synchronous reduction of any action an effect feeds back; effects
/// spawned by *that* reduction get their own tracking.
pub struct EffectHandle {
    tracking: EffectTracking,
}

impl EffectHandle {
    /// Wait until all tracked effects have completed
    pub async fn wait(&self) {
        loop {
            let notified = self.tracking.notify.notified();
            if self.tracking.count.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }

    /// Wait for effect completion with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if effects are still running when
    /// the timeout elapses.
    pub async fn wait_with_timeout(&self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

/// The Store - runtime coordinator for a reducer
///
/// The Store manages:
/// 1. State (behind `RwLock` for concurrent access)
/// 2. Reducer (feature logic)
/// 3. Environment (injected dependencies)
/// 4. Effect execution (with feedback loop)
///
/// # Type Parameters
///
/// - `S`: state type
/// - `A`: action type
/// - `E`: environment type
/// - `R`: reducer implementation
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
    shutdown: Arc<AtomicBool>,
    pending_effects: Arc<AtomicUsize>,
    /// Action broadcast channel for observing actions produced by effects.
    ///
    /// All actions produced by effects (e.g. query results from
    /// `Effect::Future`) are broadcast to observers. This enables
    /// request/response waiting via `send_and_wait_for`.
    action_broadcast: broadcast::Sender<A>,
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
        }
    }
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
    A: Send + Clone + 'static,
    S: Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment
    ///
    /// Default action broadcast capacity is 16; use
    /// [`Store::with_broadcast_capacity`] when many slow observers are
    /// expected.
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_broadcast_capacity(initial_state, reducer, environment, 16)
    }

    /// Create a new store with a custom action broadcast capacity
    #[must_use]
    pub fn with_broadcast_capacity(
        initial_state: S,
        reducer: R,
        environment: E,
        capacity: usize,
    ) -> Self {
        let (action_broadcast, _) = broadcast::channel(capacity);

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            shutdown: Arc::new(AtomicBool::new(false)),
            pending_effects: Arc::new(AtomicUsize::new(0)),
            action_broadcast,
        }
    }

    /// Send an action to the store
    ///
    /// This is the primary way to interact with the store:
    /// 1. Acquires the write lock on state
    /// 2. Calls the reducer with (state, action, environment)
    /// 3. Executes returned effects asynchronously
    /// 4. Effects may produce more actions (feedback loop)
    ///
    /// The reducer runs synchronously while holding the write lock, so
    /// concurrent `send` calls serialize at the reducer level. Effects run
    /// as spawned tasks and may complete in any order; reducers that care
    /// about ordering guard against stale responses themselves.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
        if self.shutdown.load(Ordering::Acquire) {
            tracing::warn!("Rejected action: store is shutting down");
            metrics::counter!("store.shutdown.rejected_actions").increment(1);
            return Err(StoreError::ShutdownInProgress);
        }

        tracing::debug!("Processing action");
        metrics::counter!("store.actions.total").increment(1);

        let tracking = EffectTracking::new();
        let handle = EffectHandle {
            tracking: tracking.clone(),
        };

        let effects = {
            let mut state = self.state.write().await;
            let span = tracing::debug_span!("reducer_execution");
            let _enter = span.enter();

            let start = std::time::Instant::now();
            let effects = self.reducer.reduce(&mut state, action, &self.environment);
            metrics::histogram!("store.reducer.duration_seconds")
                .record(start.elapsed().as_secs_f64());

            tracing::trace!("Reducer completed, returned {} effects", effects.len());
            effects
        };

        for effect in effects {
            self.execute_effect(effect, tracking.clone());
        }

        Ok(handle)
    }

    /// Send an action and wait for a matching result action
    ///
    /// Designed for request/response flows (submit a form, wait for
    /// `Submitted` or `SubmitFailed`). Subscribes to the action broadcast
    /// *before* sending to avoid a race, then returns the first
    /// effect-produced action matching the predicate.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Timeout`]: no matching action before the timeout
    /// - [`StoreError::ChannelClosed`]: broadcast closed (store shutting down)
    /// - [`StoreError::ShutdownInProgress`]: store is shutting down
    pub async fn send_and_wait_for<F>(
        &self,
        action: A,
        predicate: F,
        timeout: Duration,
    ) -> Result<A, StoreError>
    where
        F: Fn(&A) -> bool,
    {
        // Subscribe BEFORE sending to avoid a race condition
        let mut rx = self.action_broadcast.subscribe();

        self.send(action).await?;

        tokio::time::timeout(timeout, async {
            loop {
                match rx.recv().await {
                    Ok(action) if predicate(&action) => return Ok(action),
                    Ok(_) => {},
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Action observer lagged");
                    },
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(StoreError::ChannelClosed);
                    },
                }
            }
        })
        .await
        .map_err(|_| StoreError::Timeout)?
    }

    /// Subscribe to all actions produced by effects
    ///
    /// Only actions produced by effects are broadcast, not the initial
    /// actions passed to `send`.
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
        self.action_broadcast.subscribe()
    }

    /// Read current state via a closure
    ///
    /// ```ignore
    /// let unread = store.state(|s| s.unread_total).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Initiate graceful shutdown of the store
    ///
    /// Sets the shutdown flag (rejecting new actions), then waits for
    /// pending effects to complete.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires with
    /// effects still running.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        tracing::info!("Initiating graceful shutdown");
        metrics::counter!("store.shutdown.initiated").increment(1);

        self.shutdown.store(true, Ordering::Release);

        let start = std::time::Instant::now();
        let poll_interval = Duration::from_millis(100);

        loop {
            let pending = self.pending_effects.load(Ordering::Acquire);

            if pending == 0 {
                tracing::info!("All effects completed, shutdown successful");
                return Ok(());
            }

            if start.elapsed() >= timeout {
                tracing::error!(pending_effects = pending, "Shutdown timed out");
                return Err(StoreError::ShutdownTimeout(pending));
            }

            tokio::time::sleep(poll_interval).await;
        }
    }

    /// Execute an effect with tracking
    ///
    /// - `None`: no-op
    /// - `Future`: runs the async computation, feeds the resulting action
    ///   (if any) back into the store and broadcasts it to observers
    /// - `Delay`: waits, then dispatches the action
    /// - `Parallel`: each child effect is executed independently
    /// - `Sequential`: children run in one task, each awaited before the next
    ///
    /// Effect failures are the produced actions themselves (e.g.
    /// `LoadFailed`); a panicking effect task is logged by tokio and the
    /// guards keep the counters consistent.
    fn execute_effect(&self, effect: Effect<A>, tracking: EffectTracking) {
        match effect {
            Effect::None => {
                metrics::counter!("store.effects.executed", "type" => "none").increment(1);
            },
            Effect::Parallel(effects) => {
                metrics::counter!("store.effects.executed", "type" => "parallel").increment(1);
                for child in effects {
                    self.execute_effect(child, tracking.clone());
                }
            },
            effect => {
                metrics::counter!("store.effects.executed", "type" => "task").increment(1);
                tracking.increment();
                self.pending_effects.fetch_add(1, Ordering::SeqCst);
                let pending_guard = PendingGuard(Arc::clone(&self.pending_effects));

                let store = self.clone();
                tokio::spawn(async move {
                    let _guard = DecrementGuard(tracking);
                    let _pending_guard = pending_guard;
                    store.run_effect(effect).await;
                });
            },
        }
    }

    /// Run one effect to completion inside a spawned task.
    ///
    /// Boxed because `Sequential`/`Parallel` recurse.
    fn run_effect(
        &self,
        effect: Effect<A>,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            match effect {
                Effect::None => {},
                Effect::Future(fut) => {
                    if let Some(action) = fut.await {
                        tracing::trace!("Effect produced an action, feeding back");
                        // Broadcast to observers before feeding back
                        let _ = self.action_broadcast.send(action.clone());
                        if let Err(err) = self.send(action).await {
                            tracing::debug!(error = %err, "Feedback action dropped");
                        }
                    }
                },
                Effect::Delay { duration, action } => {
                    tokio::time::sleep(duration).await;
                    let _ = self.action_broadcast.send((*action).clone());
                    if let Err(err) = self.send(*action).await {
                        tracing::debug!(error = %err, "Delayed action dropped");
                    }
                },
                Effect::Sequential(effects) => {
                    for child in effects {
                        self.run_effect(child).await;
                    }
                },
                Effect::Parallel(effects) => {
                    let children = effects.into_iter().map(|child| self.run_effect(child));
                    futures::future::join_all(children).await;
                },
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::{SmallVec, smallvec};
    use stagelink_core::effect::Effect;
    use stagelink_core::reducer::Reducer;

    #[derive(Clone, Debug, Default)]
    struct CounterState {
        count: i32,
        echoes: u32,
    }

    #[derive(Clone, Debug)]
    enum CounterAction {
        Increment,
        IncrementLater,
        Echo,
        Echoed,
    }

    #[derive(Clone)]
    struct CounterReducer;

    #[derive(Clone)]
    struct NoEnv;

    impl Reducer for CounterReducer {
        type State = CounterState;
        type Action = CounterAction;
        type Environment = NoEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                CounterAction::Increment => {
                    state.count += 1;
                    SmallVec::new()
                },
                CounterAction::IncrementLater => {
                    smallvec![Effect::future(async { Some(CounterAction::Increment) })]
                },
                CounterAction::Echo => {
                    smallvec![Effect::future(async { Some(CounterAction::Echoed) })]
                },
                CounterAction::Echoed => {
                    state.echoes += 1;
                    SmallVec::new()
                },
            }
        }
    }

    fn store() -> Store<CounterState, CounterAction, NoEnv, CounterReducer> {
        Store::new(CounterState::default(), CounterReducer, NoEnv)
    }

    #[tokio::test]
    async fn send_updates_state() {
        let store = store();
        #[allow(clippy::unwrap_used)]
        let handle = store.send(CounterAction::Increment).await.unwrap();
        handle.wait().await;
        assert_eq!(store.state(|s| s.count).await, 1);
    }

    #[tokio::test]
    async fn effect_feedback_reaches_reducer() {
        let store = store();
        #[allow(clippy::unwrap_used)]
        let handle = store.send(CounterAction::IncrementLater).await.unwrap();
        handle.wait().await;
        assert_eq!(store.state(|s| s.count).await, 1);
    }

    #[tokio::test]
    async fn send_and_wait_for_matches_terminal_action() {
        let store = store();
        let result = store
            .send_and_wait_for(
                CounterAction::Echo,
                |a| matches!(a, CounterAction::Echoed),
                Duration::from_secs(1),
            )
            .await;
        assert!(matches!(result, Ok(CounterAction::Echoed)));
    }

    #[tokio::test]
    async fn shutdown_rejects_new_actions() {
        let store = store();
        #[allow(clippy::unwrap_used)]
        store.shutdown(Duration::from_secs(1)).await.unwrap();
        let result = store.send(CounterAction::Increment).await;
        assert!(matches!(result, Err(StoreError::ShutdownInProgress)));
    }

    #[tokio::test]
    async fn handle_wait_with_timeout_ok_when_quiescent() {
        let store = store();
        #[allow(clippy::unwrap_used)]
        let handle = store.send(CounterAction::Increment).await.unwrap();
        assert!(
            handle
                .wait_with_timeout(Duration::from_millis(100))
                .await
                .is_ok()
        );
    }
}
