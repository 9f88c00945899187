//! Store runtime end to end: persistence restore, state subscription, and
//! shutdown against a real file backend.

#![allow(clippy::unwrap_used)] // Test code can unwrap

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tombola_store::{
    Effect, FileSliceStore, PersistedState, Reducer, SlicePersistence, SmallVec, Store,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Clone, Debug, Default, PartialEq)]
struct PrefsState {
    volume: u8,
    muted: bool,
    // Session-only scratch, deliberately outside the slice.
    last_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct PrefsSlice {
    volume: u8,
    muted: bool,
}

impl PersistedState for PrefsState {
    type Slice = PrefsSlice;
    const KEY: &'static str = "prefs";

    fn capture(&self) -> PrefsSlice {
        PrefsSlice {
            volume: self.volume,
            muted: self.muted,
        }
    }

    fn restore(&mut self, slice: PrefsSlice) {
        self.volume = slice.volume;
        self.muted = slice.muted;
    }
}

#[derive(Clone, Debug)]
enum PrefsAction {
    SetVolume(u8),
    ToggleMute,
    Press(String),
}

#[derive(Clone)]
struct PrefsEnv;

#[derive(Clone)]
struct PrefsReducer;

impl Reducer for PrefsReducer {
    type State = PrefsState;
    type Action = PrefsAction;
    type Environment = PrefsEnv;

    fn reduce(
        &self,
        state: &mut PrefsState,
        action: PrefsAction,
        _env: &PrefsEnv,
    ) -> SmallVec<[Effect<PrefsAction>; 4]> {
        match action {
            PrefsAction::SetVolume(volume) => state.volume = volume,
            PrefsAction::ToggleMute => state.muted = !state.muted,
            PrefsAction::Press(key) => state.last_key = key,
        }
        SmallVec::new()
    }
}

fn temp_dir(tag: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("tombola-store-test-{tag}-{}", std::process::id()))
}

#[tokio::test]
async fn slice_survives_a_restart_through_the_file_backend() {
    init_tracing();
    let dir = temp_dir("restart");
    let backend = Arc::new(FileSliceStore::new(&dir));

    let store = Store::with_persistence(
        PrefsState::default(),
        PrefsReducer,
        PrefsEnv,
        Arc::clone(&backend) as Arc<dyn SlicePersistence>,
    );
    store.send(PrefsAction::SetVolume(7)).await.unwrap();
    store.send(PrefsAction::ToggleMute).await.unwrap();
    store.send(PrefsAction::Press("escape".to_owned())).await.unwrap();

    let restarted = Store::with_persistence(
        PrefsState::default(),
        PrefsReducer,
        PrefsEnv,
        Arc::clone(&backend) as Arc<dyn SlicePersistence>,
    );
    let state = restarted.state(Clone::clone).await;

    assert_eq!(state.volume, 7);
    assert!(state.muted);
    // The scratch field is not part of the slice.
    assert_eq!(state.last_key, "");

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn subscribers_see_snapshots_in_mutation_order() {
    init_tracing();
    let store = Store::new(PrefsState::default(), PrefsReducer, PrefsEnv);
    let mut rx = store.subscribe_state();

    store.send(PrefsAction::SetVolume(3)).await.unwrap();
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().volume, 3);

    store.send(PrefsAction::SetVolume(9)).await.unwrap();
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().volume, 9);
}

#[tokio::test]
async fn shutdown_completes_with_no_effects_in_flight() {
    init_tracing();
    let store = Store::new(PrefsState::default(), PrefsReducer, PrefsEnv);
    store.send(PrefsAction::SetVolume(1)).await.unwrap();

    store.shutdown(Duration::from_secs(1)).await.unwrap();
    assert!(store.send(PrefsAction::SetVolume(2)).await.is_err());
    // State reads still work after shutdown.
    assert_eq!(store.state(|s| s.volume).await, 1);
}
