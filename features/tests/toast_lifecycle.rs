//! End-to-end toast lifecycle against a live store with paused time.

#![allow(clippy::unwrap_used)] // Test code can unwrap

use std::sync::Arc;
use std::time::Duration;
use tombola_features::ui::{
    AppearanceSink, FontSize, Theme, ToastKind, UiAction, UiEnvironment, UiReducer, UiState,
};
use tombola_store::{EffectId, Store};
use tombola_testing::{FixedClock, SequentialIdGenerator};

struct NullAppearance;

impl AppearanceSink for NullAppearance {
    fn apply_theme(&self, _theme: Theme) {}
    fn apply_primary_color(&self, _color: &str) {}
    fn apply_font_size(&self, _size: FontSize) {}
}

fn ui_store() -> Store<UiState, UiAction, UiEnvironment, UiReducer> {
    let env = UiEnvironment::new(
        Arc::new(FixedClock::default_instant()),
        Arc::new(SequentialIdGenerator::new()),
        Arc::new(NullAppearance),
    );
    Store::new(UiState::default(), UiReducer::new(), env)
}

fn toast(message: &str, duration: Option<Duration>) -> UiAction {
    UiAction::AddToast {
        message: message.to_owned(),
        kind: ToastKind::Info,
        duration,
    }
}

#[tokio::test(start_paused = true)]
async fn toast_auto_dismisses_after_the_default_delay() {
    let store = ui_store();
    store.send(toast("Saved", None)).await.unwrap();

    tokio::time::sleep(Duration::from_millis(4_999)).await;
    assert_eq!(store.state(|s| s.toasts.len()).await, 1);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(store.state(|s| s.toasts.is_empty()).await);
}

#[tokio::test(start_paused = true)]
async fn caller_specified_delay_overrides_the_default() {
    let store = ui_store();
    store
        .send(toast("Quick", Some(Duration::from_millis(500))))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(store.state(|s| s.toasts.is_empty()).await);
}

#[tokio::test(start_paused = true)]
async fn manual_removal_cancels_the_pending_timer() {
    let store = ui_store();
    store.send(toast("One", None)).await.unwrap();
    assert!(store.has_pending(&EffectId::new("id-1")));

    store
        .send(UiAction::RemoveToast {
            id: "id-1".to_owned(),
        })
        .await
        .unwrap();
    assert!(!store.has_pending(&EffectId::new("id-1")));
    assert!(store.state(|s| s.toasts.is_empty()).await);

    // Well past the original deadline nothing fires and nothing panics.
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(store.state(|s| s.toasts.is_empty()).await);
}

#[tokio::test(start_paused = true)]
async fn clear_toasts_is_safe_while_timers_are_pending() {
    let store = ui_store();
    store.send(toast("One", None)).await.unwrap();
    store.send(toast("Two", None)).await.unwrap();
    assert_eq!(store.state(|s| s.toasts.len()).await, 2);

    store.send(UiAction::ClearToasts).await.unwrap();
    assert!(store.state(|s| s.toasts.is_empty()).await);
    assert!(!store.has_pending(&EffectId::new("id-1")));
    assert!(!store.has_pending(&EffectId::new("id-2")));

    // The timers were cancelled; letting their deadlines pass is a no-op.
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(store.state(|s| s.toasts.is_empty()).await);
}

#[tokio::test(start_paused = true)]
async fn sticky_toast_stays_until_dismissed() {
    let store = ui_store();
    store.send(toast("Sticky", Some(Duration::ZERO))).await.unwrap();

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(store.state(|s| s.toasts.len()).await, 1);

    store
        .send(UiAction::RemoveToast {
            id: "id-1".to_owned(),
        })
        .await
        .unwrap();
    assert!(store.state(|s| s.toasts.is_empty()).await);
}

#[tokio::test(start_paused = true)]
async fn late_timer_against_an_already_cleared_list_is_a_noop() {
    let store = ui_store();
    // Sticky toast, then a manual RemoveToast for an id that was never
    // scheduled — exactly what a raced timer delivers.
    store.send(toast("One", Some(Duration::ZERO))).await.unwrap();
    store.send(UiAction::ClearToasts).await.unwrap();

    store
        .send(UiAction::RemoveToast {
            id: "id-1".to_owned(),
        })
        .await
        .unwrap();
    assert!(store.state(|s| s.toasts.is_empty()).await);
}
