//! Reducer for cross-cutting UI state.

use crate::ui::types::{
    DEFAULT_TOAST_DURATION, Toast, UiAction, UiEnvironment, UiState,
};
use std::sync::Arc;
use tombola_store::{Effect, Reducer, SmallVec, smallvec};

/// Reducer for cross-cutting UI state.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiReducer;

impl UiReducer {
    /// Creates a new `UiReducer`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for UiReducer {
    type State = UiState;
    type Action = UiAction;
    type Environment = UiEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per action keeps the transition table in one place
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            UiAction::SetTheme { theme } => {
                state.theme = theme;
                let sink = Arc::clone(&env.appearance);
                smallvec![Effect::future(async move {
                    sink.apply_theme(theme);
                    None
                })]
            },
            UiAction::SetPrimaryColor { color } => {
                state.primary_color.clone_from(&color);
                let sink = Arc::clone(&env.appearance);
                smallvec![Effect::future(async move {
                    sink.apply_primary_color(&color);
                    None
                })]
            },
            UiAction::SetFontSize { size } => {
                state.font_size = size;
                let sink = Arc::clone(&env.appearance);
                smallvec![Effect::future(async move {
                    sink.apply_font_size(size);
                    None
                })]
            },
            UiAction::ToggleSidebar => {
                state.sidebar_open = !state.sidebar_open;
                SmallVec::new()
            },
            UiAction::ToggleMobileMenu => {
                state.mobile_menu_open = !state.mobile_menu_open;
                SmallVec::new()
            },
            UiAction::OpenModal { key } => {
                state.open_modals.insert(key);
                SmallVec::new()
            },
            UiAction::CloseModal { key } => {
                state.open_modals.remove(&key);
                SmallVec::new()
            },
            UiAction::CloseAllModals => {
                state.open_modals.clear();
                SmallVec::new()
            },
            UiAction::AddToast {
                message,
                kind,
                duration,
            } => {
                let id = env.ids.next_id();
                state.toasts.push(Toast {
                    id: id.clone(),
                    message,
                    kind,
                    created_at: env.clock.now(),
                });

                let duration = duration.unwrap_or(DEFAULT_TOAST_DURATION);
                if duration.is_zero() {
                    // Explicit zero opts out of auto-dismiss entirely.
                    SmallVec::new()
                } else {
                    smallvec![Effect::cancellable(
                        id.clone(),
                        Effect::delay(duration, UiAction::RemoveToast { id }),
                    )]
                }
            },
            UiAction::RemoveToast { id } => {
                // Idempotent: the timer may fire after a manual dismissal,
                // or the user may dismiss after the timer already fired.
                state.toasts.retain(|t| t.id != id);
                smallvec![Effect::cancel(id)]
            },
            UiAction::ClearToasts => {
                state
                    .toasts
                    .drain(..)
                    .map(|toast| Effect::cancel(toast.id))
                    .collect()
            },
            UiAction::SetLoading { key, loading } => {
                if loading {
                    state.loading.insert(key);
                } else {
                    state.loading.remove(&key);
                }
                SmallVec::new()
            },
            UiAction::UpdateNotificationSettings { patch } => {
                state.notification_settings.merge(patch);
                SmallVec::new()
            },
            UiAction::SetSearchQuery { query } => {
                state.search_query = query;
                SmallVec::new()
            },
            UiAction::ResetSearch => {
                state.search_query = String::new();
                SmallVec::new()
            },
            UiAction::SetPage { page } => {
                state.page = page.max(1);
                SmallVec::new()
            },
            UiAction::SetPageSize { size } => {
                state.page_size = size.max(1);
                SmallVec::new()
            },
            UiAction::ResetPagination => {
                let defaults = UiState::default();
                state.page = defaults.page;
                state.page_size = defaults.page_size;
                SmallVec::new()
            },
            UiAction::Reset => {
                // Cancel pending dismiss timers so no task outlives the
                // toasts it referenced.
                let cancels = state
                    .toasts
                    .iter()
                    .map(|toast| Effect::cancel(toast.id.clone()))
                    .collect();
                *state = UiState::default();
                cancels
            },
        }
    }
}
