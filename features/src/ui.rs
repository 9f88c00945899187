//! Cross-cutting UI state: appearance, layout, modals, toasts, loading
//! flags, notification preferences, and scratch search/pagination.
//!
//! The preferences slice (theme, accent color, font size, notification
//! settings, page size) persists across sessions (`KEY = "ui"`); everything
//! else is deliberately session-transient.

/// Reducer.
pub mod reducer;
/// State, actions, and the appearance sink.
pub mod types;

pub use reducer::UiReducer;
pub use types::{
    AppearanceSink, DEFAULT_TOAST_DURATION, FontSize, NotificationSettings,
    NotificationSettingsPatch, Theme, Toast, ToastKind, UiAction, UiEnvironment, UiSlice,
    UiState,
};
