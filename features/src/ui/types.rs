//! State and actions for cross-cutting UI concerns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tombola_store::{Clock, IdGenerator, PersistedState};

/// Appearance theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
    /// Follow the platform preference.
    #[default]
    System,
}

/// Base font size preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    /// Compact text.
    Small,
    /// Default text.
    #[default]
    Medium,
    /// Enlarged text.
    Large,
}

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// Neutral information.
    #[default]
    Info,
    /// Operation succeeded.
    Success,
    /// Something needs attention.
    Warning,
    /// Operation failed.
    Error,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    /// Unique identifier; also the cancellation key of the auto-dismiss
    /// timer.
    pub id: String,
    /// Message shown to the user.
    pub message: String,
    /// Severity.
    pub kind: ToastKind,
    /// When the toast was created.
    pub created_at: DateTime<Utc>,
}

/// How long a toast stays up when the caller does not say otherwise.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(5000);

/// Notification channel preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationSettings {
    /// Transactional email.
    pub email: bool,
    /// SMS alerts.
    pub sms: bool,
    /// Push notifications.
    pub push: bool,
    /// Marketing email.
    pub marketing: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            sms: false,
            push: true,
            marketing: false,
        }
    }
}

/// Partial update for [`NotificationSettings`]; `Some` channels overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationSettingsPatch {
    /// New email preference.
    pub email: Option<bool>,
    /// New SMS preference.
    pub sms: Option<bool>,
    /// New push preference.
    pub push: Option<bool>,
    /// New marketing preference.
    pub marketing: Option<bool>,
}

impl NotificationSettings {
    /// Shallow-merge `patch` into these settings.
    pub fn merge(&mut self, patch: NotificationSettingsPatch) {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(sms) = patch.sms {
            self.sms = sms;
        }
        if let Some(push) = patch.push {
            self.push = push;
        }
        if let Some(marketing) = patch.marketing {
            self.marketing = marketing;
        }
    }
}

/// Applies appearance values to the active presentation layer.
///
/// Theme, primary color, and font size need to reach the styling system the
/// moment they change — the one place this store's contract requires a side
/// effect beyond state mutation. The reducer emits it as an effect so the
/// mutation itself stays pure and the sink can be a recorder in tests.
pub trait AppearanceSink: Send + Sync {
    /// Apply the theme.
    fn apply_theme(&self, theme: Theme);
    /// Apply the primary accent color.
    fn apply_primary_color(&self, color: &str);
    /// Apply the base font size.
    fn apply_font_size(&self, size: FontSize);
}

/// Environment for the UI reducer.
#[derive(Clone)]
pub struct UiEnvironment {
    /// Clock for toast timestamps.
    pub clock: Arc<dyn Clock>,
    /// Generator for toast ids.
    pub ids: Arc<dyn IdGenerator>,
    /// Presentation-layer sink for appearance changes.
    pub appearance: Arc<dyn AppearanceSink>,
}

impl UiEnvironment {
    /// Creates a new `UiEnvironment`.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        appearance: Arc<dyn AppearanceSink>,
    ) -> Self {
        Self {
            clock,
            ids,
            appearance,
        }
    }
}

/// Cross-cutting UI state.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// Appearance theme.
    pub theme: Theme,
    /// Primary accent color, as a hex string.
    pub primary_color: String,
    /// Base font size.
    pub font_size: FontSize,
    /// Whether the sidebar is open.
    pub sidebar_open: bool,
    /// Whether the mobile menu is open.
    pub mobile_menu_open: bool,
    /// Keys of currently-open modals.
    pub open_modals: HashSet<String>,
    /// Live toasts, oldest first.
    pub toasts: Vec<Toast>,
    /// Keys of operations currently in flight.
    pub loading: HashSet<String>,
    /// Notification channel preferences.
    pub notification_settings: NotificationSettings,
    /// Generic search scratch state for non-domain views.
    pub search_query: String,
    /// Generic pagination scratch: current page, 1-based.
    pub page: u32,
    /// Generic pagination scratch: page size preference.
    pub page_size: u32,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            primary_color: "#4f46e5".to_owned(),
            font_size: FontSize::default(),
            sidebar_open: false,
            mobile_menu_open: false,
            open_modals: HashSet::new(),
            toasts: Vec::new(),
            loading: HashSet::new(),
            notification_settings: NotificationSettings::default(),
            search_query: String::new(),
            page: 1,
            page_size: 12,
        }
    }
}

impl UiState {
    /// Whether the modal keyed by `key` is open.
    #[must_use]
    pub fn is_modal_open(&self, key: &str) -> bool {
        self.open_modals.contains(key)
    }

    /// Whether the operation keyed by `key` is in flight.
    #[must_use]
    pub fn is_loading(&self, key: &str) -> bool {
        self.loading.contains(key)
    }

    /// The toast with `id`, if still shown.
    #[must_use]
    pub fn toast(&self, id: &str) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }
}

/// The persisted slice of [`UiState`]: preferences only. Modals, toasts,
/// loading flags, scratch state, and layout toggles are session-transient —
/// restoring an open modal or an in-flight spinner would be stale UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiSlice {
    /// Appearance theme.
    pub theme: Theme,
    /// Primary accent color.
    pub primary_color: String,
    /// Base font size.
    pub font_size: FontSize,
    /// Notification channel preferences.
    pub notification_settings: NotificationSettings,
    /// Page size preference.
    pub page_size: u32,
}

impl Default for UiSlice {
    fn default() -> Self {
        let state = UiState::default();
        Self {
            theme: state.theme,
            primary_color: state.primary_color,
            font_size: state.font_size,
            notification_settings: state.notification_settings,
            page_size: state.page_size,
        }
    }
}

impl PersistedState for UiState {
    type Slice = UiSlice;
    const KEY: &'static str = "ui";

    fn capture(&self) -> UiSlice {
        UiSlice {
            theme: self.theme,
            primary_color: self.primary_color.clone(),
            font_size: self.font_size,
            notification_settings: self.notification_settings.clone(),
            page_size: self.page_size,
        }
    }

    fn restore(&mut self, slice: UiSlice) {
        self.theme = slice.theme;
        self.primary_color = slice.primary_color;
        self.font_size = slice.font_size;
        self.notification_settings = slice.notification_settings;
        self.page_size = slice.page_size.max(1);
    }
}

/// Transitions the UI store supports.
#[derive(Debug, Clone)]
pub enum UiAction {
    /// Set the theme and apply it to the presentation layer.
    SetTheme {
        /// The new theme.
        theme: Theme,
    },
    /// Set the accent color and apply it to the presentation layer.
    SetPrimaryColor {
        /// The new color, as a hex string.
        color: String,
    },
    /// Set the font size and apply it to the presentation layer.
    SetFontSize {
        /// The new size.
        size: FontSize,
    },
    /// Toggle the sidebar.
    ToggleSidebar,
    /// Toggle the mobile menu.
    ToggleMobileMenu,
    /// Open the modal keyed by `key`.
    OpenModal {
        /// Modal key.
        key: String,
    },
    /// Close the modal keyed by `key`.
    CloseModal {
        /// Modal key.
        key: String,
    },
    /// Close every open modal at once.
    CloseAllModals,
    /// Show a toast. Unless `duration` is explicitly zero, it is dismissed
    /// automatically after `duration` (default
    /// [`DEFAULT_TOAST_DURATION`]).
    AddToast {
        /// Message to show.
        message: String,
        /// Severity.
        kind: ToastKind,
        /// Override for the auto-dismiss delay; `Some(ZERO)` disables
        /// auto-dismiss.
        duration: Option<Duration>,
    },
    /// Dismiss the toast with `id`. A no-op when it is already gone, so a
    /// late auto-dismiss timer can never fail.
    RemoveToast {
        /// Toast id.
        id: String,
    },
    /// Dismiss every toast and cancel their pending timers.
    ClearToasts,
    /// Mark the operation keyed by `key` as in flight or done.
    SetLoading {
        /// Operation key.
        key: String,
        /// Whether the operation is in flight.
        loading: bool,
    },
    /// Shallow-merge notification channel preferences.
    UpdateNotificationSettings {
        /// Channels to overwrite.
        patch: NotificationSettingsPatch,
    },
    /// Set the generic search query.
    SetSearchQuery {
        /// The new query.
        query: String,
    },
    /// Clear the generic search scratch state.
    ResetSearch,
    /// Set the generic pagination page.
    SetPage {
        /// The new page, 1-based.
        page: u32,
    },
    /// Set the page size preference.
    SetPageSize {
        /// The new page size.
        size: u32,
    },
    /// Reset the generic pagination scratch state.
    ResetPagination,
    /// Return every field to its initial value.
    Reset,
}
