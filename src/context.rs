//! Application Context
//!
//! Shared state provided via Leptos Context API.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use module_hierarchy::{ModuleHierarchy, OrderScheme};

use crate::commands::ApiClient;
use crate::config::AppConfig;
use crate::models::{ModuleId, Notice, NoticeKind};

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload modules from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload modules from backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Modules as last loaded (or optimistically reordered)
    pub hierarchy: RwSignal<ModuleHierarchy>,
    /// Module whose test cases are listed (None = all)
    pub selected_module: RwSignal<Option<ModuleId>>,
    /// A reorder is waiting for the server; further drops are refused
    pub busy: RwSignal<bool>,
    /// Notifications currently on screen
    pub notices: RwSignal<Vec<Notice>>,
    next_notice: StoredValue<u32>,
    config: StoredValue<AppConfig>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let (reload_trigger, set_reload_trigger) = signal(0u32);
        Self {
            reload_trigger,
            set_reload_trigger,
            hierarchy: RwSignal::new(ModuleHierarchy::default()),
            selected_module: RwSignal::new(None),
            busy: RwSignal::new(false),
            notices: RwSignal::new(Vec::new()),
            next_notice: StoredValue::new(0),
            config: StoredValue::new(config),
        }
    }

    /// Trigger a reload of modules
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// REST client for the configured API
    pub fn api(&self) -> ApiClient {
        self.config.with_value(ApiClient::new)
    }

    pub fn order_scheme(&self) -> OrderScheme {
        self.config.with_value(|c| c.order_scheme)
    }

    /// Show test cases of a module
    pub fn select_module(&self, id: ModuleId) {
        self.selected_module.set(Some(id));
    }

    pub fn notify_success(&self, message: impl Into<String>) {
        self.notify(NoticeKind::Success, message.into());
    }

    pub fn notify_error(&self, message: impl Into<String>) {
        self.notify(NoticeKind::Error, message.into());
    }

    /// Push a notification and schedule its removal
    fn notify(&self, kind: NoticeKind, message: String) {
        let id = self.next_notice.get_value();
        self.next_notice.set_value(id.wrapping_add(1));
        self.notices.update(|n| n.push(Notice { id, kind, message }));

        let ctx = *self;
        let delay = self.config.with_value(|c| c.notification_ms);
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            ctx.dismiss(id);
        });
    }

    pub fn dismiss(&self, id: u32) {
        self.notices.update(|n| n.retain(|notice| notice.id != id));
    }
}
