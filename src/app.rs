//! Module Tree Frontend App
//!
//! Main application component with a module column and a test-case column.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use module_hierarchy::{ModuleHierarchy, ModuleStore};

use crate::components::{ModuleTreeView, NewModuleForm, NoticeArea, TestCaseList};
use crate::config::AppConfig;
use crate::context::AppContext;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let ctx = AppContext::new(config);

    // Provide context to all children
    provide_context(ctx);

    // Load modules on mount and whenever a reload is triggered
    Effect::new(move |_| {
        let trigger = ctx.reload_trigger.get();
        spawn_local(async move {
            match ctx.api().fetch_modules().await {
                Ok(records) => {
                    info!(count = records.len(), trigger, "modules loaded");
                    let hierarchy = ModuleHierarchy::new(records);
                    for warning in hierarchy.tree().warnings() {
                        warn!(%warning, "module list needs cleanup");
                    }
                    ctx.hierarchy.set(hierarchy);
                }
                Err(e) => {
                    warn!(error = %e, "loading modules failed");
                    ctx.notify_error(format!("Failed to load modules: {}", e));
                }
            }
        });
    });

    view! {
        <div class="app-layout">
            // Left: module hierarchy
            <aside class="module-column">
                <h2>"Modules"</h2>
                <NewModuleForm />
                <ModuleTreeView />
                <p class="module-count">{move || format!("{} modules", ctx.hierarchy.with(|h| h.records().len()))}</p>
            </aside>

            // Right: test cases of the selected module
            <main class="main-content">
                <TestCaseList />
            </main>

            <NoticeArea />
        </div>
    }
}
