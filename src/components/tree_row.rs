//! Tree Row Component
//!
//! Individual module row in the tree view.

use leptos::prelude::*;

use crate::models::ModuleId;
use crate::tree::TreeRow;

/// Indentation per tree level, in pixels
const INDENT_PX: usize = 20;

/// A single module row in the tree
#[component]
pub fn TreeRowView(
    row: TreeRow,
    /// Expand/collapse the row's children
    on_toggle: Callback<ModuleId>,
) -> impl IntoView {
    let id = row.id;
    let indent = row.depth * INDENT_PX;

    view! {
        <div class="module-row" style=format!("padding-left: {}px;", indent)>
            // Collapse toggle
            {if row.has_children {
                view! {
                    <button class="collapse-btn" on:click=move |ev| {
                        ev.stop_propagation();
                        on_toggle.run(id);
                    }>
                        {if row.expanded { "▼" } else { "▶" }}
                    </button>
                }.into_any()
            } else {
                view! { <span class="collapse-placeholder">"·"</span> }.into_any()
            }}

            <span class="module-title">{row.title}</span>
        </div>
    }
}
