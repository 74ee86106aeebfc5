//! Module Tree View Component
//!
//! Displays modules in a tree structure with drag-and-drop support.
//! Where the pointer sits inside the hovered row decides between nesting
//! the dragged module and placing it before or after the row.

use std::collections::HashSet;

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use module_hierarchy::{
    commit, on_select, resolve_intent, CommitOutcome, DropRequest, DropZone, ModuleHierarchy,
};

use crate::components::TreeRowView;
use crate::context::AppContext;
use crate::models::ModuleId;
use crate::tree::visible_rows;

use leptos_dragdrop::*;

/// Module tree view component with DnD support
#[component]
pub fn ModuleTreeView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    // Collapsed modules (everything is expanded by default)
    let collapsed = RwSignal::new(HashSet::<ModuleId>::new());

    // Create DnD signals
    let dnd = create_dnd_signals();

    bind_global_mouseup(dnd, move |dragged_id, target| {
        if ctx.busy.get_untracked() {
            warn!(dragged_id, "previous reorder still saving, drop ignored");
            ctx.notify_error("Please wait until the previous move is saved");
            return;
        }

        let hierarchy = ctx.hierarchy.get_untracked();
        let zone = DropZone::from_offset(target.offset_y, target.height);
        let expanded = collapsed.with_untracked(|c| !c.contains(&target.id));
        let has_children = !hierarchy.tree().children(target.id).is_empty();
        let request = DropRequest {
            drag: dragged_id,
            target: target.id,
            intent: resolve_intent(zone, expanded, has_children),
        };
        info!(?request, ?zone, "module dropped");

        let reorder = match hierarchy.apply_drop(request, ctx.order_scheme()) {
            Ok(reorder) => reorder,
            Err(e) => {
                warn!(error = %e, "drop rejected");
                ctx.notify_error(format!("Cannot move module: {}", e));
                return;
            }
        };

        // Show the new order right away; the server confirms or we roll back
        ctx.hierarchy.set(reorder.preview());
        ctx.busy.set(true);

        spawn_local(async move {
            let outcome = commit(&ctx.api(), reorder).await;
            match &outcome {
                CommitOutcome::Persisted(_) => ctx.notify_success("Module order updated successfully"),
                CommitOutcome::RolledBack { error, .. } => {
                    ctx.notify_error(format!("Failed to update module order: {}", error))
                }
            }
            ctx.hierarchy.set(ModuleHierarchy::new(outcome.into_records()));
            ctx.busy.set(false);
        });
    });

    let rows = move || ctx.hierarchy.with(|h| collapsed.with(|c| visible_rows(h.tree(), c)));

    let toggle = move |id: ModuleId| {
        collapsed.update(|c| {
            if !c.remove(&id) {
                c.insert(id);
            }
        });
    };

    view! {
        <div class=move || if ctx.busy.get() { "module-tree saving" } else { "module-tree" }>
            {move || ctx.hierarchy.with(|h| h.tree().is_empty()).then(|| view! {
                <p class="module-tree-empty">"No modules yet"</p>
            })}

            <For
                each=rows
                key=|row| row.clone()
                children=move |row| {
                    let id = row.id;
                    let is_selected = move || ctx.selected_module.get() == Some(id);

                    // DnD handlers
                    let on_mousedown = make_on_mousedown(dnd, id);
                    let on_mousemove = make_on_row_mousemove(dnd, id);
                    let on_mouseleave = make_on_mouseleave(dnd);

                    // Visual state
                    let is_dragging = move || dnd.dragging_id_read.get() == Some(id);
                    let drop_class = move || match dnd.drop_target_read.get() {
                        Some(t) if t.id == id => match DropZone::from_offset(t.offset_y, t.height) {
                            DropZone::GapAbove => " drop-above",
                            DropZone::Node => " drop-into",
                            DropZone::GapBelow => " drop-below",
                        },
                        _ => "",
                    };

                    let row_class = move || {
                        let mut c = String::from("tree-row-wrapper");
                        if is_selected() { c.push_str(" selected"); }
                        if is_dragging() { c.push_str(" dragging"); }
                        c.push_str(drop_class());
                        c
                    };

                    let on_click = move |_: web_sys::MouseEvent| {
                        // A drop also fires click on the row under the pointer
                        if dnd.drag_just_ended_read.get_untracked() {
                            return;
                        }
                        on_select(&[id], |module_id| ctx.select_module(module_id));
                    };

                    view! {
                        <div
                            class=row_class
                            on:mousedown=on_mousedown
                            on:mousemove=on_mousemove
                            on:mouseleave=on_mouseleave
                            on:click=on_click
                        >
                            <TreeRowView row=row on_toggle=Callback::new(toggle) />
                        </div>
                    }
                }
            />
        </div>
    }
}
