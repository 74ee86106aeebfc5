//! New Module Form Component
//!
//! Form for creating a module under a chosen parent (or at the root).

use leptos::prelude::*;
use leptos::task::spawn_local;
use thiserror::Error;
use tracing::{info, warn};

use module_hierarchy::ModuleStore;

use crate::context::AppContext;
use crate::models::NewModule;

/// Select value meaning "no parent"
const ROOT_VALUE: &str = "root";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please select a parent module")]
    MissingParent,
    #[error("Please enter the module name")]
    MissingName,
}

/// Validate raw form values into a create payload
pub fn parse_new_module(parent: &str, name: &str) -> Result<NewModule, FormError> {
    let parent_id = match parent.trim() {
        "" => return Err(FormError::MissingParent),
        ROOT_VALUE => None,
        other => Some(other.parse().map_err(|_| FormError::MissingParent)?),
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(FormError::MissingName);
    }
    Ok(NewModule {
        name: name.to_string(),
        parent_id,
    })
}

/// Form for creating new modules (root or child)
#[component]
pub fn NewModuleForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (parent, set_parent) = signal(String::new());
    let (name, set_name) = signal(String::new());
    let (form_error, set_form_error) = signal::<Option<FormError>>(None);

    let create_module = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let module = match parse_new_module(&parent.get_untracked(), &name.get_untracked()) {
            Ok(module) => module,
            Err(e) => {
                set_form_error.set(Some(e));
                return;
            }
        };
        set_form_error.set(None);

        spawn_local(async move {
            match ctx.api().create_module(&module).await {
                Ok(created) => {
                    info!(id = created.id, parent_id = ?created.parent_id, "module created");
                    set_name.set(String::new());
                    set_parent.set(String::new());
                    ctx.notify_success(format!("Module \"{}\" created", created.name));
                    ctx.reload();
                }
                Err(e) => {
                    warn!(error = %e, "module creation failed");
                    ctx.notify_error(format!("Failed to create module: {}", e));
                }
            }
        });
    };

    let parent_options = move || {
        ctx.hierarchy.with(|h| {
            h.records()
                .iter()
                .map(|m| (m.id, m.name.clone()))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <form class="new-module-form" on:submit=create_module>
            <label>
                "Parent Module"
                <select
                    prop:value=move || parent.get()
                    on:change=move |ev| set_parent.set(event_target_value(&ev))
                >
                    <option value="" disabled=true>"Select parent"</option>
                    <option value=ROOT_VALUE>"Root"</option>
                    {move || parent_options().into_iter().map(|(id, name)| view! {
                        <option value=id.to_string()>{name}</option>
                    }).collect_view()}
                </select>
            </label>

            <label>
                "Module Name"
                <input
                    type="text"
                    placeholder="Module name..."
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
            </label>

            {move || form_error.get().map(|e| view! { <p class="form-error">{e.to_string()}</p> })}

            <button type="submit">"Add Module"</button>
        </form>
    }
}
