//! Notice Area Component
//!
//! Stack of transient success/error notifications.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::models::NoticeKind;

#[component]
pub fn NoticeArea() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <div class="notice-area">
            <For
                each=move || ctx.notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    let class = match notice.kind {
                        NoticeKind::Success => "notice success",
                        NoticeKind::Error => "notice error",
                    };
                    view! {
                        <div class=class on:click=move |_| ctx.dismiss(id)>
                            {notice.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
