use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

/// Sidebar zone. Collapsing it only hides it; open tabs keep their state.
#[component]
pub fn Left(children: Children) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <nav
            data-zone="left"
            class="app-sidebar"
            class:app-sidebar--collapsed=move || !ctx.left_open.get()
            aria-label="Sections"
        >
            {children()}
        </nav>
    }
}
