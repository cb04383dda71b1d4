use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::event_bus::provide_chat_bus;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Open tabs and sidebar state for the whole app.
    provide_context(AppGlobalContext::new());

    // One chat event bus, shared by the chat page and the header badge.
    provide_chat_bus();

    view! {
        <AuthProvider>
            <AppShell />
        </AuthProvider>
    }
}
