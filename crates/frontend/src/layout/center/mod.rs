use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

#[component]
pub fn Center(children: Children) -> impl IntoView {
    view! {
        <div data-zone="center" class="app-tabs">
            <TabBar />
            <div class="app-tabs__content">{children()}</div>
        </div>
    }
}

/// Strip of open tabs above the content.
#[component]
fn TabBar() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <div class="tab-bar">
            <For
                each=move || tabs_store.opened.get()
                key=|tab| (tab.key.clone(), tab.title.clone())
                children=move |tab: TabData| view! { <TabHandle tab=tab /> }
            />
        </div>
    }
}

#[component]
fn TabHandle(tab: TabData) -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    let key = StoredValue::new(tab.key.clone());
    let is_active = Memo::new(move |_| {
        tabs_store.active.get().as_deref() == Some(key.get_value().as_str())
    });

    let on_close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        tabs_store.close_tab(&key.get_value());
    };

    view! {
        <div
            class="tab"
            class:tab--active=is_active
            on:click=move |_| tabs_store.activate_tab(&key.get_value())
        >
            <span class="tab__title">{tab.title}</span>
            <button class="tab__close" title="Close" on:click=on_close>
                {icon("x")}
            </button>
        </div>
    }
}
