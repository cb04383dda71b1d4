use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// Error text from the last load with a manual retry. Renders nothing while
/// `error` is `None`.
#[component]
pub fn ErrorPanel(
    #[prop(into)] error: Signal<Option<String>>,
    /// Re-run the failed load
    on_retry: Callback<()>,
) -> impl IntoView {
    move || {
        error.get().map(|err| {
            view! {
                <div class="alert alert--error">
                    {icon("alert")}
                    <span class="alert__text">{err}</span>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        size=ButtonSize::Small
                        on_click=move |_| on_retry.run(())
                    >
                        "Try again"
                    </Button>
                </div>
            }
        })
    }
}
