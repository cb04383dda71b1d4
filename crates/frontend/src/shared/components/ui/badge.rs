use leptos::prelude::*;

/// BEM modifier for a badge variant name. Unknown names render neutral.
pub fn variant_class(variant: &str) -> &'static str {
    match variant {
        "primary" => "badge--primary",
        "success" => "badge--success",
        "warning" => "badge--warning",
        "error" => "badge--error",
        _ => "badge--neutral",
    }
}

/// Small pill for counts and statuses.
#[component]
pub fn Badge(
    /// "primary", "success", "warning", "error" or "neutral"
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    #[prop(optional, into)]
    class: MaybeProp<String>,
    children: Children,
) -> impl IntoView {
    let full_class = move || {
        let modifier = variant_class(variant.get().as_deref().unwrap_or_default());
        match class.get() {
            Some(extra) if !extra.is_empty() => format!("badge {modifier} {extra}"),
            _ => format!("badge {modifier}"),
        }
    };

    view! { <span class=full_class>{children()}</span> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_class() {
        assert_eq!(variant_class("warning"), "badge--warning");
        assert_eq!(variant_class(""), "badge--neutral");
        assert_eq!(variant_class("posted"), "badge--neutral");
    }
}
