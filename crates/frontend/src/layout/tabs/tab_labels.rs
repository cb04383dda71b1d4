//! Tab titles, one place for every tab key.

pub const CONTRACT_DETAIL_PREFIX: &str = "a001_contract_detail_";

/// Title of the tab opened for `key`. Fallback: empty string.
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        "a001_contract" => "Contracts",
        "a002_device" => "Devices",
        "a003_customer" => "Customers",
        "a004_inventory" => "Inventory",
        "a005_spare_part" => "Spare parts",
        "a006_supplier" => "Suppliers",
        "a007_task" => "Technician assignment",
        "a008_service_request" => "Service requests",
        "a008_service_request_new" => "New service request",
        "a009_chat" => "Chat support",
        _ => "",
    }
}

/// First non-empty identifier: number → title → id.
pub fn pick_identifier<'a>(number: Option<&'a str>, title: Option<&'a str>, id: &'a str) -> &'a str {
    [number, title]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .unwrap_or(id)
}

/// Detail tab title: «<entity> · <identifier>».
pub fn detail_tab_label(entity_label: &str, identifier: &str) -> String {
    format!("{} · {}", entity_label, identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_identifier_fallbacks() {
        assert_eq!(pick_identifier(Some("C-17"), Some("Copier"), "17"), "C-17");
        assert_eq!(pick_identifier(Some(" "), Some("Copier"), "17"), "Copier");
        assert_eq!(pick_identifier(None, None, "17"), "17");
    }

    #[test]
    fn test_detail_label() {
        assert_eq!(detail_tab_label("Contract", "C-17"), "Contract · C-17");
        assert_eq!(tab_label_for_key("a001_contract"), "Contracts");
        assert_eq!(tab_label_for_key("nope"), "");
    }
}
