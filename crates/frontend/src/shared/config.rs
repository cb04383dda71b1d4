//! Service endpoint configuration, read once per page load.

use contracts::shared::config::ServiceEndpoints;
use once_cell::sync::Lazy;

const SERVICES_TOML: &str = include_str!("../../config/services.toml");

static ENDPOINTS: Lazy<ServiceEndpoints> = Lazy::new(|| {
    match ServiceEndpoints::from_toml_str(SERVICES_TOML) {
        Ok(endpoints) => endpoints,
        Err(e) => {
            log::error!("services.toml is invalid, using defaults: {e}");
            ServiceEndpoints::default()
        }
    }
});

pub fn endpoints() -> &'static ServiceEndpoints {
    &ENDPOINTS
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::config::Service;

    #[test]
    fn test_bundled_config_parses() {
        let parsed = ServiceEndpoints::from_toml_str(SERVICES_TOML).unwrap();
        assert_eq!(parsed.api_port, 8080);
        assert_eq!(
            parsed.path(Service::Inventory, "items"),
            "/api/inventory-service/v1/items"
        );
    }
}
