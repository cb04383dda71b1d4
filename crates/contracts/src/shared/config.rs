use serde::Deserialize;

/// Default endpoint layout, embedded so the frontend works without any
/// deployment-specific file.
pub const DEFAULT_CONFIG: &str = r#"
api_port = 8080

[services]
auth = "/api/auth"
contract = "/api/contract-service/v1"
device = "/api/device-service/v1"
customer = "/api/customer-service/v1"
inventory = "/api/inventory-service/v1"
spare_parts = "/api/spare-parts-service/v1"
suppliers = "/api/supplier-service/v1"
task = "/api/task-service/v1"
service_request = "/api/service-request-service/v1"
chat = "/api/chat-service/v1"
link_preview = "/api/link-preview"
"#;

/// Backend service the frontend talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Auth,
    Contract,
    Device,
    Customer,
    Inventory,
    SpareParts,
    Suppliers,
    Task,
    ServiceRequest,
    Chat,
    LinkPreview,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServicePaths {
    pub auth: String,
    pub contract: String,
    pub device: String,
    pub customer: String,
    pub inventory: String,
    pub spare_parts: String,
    pub suppliers: String,
    pub task: String,
    pub service_request: String,
    pub chat: String,
    pub link_preview: String,
}

impl Default for ServicePaths {
    fn default() -> Self {
        Self {
            auth: "/api/auth".into(),
            contract: "/api/contract-service/v1".into(),
            device: "/api/device-service/v1".into(),
            customer: "/api/customer-service/v1".into(),
            inventory: "/api/inventory-service/v1".into(),
            spare_parts: "/api/spare-parts-service/v1".into(),
            suppliers: "/api/supplier-service/v1".into(),
            task: "/api/task-service/v1".into(),
            service_request: "/api/service-request-service/v1".into(),
            chat: "/api/chat-service/v1".into(),
            link_preview: "/api/link-preview".into(),
        }
    }
}

/// Where every backend service lives, relative to the API host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceEndpoints {
    /// Port of the API gateway on the page's host. `0` means "same origin".
    pub api_port: u16,
    pub services: ServicePaths,
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            api_port: 8080,
            services: ServicePaths::default(),
        }
    }
}

impl ServiceEndpoints {
    /// Parse a TOML document; keys it omits keep their defaults.
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let config: ServiceEndpoints = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn base_path(&self, service: Service) -> &str {
        let s = &self.services;
        match service {
            Service::Auth => &s.auth,
            Service::Contract => &s.contract,
            Service::Device => &s.device,
            Service::Customer => &s.customer,
            Service::Inventory => &s.inventory,
            Service::SpareParts => &s.spare_parts,
            Service::Suppliers => &s.suppliers,
            Service::Task => &s.task,
            Service::ServiceRequest => &s.service_request,
            Service::Chat => &s.chat,
            Service::LinkPreview => &s.link_preview,
        }
    }

    /// Service path joined with `path`, exactly one `/` between them.
    pub fn path(&self, service: Service, path: &str) -> String {
        let base = self.base_path(service).trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_default_impl() {
        let config = ServiceEndpoints::from_toml_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, ServiceEndpoints::default());
    }

    #[test]
    fn test_partial_override() {
        let config = ServiceEndpoints::from_toml_str(
            r#"
            api_port = 0
            [services]
            chat = "/chat/"
            "#,
        )
        .unwrap();
        assert_eq!(config.api_port, 0);
        assert_eq!(config.path(Service::Chat, "/sessions"), "/chat/sessions");
        assert_eq!(
            config.path(Service::Inventory, "items"),
            "/api/inventory-service/v1/items"
        );
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(ServiceEndpoints::from_toml_str("api_port = \"x\"").is_err());
    }
}
