use contracts::shared::config::Service;
use contracts::shared::ApiResult;
use contracts::system::auth::{LoginRequest, LoginResponse};

use crate::shared::api_utils::{post_json, service_url};

/// Exchange credentials for a bearer token.
pub async fn login(username: String, password: String) -> ApiResult<LoginResponse> {
    let request = LoginRequest { username, password };
    post_json(&service_url(Service::Auth, "login"), &request).await
}
