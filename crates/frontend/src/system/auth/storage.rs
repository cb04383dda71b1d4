//! Bearer token and signed-in user kept in `localStorage`.

use contracts::system::auth::UserInfo;
use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "auth_access_token";
const USER_INFO_KEY: &str = "auth_user_info";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

pub fn save_access_token(token: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(ACCESS_TOKEN_KEY, token);
    }
}

pub fn get_access_token() -> Option<String> {
    get_local_storage()?
        .get_item(ACCESS_TOKEN_KEY)
        .ok()?
        .filter(|t| !t.is_empty())
}

pub fn save_user_info(user: &UserInfo) {
    let Some(storage) = get_local_storage() else {
        return;
    };
    match serde_json::to_string(user) {
        Ok(json) => {
            let _ = storage.set_item(USER_INFO_KEY, &json);
        }
        Err(e) => log::warn!("user info not stored: {e}"),
    }
}

pub fn get_user_info() -> Option<UserInfo> {
    let json = get_local_storage()?.get_item(USER_INFO_KEY).ok()??;
    serde_json::from_str(&json).ok()
}

/// Forget the session.
pub fn clear_tokens() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(USER_INFO_KEY);
    }
}
