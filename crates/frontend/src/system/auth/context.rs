use contracts::system::auth::UserInfo;
use leptos::prelude::*;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Name shown in the header and used as the sender of chat drafts.
    pub fn display_name(&self) -> String {
        self.user_info
            .as_ref()
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| "Guest".to_string())
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    // Restore the session kept in localStorage; a token that no longer works
    // surfaces as an "unauthorized" error on the first page load.
    let restored = AuthState {
        access_token: storage::get_access_token(),
        user_info: storage::get_user_info(),
    };
    if restored.is_authenticated() {
        log::info!("session restored for {}", restored.display_name());
    }
    let (auth_state, set_auth_state) = signal(restored);

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Perform login and switch the shell to the signed-in layout.
pub async fn do_login(
    username: String,
    password: String,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), String> {
    let response = api::login(username, password)
        .await
        .map_err(|e| e.to_string())?;

    storage::save_access_token(&response.access_token);
    storage::save_user_info(&response.user);
    log::info!("signed in as {}", response.user.username);

    set_auth_state.set(AuthState {
        access_token: Some(response.access_token),
        user_info: Some(response.user),
    });
    Ok(())
}

pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
    log::info!("signed out");
}
