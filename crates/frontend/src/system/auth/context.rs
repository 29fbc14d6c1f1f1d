use contracts::system::auth::{LoginRequest, UserInfo};
use leptos::prelude::*;

use super::{api, storage};
use crate::shared::api_utils::{api_base, ApiContext};
use crate::shared::cancel::CancelToken;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_super_admin(&self) -> bool {
        self.user
            .as_ref()
            .map(|u| u.role.is_super_admin())
            .unwrap_or(false)
    }

    pub fn can_manage_work_orders(&self) -> bool {
        self.user
            .as_ref()
            .map(|u| u.role.can_manage_work_orders())
            .unwrap_or(false)
    }

    /// Request context for service calls made on behalf of this session
    pub fn api_context(&self) -> ApiContext {
        ApiContext::new(api_base(), self.token.clone())
    }
}

/// Auth context provider component.
///
/// The session is restored synchronously from localStorage so the first
/// render already knows whether to show the login page.
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let initial = match storage::load_session() {
        Some((token, user)) => {
            log::debug!("session restored for {}", user.username);
            AuthState {
                token: Some(token),
                user: Some(user),
            }
        }
        None => AuthState::default(),
    };
    let auth_state = RwSignal::new(initial);
    provide_context(auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> RwSignal<AuthState> {
    use_context::<RwSignal<AuthState>>().unwrap_or_else(|| {
        log::error!("AuthProvider not found in component tree");
        RwSignal::new(AuthState::default())
    })
}

/// Current request context (untracked read)
pub fn use_api_context() -> ApiContext {
    use_auth().with_untracked(AuthState::api_context)
}

/// Log in, persist the session and publish it to the auth context
pub async fn do_login(
    auth: RwSignal<AuthState>,
    request: LoginRequest,
    cancel: &CancelToken,
) -> Result<(), String> {
    let response = api::login(&request, cancel).await?;
    storage::save_session(&response.token, &response.user);
    log::info!("logged in as {}", response.user.username);
    auth.set(AuthState {
        token: Some(response.token),
        user: Some(response.user),
    });
    Ok(())
}

pub fn do_logout(auth: RwSignal<AuthState>) {
    storage::clear_session();
    auth.set(AuthState::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::users::Role;

    fn user(role: Role) -> UserInfo {
        UserInfo {
            id: "u1".into(),
            username: "ana".into(),
            role,
            tenant_id: None,
        }
    }

    #[test]
    fn test_roles_gate_features() {
        let state = AuthState {
            token: Some("t".into()),
            user: Some(user(Role::Admin)),
        };
        assert!(state.is_authenticated());
        assert!(state.can_manage_work_orders());
        assert!(!state.is_super_admin());

        let anonymous = AuthState::default();
        assert!(!anonymous.is_authenticated());
        assert!(!anonymous.can_manage_work_orders());
    }
}
