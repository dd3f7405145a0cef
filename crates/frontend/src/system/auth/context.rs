use contracts::system::auth::{LoginResponse, Role, UserInfo};
use leptos::prelude::*;

use super::{api, storage};
use crate::shared::http::ApiClient;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
    /// Message shown on the login page after a forced logout.
    pub notice: Option<String>,
}

impl SessionState {
    /// A session is only restored when both the token and the user are present.
    pub fn restored(token: Option<String>, user: Option<UserInfo>) -> Self {
        match (token, user) {
            (Some(token), Some(user)) => Self {
                token: Some(token),
                user: Some(user),
                notice: None,
            },
            _ => Self::default(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn role(&self) -> Option<&Role> {
        self.user.as_ref().map(|u| &u.role)
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.is_authenticated() && self.role() == Some(role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(&Role::Admin)
    }
}

/// Session injected at app start and read by the guard, the header and the
/// HTTP client.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub state: RwSignal<SessionState>,
}

impl SessionContext {
    pub fn restore() -> Self {
        let state = SessionState::restored(storage::get_token(), storage::get_user());
        if state.is_authenticated() {
            log::info!("session restored from local storage");
        }
        Self {
            state: RwSignal::new(state),
        }
    }

    /// Current token, read without tracking.
    pub fn token(&self) -> Option<String> {
        self.state
            .try_with_untracked(|s| s.token.clone())
            .flatten()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(SessionState::is_authenticated)
    }

    pub fn is_admin(&self) -> bool {
        self.state.with(SessionState::is_admin)
    }

    pub fn user_name(&self) -> Option<String> {
        self.state.with(|s| s.user.as_ref().map(|u| u.name.clone()))
    }

    pub fn establish(&self, response: LoginResponse) {
        storage::save_token(&response.token);
        storage::save_user(&response.user);
        log::info!(
            "signed in as {} ({})",
            response.user.email,
            response.user.role.as_str()
        );
        self.state.set(SessionState {
            token: Some(response.token),
            user: Some(response.user),
            notice: None,
        });
    }

    pub fn logout(&self) {
        storage::clear_session();
        self.state.set(SessionState::default());
    }

    /// Drops the credential after the API rejected it.
    pub fn invalidate(&self) {
        storage::clear_session();
        let _ = self.state.try_set(SessionState {
            notice: Some("Tu sesión expiró. Inicia sesión nuevamente.".to_string()),
            ..SessionState::default()
        });
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    provide_context(SessionContext::restore());
    children()
}

/// Hook to access the session
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("AuthProvider not found in component tree")
}

/// Helper: Perform login and store the session
pub async fn do_login(session: SessionContext, email: String, password: String) -> Result<(), String> {
    let response = api::login(&ApiClient::anonymous(), email, password)
        .await
        .map_err(|e| e.to_string())?;
    session.establish(response);
    Ok(())
}

/// Helper: Perform logout
pub fn do_logout(session: SessionContext) {
    log::info!("signed out");
    session.logout();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> UserInfo {
        UserInfo {
            id: "U1".into(),
            name: "Ana".into(),
            email: "ana@melarium.com".into(),
            role,
        }
    }

    #[test]
    fn restore_needs_token_and_user() {
        assert!(!SessionState::restored(Some("t".into()), None).is_authenticated());
        assert!(!SessionState::restored(None, Some(user(Role::Admin))).is_authenticated());
        assert!(SessionState::restored(Some("t".into()), Some(user(Role::Admin))).is_admin());
    }

    #[test]
    fn role_lookup() {
        let visitor = SessionState::restored(Some("t".into()), Some(user(Role::Visitor)));
        assert!(visitor.is_authenticated());
        assert!(!visitor.is_admin());
        assert!(visitor.has_role(&Role::Visitor));
        assert!(!SessionState::default().has_role(&Role::Admin));
    }
}
