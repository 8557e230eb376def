use crate::api::SessionUser;

/// Outcome of the one auth check made when the app mounts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unresolved,
    Anonymous,
    Authenticated(SessionUser),
}

impl SessionState {
    pub fn from_check(user: Option<SessionUser>) -> Self {
        match user {
            Some(user) => Self::Authenticated(user),
            None => Self::Anonymous,
        }
    }

    pub fn screen(&self) -> Screen {
        match self {
            Self::Unresolved => Screen::Loading,
            Self::Anonymous => Screen::Login,
            Self::Authenticated(user) => Screen::Dashboard {
                email: user.email.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Login,
    Dashboard { email: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_shows_loading() {
        assert_eq!(SessionState::default().screen(), Screen::Loading);
    }

    #[test]
    fn no_session_shows_login() {
        assert_eq!(SessionState::from_check(None).screen(), Screen::Login);
    }

    #[test]
    fn session_shows_dashboard_with_email() {
        let state = SessionState::from_check(Some(SessionUser {
            email: "a@b.com".to_string(),
        }));
        assert_eq!(
            state.screen(),
            Screen::Dashboard {
                email: "a@b.com".to_string()
            }
        );
    }
}
