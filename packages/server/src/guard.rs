//! Route guard policy.
//!
//! The routing layer declares a requirement per path and consumes the
//! three-valued decision produced here. The policy itself is a pure function
//! over the session state so it can be tested without a live store.

use serde::Serialize;
use uuid::Uuid;

use common::Role;

/// Access requirement declared by a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RouteRequirement {
    /// Public page.
    None,
    /// School dashboard: a school association must exist on the session.
    School,
    /// Admin dashboard.
    Admin,
}

/// What the route guard knows about the caller.
///
/// Transitions: `Unknown` resolves to one of the other states when credential
/// rehydration completes; `Anonymous -> Authenticated` on sign-in;
/// `Authenticated -> Anonymous` on sign-out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Credential rehydration still in flight. The guard must suspend its
    /// decision rather than redirect a legitimately signed-in user.
    Unknown,
    /// No signed-in identity.
    Anonymous,
    /// A signed-in identity with its derived role and school association.
    Authenticated {
        role: Role,
        school_id: Option<Uuid>,
    },
}

/// Outcome handed to the routing layer once the session state is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum GuardDecision {
    /// Render the requested page.
    Render,
    /// Signed in, but the role can never satisfy this route. Redirecting to
    /// the login form here would loop; send the user home instead.
    RedirectHome,
    /// No identity at all; the login form can fix that.
    RedirectLogin,
}

/// Derive the caller's role from the two role-determining lookups.
///
/// Priority `admin > school > anonymous`: an identity that is both listed as
/// an admin and has a school profile is treated as an admin.
pub fn resolve_role(is_admin_listed: bool, school_id: Option<Uuid>) -> Role {
    if is_admin_listed {
        Role::Admin
    } else if school_id.is_some() {
        Role::School
    } else {
        Role::Anonymous
    }
}

/// Evaluate the guard policy.
///
/// Returns `None` while the session is still `Unknown`: the caller renders a
/// loading indicator and retries once rehydration completes. Never redirects
/// during that window.
pub fn decide(requirement: RouteRequirement, session: &SessionState) -> Option<GuardDecision> {
    let decision = match (requirement, session) {
        (_, SessionState::Unknown) => return None,
        (RouteRequirement::None, _) => GuardDecision::Render,
        (_, SessionState::Anonymous) => GuardDecision::RedirectLogin,
        (RouteRequirement::School, SessionState::Authenticated { school_id, .. }) => {
            // Keyed on the school association, not the role label: an admin
            // with a school profile passes, an authenticated identity
            // without one does not.
            if school_id.is_some() {
                GuardDecision::Render
            } else {
                GuardDecision::RedirectHome
            }
        }
        (RouteRequirement::Admin, SessionState::Authenticated { role, .. }) => {
            if role.is_admin() {
                GuardDecision::Render
            } else {
                GuardDecision::RedirectHome
            }
        }
    };
    Some(decision)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school_session() -> SessionState {
        SessionState::Authenticated {
            role: Role::School,
            school_id: Some(Uuid::new_v4()),
        }
    }

    fn admin_session(school_id: Option<Uuid>) -> SessionState {
        SessionState::Authenticated {
            role: Role::Admin,
            school_id,
        }
    }

    /// Signed in, but neither admin-listed nor matched to a school profile.
    fn roleless_session() -> SessionState {
        SessionState::Authenticated {
            role: Role::Anonymous,
            school_id: None,
        }
    }

    #[test]
    fn unknown_state_suspends_every_requirement() {
        for req in [
            RouteRequirement::None,
            RouteRequirement::School,
            RouteRequirement::Admin,
        ] {
            assert_eq!(decide(req, &SessionState::Unknown), None);
        }
    }

    #[test]
    fn public_routes_always_render() {
        for session in [
            SessionState::Anonymous,
            school_session(),
            admin_session(None),
            roleless_session(),
        ] {
            assert_eq!(
                decide(RouteRequirement::None, &session),
                Some(GuardDecision::Render)
            );
        }
    }

    #[test]
    fn anonymous_callers_are_sent_to_login() {
        assert_eq!(
            decide(RouteRequirement::School, &SessionState::Anonymous),
            Some(GuardDecision::RedirectLogin)
        );
        assert_eq!(
            decide(RouteRequirement::Admin, &SessionState::Anonymous),
            Some(GuardDecision::RedirectLogin)
        );
    }

    #[test]
    fn school_route_requires_a_school_association() {
        assert_eq!(
            decide(RouteRequirement::School, &school_session()),
            Some(GuardDecision::Render)
        );
        // An admin with a school profile is sufficient.
        assert_eq!(
            decide(
                RouteRequirement::School,
                &admin_session(Some(Uuid::new_v4()))
            ),
            Some(GuardDecision::Render)
        );
        // Authenticated without one goes home, never back to login.
        assert_eq!(
            decide(RouteRequirement::School, &admin_session(None)),
            Some(GuardDecision::RedirectHome)
        );
        assert_eq!(
            decide(RouteRequirement::School, &roleless_session()),
            Some(GuardDecision::RedirectHome)
        );
    }

    #[test]
    fn admin_route_rejects_every_other_authenticated_session() {
        assert_eq!(
            decide(RouteRequirement::Admin, &admin_session(None)),
            Some(GuardDecision::Render)
        );
        assert_eq!(
            decide(RouteRequirement::Admin, &school_session()),
            Some(GuardDecision::RedirectHome)
        );
        assert_eq!(
            decide(RouteRequirement::Admin, &roleless_session()),
            Some(GuardDecision::RedirectHome)
        );
    }

    #[test]
    fn wrong_role_never_redirects_to_login() {
        // "Authenticated but wrong role" must not be confused with "not
        // authenticated": retrying credentials cannot satisfy the route.
        for session in [school_session(), roleless_session(), admin_session(None)] {
            for req in [RouteRequirement::School, RouteRequirement::Admin] {
                assert_ne!(
                    decide(req, &session),
                    Some(GuardDecision::RedirectLogin),
                    "{req:?} redirected an authenticated session to login"
                );
            }
        }
    }

    #[test]
    fn role_priority_is_admin_then_school() {
        let school = Some(Uuid::new_v4());
        assert_eq!(resolve_role(true, school), Role::Admin);
        assert_eq!(resolve_role(true, None), Role::Admin);
        assert_eq!(resolve_role(false, school), Role::School);
        assert_eq!(resolve_role(false, None), Role::Anonymous);
    }

    #[test]
    fn rehydrated_admin_reaches_admin_without_an_anonymous_flash() {
        // Cold start with a stored admin credential: the only states the
        // guard ever sees are Unknown (suspended) and the resolved admin
        // session. No decision in between can be a redirect.
        let mut state = SessionState::Unknown;
        assert_eq!(decide(RouteRequirement::Admin, &state), None);

        state = admin_session(None);
        assert_eq!(
            decide(RouteRequirement::Admin, &state),
            Some(GuardDecision::Render)
        );
    }

    #[test]
    fn decision_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&GuardDecision::RedirectHome).unwrap(),
            "\"redirect-home\""
        );
    }
}
