use super::role::Role;
use super::session::Session;

/// Route paths the guard redirects between.
pub mod paths {
    pub const ROOT: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const RECRUITER_DASHBOARD: &str = "/dashboard";
    pub const CANDIDATE_DASHBOARD: &str = "/candidat/dashboard";
    pub const INTERVIEWER_DASHBOARD: &str = "/interviewer/dashboard";
}

/// Outcome of a guard check. The caller performs the navigation; this
/// module only decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAction {
    /// Session still hydrating, keep the loader up.
    ShowLoader,
    /// Navigate away. `resume` carries the originally requested path
    /// when the redirect goes to login, so the caller may return there
    /// after authentication; nothing replays it automatically.
    Redirect {
        to: String,
        resume: Option<String>,
    },
    /// The requested view may be shown.
    Render,
}

impl RouteAction {
    fn redirect(to: &str) -> Self {
        RouteAction::Redirect {
            to: to.to_string(),
            resume: None,
        }
    }
}

/// Decide whether `requested_path` may render for the given session.
///
/// Pure and total; first matching clause wins:
/// 1. hydrating session shows the loader;
/// 2. no user redirects to login, remembering the requested path;
/// 3. a role outside `allowed_roles` (when non-empty) is sent to its
///    landing page — only INTERVIEWER and RECRUTEUR have one here,
///    every other role goes to login (current platform behavior,
///    pinned by test until product says otherwise);
/// 4. a candidate hitting a generic entry point (`/` or `/dashboard`)
///    is forwarded to the candidate dashboard;
/// 5. anything else renders.
pub fn decide(session: &Session, requested_path: &str, allowed_roles: &[Role]) -> RouteAction {
    if session.loading {
        return RouteAction::ShowLoader;
    }

    let user = match &session.user {
        Some(user) => user,
        None => {
            return RouteAction::Redirect {
                to: paths::LOGIN.to_string(),
                resume: Some(requested_path.to_string()),
            }
        }
    };

    if !allowed_roles.is_empty() && !allowed_roles.contains(&user.role) {
        return match user.role {
            Role::Interviewer => RouteAction::redirect(paths::INTERVIEWER_DASHBOARD),
            Role::Recruteur => RouteAction::redirect(paths::RECRUITER_DASHBOARD),
            _ => RouteAction::redirect(paths::LOGIN),
        };
    }

    let entry_point =
        requested_path == paths::ROOT || requested_path == paths::RECRUITER_DASHBOARD;
    if entry_point && user.role == Role::Candidat {
        return RouteAction::redirect(paths::CANDIDATE_DASHBOARD);
    }

    RouteAction::Render
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::User;

    fn session_with(role: Role) -> Session {
        Session {
            token: Some("jwt-abc".to_string()),
            user: Some(User {
                user_id: "u-1".to_string(),
                email: "user@example.com".to_string(),
                nom: "Martin".to_string(),
                prenom: "Alex".to_string(),
                role,
            }),
            loading: false,
        }
    }

    #[test]
    fn loading_session_shows_loader_regardless_of_inputs() {
        let mut session = session_with(Role::Recruteur);
        session.loading = true;
        assert_eq!(
            decide(&session, "/analytics", &[Role::Recruteur]),
            RouteAction::ShowLoader
        );
        assert_eq!(decide(&session, "/", &[]), RouteAction::ShowLoader);
    }

    #[test]
    fn anonymous_session_redirects_to_login_with_resume_path() {
        let session = Session::anonymous();
        assert_eq!(
            decide(&session, "/offres/42", &[Role::Recruteur]),
            RouteAction::Redirect {
                to: "/login".to_string(),
                resume: Some("/offres/42".to_string()),
            }
        );
    }

    #[test]
    fn allowed_role_renders() {
        let session = session_with(Role::Recruteur);
        assert_eq!(
            decide(&session, "/analytics", &[Role::Recruteur]),
            RouteAction::Render
        );
    }

    #[test]
    fn denied_interviewer_lands_on_interviewer_dashboard() {
        let session = session_with(Role::Interviewer);
        assert_eq!(
            decide(&session, "/offres", &[Role::Recruteur]),
            RouteAction::redirect("/interviewer/dashboard")
        );
    }

    #[test]
    fn denied_recruteur_lands_on_recruiter_dashboard() {
        let session = session_with(Role::Recruteur);
        assert_eq!(
            decide(&session, "/candidat/offres", &[Role::Candidat]),
            RouteAction::redirect("/dashboard")
        );
    }

    // Candidates denied by a role check are sent to login rather than
    // their own dashboard; kept until product confirms the intent.
    #[test]
    fn candidat_denied_path_goes_to_login() {
        let session = session_with(Role::Candidat);
        assert_eq!(
            decide(&session, "/analytics", &[Role::Recruteur]),
            RouteAction::redirect("/login")
        );
    }

    #[test]
    fn admin_denied_path_goes_to_login() {
        let session = session_with(Role::Admin);
        assert_eq!(
            decide(&session, "/offres", &[Role::Recruteur]),
            RouteAction::redirect("/login")
        );
    }

    #[test]
    fn candidate_entry_points_forward_to_candidate_dashboard() {
        let session = session_with(Role::Candidat);
        assert_eq!(
            decide(&session, "/dashboard", &[]),
            RouteAction::redirect("/candidat/dashboard")
        );
        assert_eq!(
            decide(&session, "/", &[]),
            RouteAction::redirect("/candidat/dashboard")
        );
    }

    #[test]
    fn recruiter_entry_points_render() {
        let session = session_with(Role::Recruteur);
        assert_eq!(decide(&session, "/dashboard", &[]), RouteAction::Render);
    }

    #[test]
    fn candidate_specific_paths_render_for_candidates() {
        let session = session_with(Role::Candidat);
        assert_eq!(
            decide(&session, "/candidat/offres", &[Role::Candidat]),
            RouteAction::Render
        );
    }
}
