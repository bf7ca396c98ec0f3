//! # Navigation guard
//!
//! Every destination declares what it needs through [`RouteRequirement`]. The
//! guard is a pure function of that requirement and a [`SessionSnapshot`]:
//!
//! 1. auth required but signed out: redirect to `/login`
//! 2. role required but the user has another role (or none): redirect to the
//!    user's landing page
//! 3. otherwise allow
//!
//! Nothing is remembered between navigations.

use api::Role;

use crate::session::SessionSnapshot;

/// Access rules attached to a destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRequirement {
    pub requires_auth: bool,
    pub role: Option<Role>,
}

impl RouteRequirement {
    /// Open to everyone.
    pub const fn public() -> Self {
        Self {
            requires_auth: false,
            role: None,
        }
    }

    /// Signed-in users with the given role.
    pub fn role(role: Role) -> Self {
        Self {
            requires_auth: true,
            role: Some(role),
        }
    }
}

/// Outcome of one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(AppRoute),
}

/// The application's destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Home,
    Login,
    Doctor,
    DoctorSlots,
    Patient,
}

impl AppRoute {
    pub const ALL: [AppRoute; 5] = [
        AppRoute::Home,
        AppRoute::Login,
        AppRoute::Doctor,
        AppRoute::DoctorSlots,
        AppRoute::Patient,
    ];

    pub fn path(self) -> &'static str {
        match self {
            AppRoute::Home => "/",
            AppRoute::Login => "/login",
            AppRoute::Doctor => "/doctor",
            AppRoute::DoctorSlots => "/doctor/slots",
            AppRoute::Patient => "/patient",
        }
    }

    /// Resolve a path, ignoring a trailing slash. Unknown paths map to
    /// [`AppRoute::Home`].
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
            .unwrap_or(AppRoute::Home)
    }

    pub fn requirement(self) -> RouteRequirement {
        match self {
            AppRoute::Home | AppRoute::Login => RouteRequirement::public(),
            AppRoute::Doctor | AppRoute::DoctorSlots => RouteRequirement::role(Role::Doctor),
            AppRoute::Patient => RouteRequirement::role(Role::Patient),
        }
    }
}

impl std::fmt::Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Where a user lands after sign-in or a denied navigation.
pub fn landing_for(session: &SessionSnapshot) -> AppRoute {
    if session.is_doctor() {
        AppRoute::Doctor
    } else if session.is_patient() {
        AppRoute::Patient
    } else {
        AppRoute::Login
    }
}

pub fn evaluate(requirement: &RouteRequirement, session: &SessionSnapshot) -> GuardDecision {
    if requirement.requires_auth && !session.is_authenticated() {
        return GuardDecision::Redirect(AppRoute::Login);
    }

    if let Some(role) = &requirement.role {
        if session.role() != Some(role) {
            return GuardDecision::Redirect(landing_for(session));
        }
    }

    GuardDecision::Allow
}

/// [`evaluate`] for a known destination.
pub fn evaluate_route(route: AppRoute, session: &SessionSnapshot) -> GuardDecision {
    let decision = evaluate(&route.requirement(), session);
    if let GuardDecision::Redirect(to) = &decision {
        tracing::debug!(from = %route, to = %to, "Navigation redirected");
    }
    decision
}

/// [`evaluate_route`] for a raw router path, as resolved by
/// [`AppRoute::from_path`].
pub fn evaluate_path(path: &str, session: &SessionSnapshot) -> GuardDecision {
    evaluate_route(AppRoute::from_path(path), session)
}
