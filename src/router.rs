//! Role router and guard.
//!
//! Maps an authenticated identity to its permitted route subtree and
//! redirects everything else. The guard is a pure function over the current
//! identity — callers re-evaluate it on every navigation, never cache the
//! decision, because identity and role can change between renders (logout,
//! forced logout on a 401).

use crate::models::{Account, Role};

// ═══════════════════════════════════════════════════════════
// Routes
// ═══════════════════════════════════════════════════════════

/// The closed route table. One dashboard per role plus the two public pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Patient,
    Doctor,
    Lab,
    Pharmacy,
    Admin,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Patient => "/patient",
            Route::Doctor => "/doctor",
            Route::Lab => "/lab",
            Route::Pharmacy => "/pharmacy",
            Route::Admin => "/admin",
        }
    }

    /// Roles admitted to this route. Empty slice means public.
    pub fn required_roles(&self) -> &'static [Role] {
        match self {
            Route::Login | Route::Register => &[],
            Route::Patient => &[Role::Patient],
            Route::Doctor => &[Role::Doctor],
            Route::Lab => &[Role::LabTechnician],
            Route::Pharmacy => &[Role::Pharmacy],
            Route::Admin => &[Role::Admin],
        }
    }
}

/// Home route for a role — total over all five roles, so adding a role is a
/// compile-time-checked change.
pub fn home_route(role: Role) -> Route {
    match role {
        Role::Patient => Route::Patient,
        Role::Doctor => Route::Doctor,
        Role::LabTechnician => Route::Lab,
        Role::Pharmacy => Route::Pharmacy,
        Role::Admin => Route::Admin,
    }
}

// ═══════════════════════════════════════════════════════════
// Guard
// ═══════════════════════════════════════════════════════════

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    /// Unauthenticated — go to login.
    RedirectLogin,
    /// Authenticated but mis-rolled — go to the caller's own home,
    /// never expose the target page's data.
    RedirectHome(Route),
}

/// Check whether `identity` may enter a page restricted to `required`.
///
/// Empty `required` admits any authenticated identity. The decision is made
/// before any page data is fetched.
pub fn guard(required: &[Role], identity: Option<&Account>) -> RouteDecision {
    let Some(account) = identity else {
        return RouteDecision::RedirectLogin;
    };
    if !required.is_empty() && !required.contains(&account.role) {
        return RouteDecision::RedirectHome(home_route(account.role));
    }
    RouteDecision::Allow
}

/// Guard for a concrete route from the closed table.
pub fn guard_route(route: Route, identity: Option<&Account>) -> RouteDecision {
    guard(route.required_roles(), identity)
}

/// Where the root path lands: the role's home when authenticated, login
/// otherwise.
pub fn resolve_root(identity: Option<&Account>) -> Route {
    match identity {
        Some(account) => home_route(account.role),
        None => Route::Login,
    }
}
