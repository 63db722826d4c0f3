//! Role-based navigation rules for dashboard pages.

use stayio_core::roles::Role;

pub const SIGN_IN_PATH: &str = "/signin";
pub const SIGN_UP_PATH: &str = "/signup";
pub const HOME_PATH: &str = "/";

fn is_auth_page(path: &str) -> bool {
    path == SIGN_IN_PATH || path == SIGN_UP_PATH
}

fn is_dashboard_page(path: &str) -> bool {
    [Role::Manager, Role::Tenant]
        .iter()
        .any(|r| path.starts_with(r.dashboard_prefix()))
}

/// Where to send a user navigating to `path`, or `None` to let them through.
///
/// `role` is `None` for a signed-out visitor.
pub fn redirect_for(role: Option<Role>, path: &str) -> Option<&'static str> {
    match role {
        None if is_dashboard_page(path) => Some(SIGN_IN_PATH),
        None => None,
        Some(_) if is_auth_page(path) => Some(HOME_PATH),
        Some(role) => {
            let other = match role {
                Role::Manager => Role::Tenant,
                Role::Tenant => Role::Manager,
            };
            path.starts_with(other.dashboard_prefix())
                .then(|| role.home_path())
        }
    }
}
