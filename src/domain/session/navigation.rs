//! Route table and navigation signals.
//!
//! Session operations never touch the router directly. When an operation
//! decides the user belongs somewhere else, it returns a
//! [`NavigationIntent`] and the calling layer performs the move.

/// Client route paths.
pub mod routes {
    pub const DASHBOARD: &str = "/dashboard";
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    pub const PROFILE: &str = "/profile";
    pub const FORGOT_PASSWORD: &str = "/forgot-password";
    pub const RESET_PASSWORD: &str = "/reset-password";
    pub const CREATE_PROJECT: &str = "/create-project";
    pub const ORDERS: &str = "/orders";
    pub const PROFESSORS: &str = "/professors";
    pub const NOTIFICATIONS: &str = "/notifications";
    pub const LIKED: &str = "/liked";
}

/// Pages reachable without a token.
///
/// Matched by prefix so parameterized paths like `/reset-password/{uid}/{token}`
/// classify as public.
const PUBLIC_PREFIXES: [&str; 4] = [
    routes::LOGIN,
    routes::REGISTER,
    routes::FORGOT_PASSWORD,
    routes::RESET_PASSWORD,
];

/// Returns `true` when the target path is reachable without authentication.
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

/// A navigation the session layer wants the caller to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    /// The user's profile is incomplete; send them to the profile page.
    ToProfile,
    /// A completed flow lands the user on the dashboard.
    ToDashboard,
}

impl NavigationIntent {
    /// Route path the intent points at.
    pub fn target(self) -> &'static str {
        match self {
            NavigationIntent::ToProfile => routes::PROFILE,
            NavigationIntent::ToDashboard => routes::DASHBOARD,
        }
    }
}
