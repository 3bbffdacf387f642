//! Pre-navigation guard.
//!
//! Installed by the router as a hook evaluated once per navigation attempt.
//! The guard reads session state back from the store and either allows the
//! transition or redirects it; it never mutates state beyond triggering a
//! restore.

use std::sync::Arc;

use crate::domain::session::{is_public_path, routes};

use super::SessionStore;

/// Verdict for one navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Let the transition proceed unchanged.
    Allow,
    /// Send the user to another path instead.
    Redirect(&'static str),
}

impl RouteDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, RouteDecision::Allow)
    }

    pub fn redirect_target(self) -> Option<&'static str> {
        match self {
            RouteDecision::Allow => None,
            RouteDecision::Redirect(target) => Some(target),
        }
    }
}

/// Gates route transitions on session state.
#[derive(Debug)]
pub struct NavigationGuard {
    store: Arc<SessionStore>,
}

impl NavigationGuard {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Evaluates one navigation attempt toward `target`.
    ///
    /// A page reload loses in-memory state while storage may still hold a
    /// valid token, so restoration settles before any rule is evaluated;
    /// the rules below read the token as recomputed by that restore.
    pub async fn before_each(&self, target: &str) -> RouteDecision {
        if self.store.persisted_token().is_some() && self.store.current_user().is_none() {
            self.store.restore_user().await;
        }

        let token = self.store.token();

        if token.is_none() && !is_public_path(target) {
            return RouteDecision::Redirect(routes::LOGIN);
        }

        if token.is_some() && (target == routes::LOGIN || target == routes::REGISTER) {
            return RouteDecision::Redirect(routes::DASHBOARD);
        }

        RouteDecision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::{MockTransport, StubMethod};
    use crate::adapters::storage::InMemoryStorage;
    use crate::ports::TransportError;
    use serde_json::json;

    fn guard_with(
        transport: MockTransport,
        storage: InMemoryStorage,
    ) -> (Arc<SessionStore>, NavigationGuard) {
        let store = Arc::new(SessionStore::new(Arc::new(transport), Arc::new(storage)));
        (store.clone(), NavigationGuard::new(store))
    }

    fn me_payload() -> serde_json::Value {
        json!({"id": 1, "email": "user@example.com", "is_profile_completed": true})
    }

    #[tokio::test]
    async fn unauthenticated_protected_navigation_redirects_to_login() {
        let (_, guard) = guard_with(MockTransport::new(), InMemoryStorage::new());

        let decision = guard.before_each("/dashboard").await;

        assert_eq!(decision, RouteDecision::Redirect("/login"));
    }

    #[tokio::test]
    async fn unauthenticated_public_navigation_is_allowed() {
        let (_, guard) = guard_with(MockTransport::new(), InMemoryStorage::new());

        assert!(guard.before_each("/login").await.is_allowed());
        assert!(guard.before_each("/register").await.is_allowed());
        assert!(guard.before_each("/forgot-password").await.is_allowed());
        assert!(guard.before_each("/reset-password/42/tok/").await.is_allowed());
    }

    #[tokio::test]
    async fn authenticated_login_navigation_redirects_to_dashboard() {
        let transport = MockTransport::new()
            .with_json(StubMethod::Get, "users/me/", me_payload())
            .with_json(StubMethod::Get, "profiles/complete-profile/", json!({}));
        let (_, guard) = guard_with(transport, InMemoryStorage::with_token("t"));

        assert_eq!(
            guard.before_each("/login").await,
            RouteDecision::Redirect("/dashboard")
        );
        assert_eq!(
            guard.before_each("/register").await,
            RouteDecision::Redirect("/dashboard")
        );
    }

    #[tokio::test]
    async fn authenticated_protected_navigation_is_allowed() {
        let transport = MockTransport::new()
            .with_json(StubMethod::Get, "users/me/", me_payload())
            .with_json(StubMethod::Get, "profiles/complete-profile/", json!({}));
        let (_, guard) = guard_with(transport, InMemoryStorage::with_token("t"));

        assert!(guard.before_each("/dashboard").await.is_allowed());
        assert!(guard.before_each("/orders").await.is_allowed());
    }

    #[tokio::test]
    async fn guard_restores_session_before_deciding() {
        let transport = MockTransport::new()
            .with_json(StubMethod::Get, "users/me/", me_payload())
            .with_json(StubMethod::Get, "profiles/complete-profile/", json!({}));
        let (store, guard) = guard_with(transport, InMemoryStorage::with_token("t"));

        assert!(store.current_user().is_none());

        // The just-restored token is honored within the same attempt.
        let decision = guard.before_each("/dashboard").await;

        assert!(decision.is_allowed());
        assert!(store.current_user().is_some());
    }

    #[tokio::test]
    async fn failed_restore_falls_through_to_login_redirect() {
        let transport = MockTransport::new().with_error(
            StubMethod::Get,
            "users/me/",
            TransportError::Status {
                status: 401,
                body: json!({"detail": "Invalid token."}),
            },
        );
        let (store, guard) = guard_with(transport, InMemoryStorage::with_token("expired"));

        let decision = guard.before_each("/dashboard").await;

        assert_eq!(decision, RouteDecision::Redirect("/login"));
        assert!(store.token().is_none());
        assert!(store.persisted_token().is_none());
    }

    #[tokio::test]
    async fn restore_is_skipped_once_user_is_loaded() {
        let transport = Arc::new(
            MockTransport::new()
                .with_json(StubMethod::Get, "users/me/", me_payload())
                .with_json(StubMethod::Get, "profiles/complete-profile/", json!({})),
        );
        let store = Arc::new(SessionStore::new(
            transport.clone(),
            Arc::new(InMemoryStorage::with_token("t")),
        ));
        let guard = NavigationGuard::new(store);

        guard.before_each("/dashboard").await;
        let after_first = transport.request_count();

        guard.before_each("/orders").await;
        guard.before_each("/dashboard").await;

        assert_eq!(transport.request_count(), after_first);
    }

    #[tokio::test]
    async fn deep_public_paths_do_not_trigger_login_redirect() {
        let (_, guard) = guard_with(MockTransport::new(), InMemoryStorage::new());

        assert!(guard
            .before_each("/reset-password/7/abcdef123456/")
            .await
            .is_allowed());
    }
}
