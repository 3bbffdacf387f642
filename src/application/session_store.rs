//! Session store: every state-changing session operation.
//!
//! The store owns the [`Session`] context object and mutates it exclusively
//! through the operations below. Network access goes through the
//! [`Transport`] port; the bearer token is mirrored to the [`SessionStorage`]
//! port on every transition that sets or clears it.
//!
//! Navigation is never performed here. Operations that want the user
//! somewhere else return a [`NavigationIntent`] for the caller to interpret.
//!
//! # Error styles
//!
//! - `register`, `login`, `update_profile` raise typed errors.
//! - `request_password_reset`, `reset_password` return a [`ResetOutcome`].
//! - The team/profile fetches swallow failures and fall back to defaults.
//! - A failed user fetch or restore forces `logout()`: an unreadable
//!   identity response means the token is invalid or expired.

use std::sync::{Arc, RwLock};

use serde_json::{json, Value};

use crate::domain::session::{
    AuthError, NavigationIntent, ProfileUpdateError, RegistrationError, ResetOutcome, Session,
};
use crate::domain::team::{payload_indicates_membership, JoinRequestSnapshot, JoinRequestStatus};
use crate::domain::user::{ProfileRecord, Role, UserSummary};
use crate::ports::{SessionStorage, Transport, TransportError, TOKEN_KEY, USER_KEY};

/// Backend endpoint paths, relative to the configured API base.
mod endpoints {
    pub const REGISTER: &str = "users/register/";
    pub const LOGIN: &str = "users/login/";
    pub const ME: &str = "users/me/";
    pub const FORGOT_PASSWORD: &str = "users/forgot-password/";
    pub const MY_TEAM: &str = "teams/my/";
    pub const MY_JOIN_REQUEST: &str = "teams/my-join-request/";
    pub const COMPLETE_PROFILE: &str = "profiles/complete-profile/";

    pub fn reset_password(uid: &str, token: &str) -> String {
        format!("users/reset-password/{uid}/{token}/")
    }
}

/// Result of a successful profile update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdated {
    /// The profile record the server answered with.
    pub profile: ProfileRecord,
    /// Where the caller should take the user next.
    pub intent: NavigationIntent,
}

/// Holds the current session and performs its state transitions.
///
/// Public async operations serialize on an internal action lock, so
/// overlapping calls from different tasks cannot interleave their
/// suspension points. `logout()` stays synchronous and outside the lock;
/// a logout landing mid-operation is last-write-wins on the session cell.
pub struct SessionStore {
    transport: Arc<dyn Transport>,
    storage: Arc<dyn SessionStorage>,
    session: RwLock<Session>,
    action_lock: tokio::sync::Mutex<()>,
}

impl SessionStore {
    /// Creates a store with the session token seeded from storage.
    pub fn new(transport: Arc<dyn Transport>, storage: Arc<dyn SessionStorage>) -> Self {
        let session = match storage.get(TOKEN_KEY) {
            Some(token) => Session::with_token(token),
            None => Session::new(),
        };

        Self {
            transport,
            storage,
            session: RwLock::new(session),
            action_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Clone of the current session for UI display.
    pub fn snapshot(&self) -> Session {
        self.session.read().unwrap().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.session.read().unwrap().token().map(str::to_string)
    }

    pub fn current_user(&self) -> Option<UserSummary> {
        self.session.read().unwrap().user().cloned()
    }

    pub fn full_profile(&self) -> Option<ProfileRecord> {
        self.session.read().unwrap().full_profile().cloned()
    }

    pub fn has_team(&self) -> bool {
        self.session.read().unwrap().has_team()
    }

    pub fn has_pending_join_request(&self) -> bool {
        self.session.read().unwrap().has_pending_join_request()
    }

    pub fn pending_join_request(&self) -> Option<JoinRequestSnapshot> {
        self.session.read().unwrap().pending_join_request().cloned()
    }

    /// The token held in durable storage, if any.
    pub fn persisted_token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }

    /// Registers a new account.
    ///
    /// When the response carries a token the session adopts it and fetches
    /// the user; a failure in that follow-up fetch cascades to logout
    /// instead of failing the registration.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
        role: Role,
    ) -> Result<Option<NavigationIntent>, RegistrationError> {
        let _action = self.action_lock.lock().await;

        let body = json!({
            "email": email,
            "password": password,
            "confirm_password": confirm_password,
            "role": role,
        });
        let response = self
            .transport
            .post(endpoints::REGISTER, body, None)
            .await
            .map_err(|e| RegistrationError::from_transport(&e))?;

        let mut intent = None;
        if let Some(token) = response.data.get("token").and_then(Value::as_str) {
            self.store_token(token);
            intent = self.fetch_user_or_logout().await;
        }
        Ok(intent)
    }

    /// Authenticates with email and password.
    ///
    /// Requires the response to contain an access token. On success the
    /// token is stored and persisted, the user summary is fetched, and the
    /// full profile is fetched best-effort. Returns
    /// `Some(NavigationIntent::ToProfile)` when the profile is incomplete.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<NavigationIntent>, AuthError> {
        let _action = self.action_lock.lock().await;

        let body = json!({"email": email, "password": password});
        let response = self
            .transport
            .post(endpoints::LOGIN, body, None)
            .await
            .map_err(|e| AuthError::from_transport(&e))?;

        let Some(access) = response.data.get("access").and_then(Value::as_str) else {
            return Err(AuthError::new("Access token missing"));
        };
        self.store_token(access);

        let intent = self
            .fetch_user_remote()
            .await
            .map_err(|e| AuthError::from_transport(&e))?;
        self.fetch_full_profile_remote().await;

        Ok(intent)
    }

    /// Fetches the user summary with the held token.
    ///
    /// No-op with a warning when no token is held. A failure forces logout
    /// and is not surfaced to the caller.
    pub async fn fetch_user(&self) -> Option<NavigationIntent> {
        let _action = self.action_lock.lock().await;
        self.fetch_user_or_logout().await
    }

    /// Fetches the extended profile payload, best-effort.
    pub async fn fetch_full_profile(&self) {
        let _action = self.action_lock.lock().await;
        self.fetch_full_profile_remote().await;
    }

    /// Refreshes the team-membership flag, best-effort.
    pub async fn fetch_team_status(&self) {
        let _action = self.action_lock.lock().await;
        self.fetch_team_status_remote().await;
    }

    /// Refreshes the outstanding-join-request state, best-effort.
    pub async fn fetch_pending_request(&self) {
        let _action = self.action_lock.lock().await;
        self.fetch_pending_request_remote().await;
    }

    /// Refreshes both team flags sequentially.
    pub async fn refresh_team_and_request_status(&self) {
        let _action = self.action_lock.lock().await;
        self.fetch_team_status_remote().await;
        self.fetch_pending_request_remote().await;
    }

    /// Submits profile data and marks the profile completed.
    ///
    /// On success the updated user snapshot is persisted and the caller is
    /// pointed at the dashboard.
    pub async fn update_profile(
        &self,
        profile_data: Value,
    ) -> Result<ProfileUpdated, ProfileUpdateError> {
        let _action = self.action_lock.lock().await;

        let token = self.token();
        let response = self
            .transport
            .put(endpoints::COMPLETE_PROFILE, profile_data, token.as_deref())
            .await
            .map_err(|e| {
                tracing::warn!("profile update failed: {}", e);
                ProfileUpdateError
            })?;

        let profile: ProfileRecord = serde_json::from_value(response.data).map_err(|e| {
            tracing::warn!("failed to decode updated profile: {}", e);
            ProfileUpdateError
        })?;

        if let Some(user) = self.write(Session::mark_profile_completed) {
            match serde_json::to_string(&user) {
                Ok(snapshot) => self.storage.set(USER_KEY, &snapshot),
                Err(e) => tracing::warn!("failed to serialize user snapshot: {}", e),
            }
        }

        Ok(ProfileUpdated {
            profile,
            intent: NavigationIntent::ToDashboard,
        })
    }

    /// Rebuilds the in-memory session from a persisted token.
    ///
    /// No-op when storage holds no token. A failed user fetch cascades to
    /// logout. The restore path never redirects; profile enforcement
    /// happens on login and explicit user fetches.
    pub async fn restore_user(&self) {
        let _action = self.action_lock.lock().await;

        let Some(token) = self.storage.get(TOKEN_KEY) else {
            return;
        };
        self.write(|s| s.adopt_token(token));

        match self.fetch_user_remote().await {
            Ok(_intent) => self.fetch_full_profile_remote().await,
            Err(e) => {
                tracing::warn!("session restore failed: {}; logging out", e);
                self.logout();
            }
        }
    }

    /// Clears the session and removes the persisted token.
    ///
    /// Synchronous; performs no navigation and no network calls.
    pub fn logout(&self) {
        self.write(Session::clear);
        self.storage.remove(TOKEN_KEY);
    }

    /// Requests a password-reset email. Never raises.
    pub async fn request_password_reset(&self, email: &str) -> ResetOutcome {
        let _action = self.action_lock.lock().await;

        let body = json!({"email": email});
        match self
            .transport
            .post(endpoints::FORGOT_PASSWORD, body, None)
            .await
        {
            Ok(_) => ResetOutcome::succeeded("Reset link sent to your email."),
            Err(e) => ResetOutcome::from_transport(&e),
        }
    }

    /// Sets a new password using a reset token pair. Never raises.
    pub async fn reset_password(
        &self,
        uid: &str,
        token: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> ResetOutcome {
        let _action = self.action_lock.lock().await;

        let body = json!({
            "new_password": new_password,
            "confirm_password": confirm_password,
        });
        match self
            .transport
            .put(&endpoints::reset_password(uid, token), body, None)
            .await
        {
            Ok(_) => ResetOutcome::succeeded("Password reset successful."),
            Err(e) => ResetOutcome::from_transport(&e),
        }
    }

    // Inner fetches do not take the action lock; public operations compose
    // them while already holding it.

    fn write<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut self.session.write().unwrap())
    }

    /// Adopts a token in memory and mirrors it to storage.
    fn store_token(&self, token: &str) {
        self.write(|s| s.adopt_token(token));
        self.storage.set(TOKEN_KEY, token);
    }

    async fn fetch_user_remote(&self) -> Result<Option<NavigationIntent>, TransportError> {
        let token = self.token();
        let response = self.transport.get(endpoints::ME, token.as_deref()).await?;

        let user: UserSummary = serde_json::from_value(response.data)
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        let intent = (!user.is_profile_completed).then_some(NavigationIntent::ToProfile);

        self.write(|s| {
            // A logout can land between the await and here; don't resurrect
            // a user into a cleared session.
            if s.is_authenticated() {
                s.set_user(user);
            }
        });

        Ok(intent)
    }

    async fn fetch_user_or_logout(&self) -> Option<NavigationIntent> {
        if self.token().is_none() {
            tracing::warn!("no token held; skipping user fetch");
            return None;
        }

        match self.fetch_user_remote().await {
            Ok(intent) => intent,
            Err(e) => {
                tracing::warn!("failed to fetch user: {}; logging out", e);
                self.logout();
                None
            }
        }
    }

    async fn fetch_full_profile_remote(&self) {
        let token = self.token();
        match self
            .transport
            .get(endpoints::COMPLETE_PROFILE, token.as_deref())
            .await
        {
            Ok(response) => match serde_json::from_value::<ProfileRecord>(response.data) {
                Ok(profile) => self.write(|s| {
                    if s.is_authenticated() {
                        s.set_full_profile(profile);
                    }
                }),
                Err(e) => tracing::warn!("failed to decode full profile: {}", e),
            },
            Err(e) => tracing::warn!("failed to fetch full profile: {}", e),
        }
    }

    async fn fetch_team_status_remote(&self) {
        let token = self.token();
        let has_team = match self.transport.get(endpoints::MY_TEAM, token.as_deref()).await {
            Ok(response) => payload_indicates_membership(&response.data),
            Err(e) => {
                tracing::warn!("failed to fetch team: {}", e);
                false
            }
        };
        self.write(|s| s.set_has_team(has_team));
    }

    async fn fetch_pending_request_remote(&self) {
        let token = self.token();
        let snapshot = match self
            .transport
            .get(endpoints::MY_JOIN_REQUEST, token.as_deref())
            .await
        {
            Ok(response) => match serde_json::from_value::<JoinRequestSnapshot>(response.data) {
                Ok(snapshot) if snapshot.status != JoinRequestStatus::NoRequest => Some(snapshot),
                Ok(_) => None,
                Err(e) => {
                    tracing::debug!("unreadable join-request payload: {}", e);
                    None
                }
            },
            Err(e) => {
                tracing::debug!("failed to fetch join request: {}", e);
                None
            }
        };
        self.write(|s| s.set_pending_join_request(snapshot));
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.snapshot())
            .finish_non_exhaustive()
    }
}
