//! In-memory representation of the current user's authentication state.

use serde::{Deserialize, Serialize};

use crate::domain::team::JoinRequestSnapshot;
use crate::domain::user::{ProfileRecord, UserSummary};

/// Authentication and profile state for the current user.
///
/// A `Session` is an explicit context object owned by the
/// [`SessionStore`](crate::application::SessionStore); it is never a
/// process-wide singleton, so tests can build isolated instances.
///
/// # Invariant
///
/// `token == None` implies `user == None` and `full_profile == None`.
/// Mutators uphold this: the only way to drop the token is [`Session::clear`],
/// which resets every field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    token: Option<String>,
    user: Option<UserSummary>,
    full_profile: Option<ProfileRecord>,
    has_team: bool,
    has_pending_join_request: bool,
    pending_join_request: Option<JoinRequestSnapshot>,
}

impl Session {
    /// Creates an empty, unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session seeded with a token restored from durable storage.
    ///
    /// The user summary is not part of the seed; callers restore it through
    /// the network afterwards.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserSummary> {
        self.user.as_ref()
    }

    pub fn full_profile(&self) -> Option<&ProfileRecord> {
        self.full_profile.as_ref()
    }

    pub fn has_team(&self) -> bool {
        self.has_team
    }

    pub fn has_pending_join_request(&self) -> bool {
        self.has_pending_join_request
    }

    /// The outstanding join request, when one exists.
    pub fn pending_join_request(&self) -> Option<&JoinRequestSnapshot> {
        self.pending_join_request.as_ref()
    }

    /// Returns `true` when a bearer token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Adopts a bearer token, e.g. after login or restore.
    pub fn adopt_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Records the fetched user summary.
    ///
    /// Only meaningful while a token is held; the store never fetches a user
    /// without one.
    pub fn set_user(&mut self, user: UserSummary) {
        debug_assert!(self.token.is_some(), "user set without a token");
        self.user = Some(user);
    }

    /// Marks the in-memory user's profile as completed, if a user is present.
    ///
    /// Returns the updated summary for snapshot persistence.
    pub fn mark_profile_completed(&mut self) -> Option<UserSummary> {
        let user = self.user.as_mut()?;
        user.is_profile_completed = true;
        Some(user.clone())
    }

    pub fn set_full_profile(&mut self, profile: ProfileRecord) {
        debug_assert!(self.token.is_some(), "profile set without a token");
        self.full_profile = Some(profile);
    }

    pub fn set_has_team(&mut self, has_team: bool) {
        self.has_team = has_team;
    }

    /// Records the outstanding join request, deriving the pending flag from
    /// its status. `None` resets both.
    pub fn set_pending_join_request(&mut self, snapshot: Option<JoinRequestSnapshot>) {
        self.has_pending_join_request = snapshot
            .as_ref()
            .is_some_and(|s| s.status.is_pending());
        self.pending_join_request = snapshot;
    }

    /// Resets every field to its unauthenticated default.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Checks the token/user/profile consistency invariant.
    ///
    /// Exposed for tests; production code relies on the mutators instead.
    pub fn invariants_hold(&self) -> bool {
        self.token.is_some() || (self.user.is_none() && self.full_profile.is_none())
    }
}
