//! Explicit session context threaded through directory operations.
//!
//! The surrounding system authenticates users; the directory only ever
//! sees this value, passed in per call, never read from a global.

use serde::{Deserialize, Serialize};

/// Role tag attached to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// A user looking for a tradesperson; the only role that may author
    /// reviews.
    Seeker,
    /// A tradesperson offering services.
    Worker,
}

impl Role {
    /// Get the role tag as stored by the surrounding system.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Seeker => "demandante",
            Role::Worker => "oficial",
        }
    }

    /// Parse a stored role tag.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "demandante" => Some(Role::Seeker),
            "oficial" => Some(Role::Worker),
            _ => None,
        }
    }
}

/// The current user's identity and role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Authenticated user id.
    pub user_id: String,
    /// Account role.
    pub role: Role,
}

impl Session {
    /// Create a session context.
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    /// Whether this session may review the given worker: seekers only,
    /// and never the worker's own profile.
    pub fn can_review(&self, worker_id: &str) -> bool {
        self.role == Role::Seeker && self.user_id != worker_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_tags_round_trip() {
        assert_eq!(Role::parse("demandante"), Some(Role::Seeker));
        assert_eq!(Role::parse("oficial"), Some(Role::Worker));
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse(Role::Seeker.as_str()), Some(Role::Seeker));
    }

    #[test]
    fn test_can_review() {
        let seeker = Session::new("u1", Role::Seeker);
        assert!(seeker.can_review("w1"));
        assert!(!seeker.can_review("u1"));

        let worker = Session::new("w1", Role::Worker);
        assert!(!worker.can_review("w2"));
    }
}
