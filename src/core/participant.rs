use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a participant in an expense group.
///
/// A participant is anyone who pays for an expense or carries a share
/// of one: a roommate, a trip member, a teammate on a shared tab.
///
/// # Examples
///
/// ```
/// use splitledger::core::participant::ParticipantId;
///
/// let alice = ParticipantId::new("alice");
/// let bob = ParticipantId::new("bob");
/// assert_ne!(alice, bob);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create a new participant identifier.
    ///
    /// Any non-empty string works; the surrounding system owns the
    /// mapping from these identifiers to real user accounts.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this participant ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_equality() {
        let a = ParticipantId::new("alice");
        let b = ParticipantId::new("alice");
        let c = ParticipantId::new("bob");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_participant_display() {
        let p = ParticipantId::new("carol");
        assert_eq!(format!("{}", p), "carol");
    }

    #[test]
    fn test_participant_ordering() {
        let a = ParticipantId::new("alice");
        let b = ParticipantId::new("bob");
        assert!(a < b);
    }
}
