//! Shared-secret token authentication.

use std::collections::HashSet;
use std::fmt;

use gack_types::SlashCommand;

/// The set of tokens a dispatcher accepts.
///
/// Membership is an exact string comparison. An empty string is accepted
/// only if it was explicitly added; an empty set accepts nothing.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialSet {
    tokens: HashSet<String>,
}

impl CredentialSet {
    /// Builds a credential set from any collection of tokens.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if `token` is a member of the set.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Returns `true` if the command carries an accepted token.
    pub fn authenticate(&self, command: &SlashCommand) -> bool {
        self.contains(&command.token)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the set is empty (every request will be rejected).
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether the empty token is accepted.
    pub fn accepts_blank(&self) -> bool {
        self.contains("")
    }
}

impl<S: Into<String>> FromIterator<S> for CredentialSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

// Tokens are secrets; never print them.
impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSet")
            .field("len", &self.tokens.len())
            .field("accepts_blank", &self.accepts_blank())
            .finish()
    }
}
