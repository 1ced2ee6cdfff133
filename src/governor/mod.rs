//! # Query Governor
//!
//! Classifies caller-supplied queries as allowed or rejected before they
//! reach the database.
//!
//! Governance is policy, not a safety boundary: the default strategy is a
//! keyword filter that can both over-reject (a denied keyword inside a
//! string literal) and under-protect (chained statements behind an allowed
//! opener). Deployments needing stronger guarantees plug in their own
//! [`QueryGovernor`]; deployments that trust their callers disable the
//! layer entirely in configuration.

/// Classification outcome for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Rejected,
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allowed)
    }
}

/// Pluggable governance strategy.
pub trait QueryGovernor: Send + Sync {
    fn classify(&self, query: &str) -> Verdict;
}

/// Keywords that reject a query wherever they appear.
pub const DENIED_KEYWORDS: &[&str] = &[
    "CREATE", "MERGE", "DELETE", "SET", "DROP", "REMOVE", "CALL", "LOAD", "UNWIND",
];

/// Openers a query must start with to be allowed.
pub const ALLOWED_OPENERS: &[&str] = &["MATCH", "RETURN", "WHERE", "LIMIT", "SKIP", "ORDER BY"];

/// Case-insensitive substring deny list plus leading-token allow list.
pub struct KeywordGovernor {
    denied: Vec<String>,
    openers: Vec<String>,
}

impl KeywordGovernor {
    /// Governor with the standard read-only keyword policy.
    pub fn new() -> Self {
        Self::with_policy(DENIED_KEYWORDS, ALLOWED_OPENERS)
    }

    /// Governor with custom keyword lists (both matched case-folded).
    pub fn with_policy(denied: &[&str], openers: &[&str]) -> Self {
        Self {
            denied: denied.iter().map(|k| k.to_uppercase()).collect(),
            openers: openers.iter().map(|k| k.to_uppercase()).collect(),
        }
    }
}

impl Default for KeywordGovernor {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryGovernor for KeywordGovernor {
    fn classify(&self, query: &str) -> Verdict {
        let folded = query.to_uppercase();

        if self.denied.iter().any(|keyword| folded.contains(keyword.as_str())) {
            return Verdict::Rejected;
        }

        let leading = folded.trim();
        if self.openers.iter().any(|opener| leading.starts_with(opener.as_str())) {
            Verdict::Allowed
        } else {
            Verdict::Rejected
        }
    }
}

/// Strategy that allows everything. Used when governance is switched off.
pub struct PermissiveGovernor;

impl QueryGovernor for PermissiveGovernor {
    fn classify(&self, _query: &str) -> Verdict {
        Verdict::Allowed
    }
}
