use serde::{Deserialize, Serialize};

/// Split a comma-separated tech string into tags
///
/// Entries are trimmed and empty entries are dropped, so `"Node, React,"`
/// becomes `["Node", "React"]` and `""` becomes an empty list. Order and case
/// are preserved.
pub fn parse_techs(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tech| !tech.is_empty())
        .map(str::to_string)
        .collect()
}

/// What an empty tech filter matches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyFilterPolicy {
    /// No techs means no results
    #[default]
    MatchNone,
    /// No techs means tags are not considered
    MatchAll,
}

/// Parsed tech filter together with its empty-filter policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechFilter {
    techs: Vec<String>,
    policy: EmptyFilterPolicy,
}

impl TechFilter {
    pub fn new(techs: Vec<String>, policy: EmptyFilterPolicy) -> Self {
        Self { techs, policy }
    }

    pub fn parse(raw: &str, policy: EmptyFilterPolicy) -> Self {
        Self::new(parse_techs(raw), policy)
    }

    pub fn techs(&self) -> &[String] {
        &self.techs
    }

    /// True when no record can ever pass this filter
    pub fn matches_nothing(&self) -> bool {
        self.techs.is_empty() && self.policy == EmptyFilterPolicy::MatchNone
    }

    /// True when tags are ignored entirely
    pub fn matches_everything(&self) -> bool {
        self.techs.is_empty() && self.policy == EmptyFilterPolicy::MatchAll
    }

    /// Check whether a tag list intersects the filter
    #[inline]
    pub fn matches(&self, tags: &[String]) -> bool {
        if self.techs.is_empty() {
            return self.policy == EmptyFilterPolicy::MatchAll;
        }
        tags.iter().any(|tag| self.techs.contains(tag))
    }
}
