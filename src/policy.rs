use serde::{Deserialize, Serialize};

/// The query every non-empty breakpoint query is rewritten to under
/// [`QueryPolicy::Legacy`].
pub const LEGACY_QUERY: &str = "(min-width: 0em)";

/// How a breakpoint's media query is turned into the query actually watched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryPolicy {
    /// Rewrites every non-empty query to [`LEGACY_QUERY`], so any breakpoint
    /// with a query matches at every width and only declaration order decides
    /// the winner. The empty query is passed through.
    ///
    /// Kept for parity with existing front-end behavior.
    #[default]
    Legacy,
    /// Watches each query as declared.
    Verbatim,
}

impl QueryPolicy {
    pub fn normalize<'a>(&self, media_query: &'a str) -> &'a str {
        match self {
            QueryPolicy::Legacy if !media_query.is_empty() => LEGACY_QUERY,
            _ => media_query,
        }
    }
}
