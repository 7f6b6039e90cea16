//! Token line filter.

/// Keeps lines that contain at least one of a set of tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFilter {
    tokens: Vec<String>,
}

impl LineFilter {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// True when `line` contains any token. An empty token set matches nothing.
    pub fn matches(&self, line: &str) -> bool {
        self.tokens.iter().any(|t| line.contains(t.as_str()))
    }
}
