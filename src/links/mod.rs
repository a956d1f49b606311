//! Subscription link lists
//!
//! A [`LinkList`] is the ordered set of subscription URIs a run works with.
//! The [`resolver`] decides where the list comes from.

pub mod resolver;

pub use resolver::{resolve_links, ResolveState, ResolvedLinks};

use std::fmt;

/// Where a run's links came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOrigin {
    Remote,
    Local,
}

impl fmt::Display for LinkOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkOrigin::Remote => write!(f, "remote"),
            LinkOrigin::Local => write!(f, "local"),
        }
    }
}

/// Ordered list of non-empty link strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkList {
    links: Vec<String>,
}

impl LinkList {
    /// Parses line-oriented text: one link per line, surrounding whitespace
    /// trimmed, blank lines and `#` comment lines dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use subgist::links::LinkList;
    ///
    /// let links = LinkList::parse("vmess://abc\n# comment\n\nvless://def");
    /// assert_eq!(links.as_slice(), ["vmess://abc", "vless://def"]);
    /// ```
    pub fn parse(text: &str) -> Self {
        let links = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(String::from)
            .collect();
        Self { links }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl FromIterator<String> for LinkList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            links: iter.into_iter().filter(|l| !l.trim().is_empty()).collect(),
        }
    }
}
