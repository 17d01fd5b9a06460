// src/extract/pattern.rs
// =============================================================================
// This module recognizes repository links of xk6 extensions.
//
// An extension link looks like one of:
//   https://github.com/owner/repo
//   https://gitlab.com/owner/repo/releases/tag/v1.2.3
//
// We use the `regex` crate with named capture groups so that we can both
// test a URL (`matches`) and pull it apart (`decompose`) with one pattern.
// =============================================================================

use regex::Regex;
use std::sync::LazyLock;

// The compiled pattern is shared, read-only, and built on first use.
//
// Owner, repo and tag are single path segments: no '/', and no '?' or '#'
// so that query strings and fragments never sneak into a module path.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https://(?P<host>github\.com|gitlab\.com)/(?P<owner>[^/?#]+)/(?P<repo>[^/?#]+)(?:/releases/tag/(?P<tag>[^/?#]+))?$",
    )
    .unwrap()
});

/// The pieces of a matching extension link, borrowed from the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkParts<'a> {
    pub host: &'a str,
    pub owner: &'a str,
    pub repo: &'a str,
    pub tag: Option<&'a str>,
}

// Checks if a URL is a GitHub or GitLab repository link
//
// Parameters:
//   url: the link destination (or bare text) to test
//
// Returns: true for https://{github,gitlab}.com/owner/repo, optionally
// followed by /releases/tag/TAG. Anything else (http://, other hosts,
// ports, trailing slashes, ?query, #fragment) is false.
pub fn matches(url: &str) -> bool {
    LINK_RE.is_match(url)
}

// Splits a matching link into host, owner, repo and optional tag
//
// Returns: Some(LinkParts) borrowing from `url`, or None for anything
// `matches` would reject
//
// Example:
//   "https://gitlab.com/baz/qux/releases/tag/v1.2.3"
//   -> host "gitlab.com", owner "baz", repo "qux", tag Some("v1.2.3")
pub fn decompose(url: &str) -> Option<LinkParts<'_>> {
    let caps = LINK_RE.captures(url)?;

    // host, owner and repo are not optional in the pattern, so they are
    // always present on a successful match
    Some(LinkParts {
        host: caps.name("host")?.as_str(),
        owner: caps.name("owner")?.as_str(),
        repo: caps.name("repo")?.as_str(),
        tag: caps.name("tag").map(|m| m.as_str()),
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is LazyLock?
//    - A static that is computed the first time it is used, then shared
//    - Compiling a regex is slow, so we do it once for the whole program
//
// 2. What are (?P<name>...) groups?
//    - Named capture groups: caps.name("owner") gives back that piece
//    - (?:...) is a group that is NOT captured, only used for the `?`
//
// 3. Why does decompose return LinkParts<'_>?
//    - The pieces are slices of the url string, no copying
//    - The '_ lifetime says "these borrow from the url you passed in"
// -----------------------------------------------------------------------------
