// src/extract/module.rs
// =============================================================================
// This module turns a repository link into an xk6 module path.
//
//   https://github.com/foo/bar                      -> github.com/foo/bar
//   https://gitlab.com/baz/qux/releases/tag/v1.2.3  -> gitlab.com/baz/qux@v1.2.3
//
// The owner and repo are passed through verbatim, no escaping or case folding.
// =============================================================================

use serde::{Serialize, Serializer};
use std::fmt;

use super::pattern::{self, LinkParts};

/// An extension module identifier: `host/owner/repo`, optionally `@tag`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModulePath {
    pub host: String,
    pub owner: String,
    pub repo: String,
    pub tag: Option<String>,
}

impl ModulePath {
    // Builds a module path from its parts
    //
    // Parameters:
    //   host: "github.com" or "gitlab.com"
    //   owner, repo: passed through verbatim
    //   tag: the release tag, if the link pointed at one
    pub fn new(
        host: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        tag: Option<impl Into<String>>,
    ) -> Self {
        Self {
            host: host.into(),
            owner: owner.into(),
            repo: repo.into(),
            tag: tag.map(Into::into),
        }
    }

    // Converts a link into a module path
    //
    // Returns: None if it is not a GitHub/GitLab repository link
    //
    // Example:
    //   "https://github.com/foo/bar" -> Some(github.com/foo/bar)
    pub fn from_link(url: &str) -> Option<Self> {
        pattern::decompose(url).map(Self::from)
    }
}

impl From<LinkParts<'_>> for ModulePath {
    fn from(parts: LinkParts<'_>) -> Self {
        Self::new(parts.host, parts.owner, parts.repo, parts.tag)
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.owner, self.repo)?;

        if let Some(tag) = &self.tag {
            write!(f, "@{}", tag)?;
        }

        Ok(())
    }
}

// Serialized as the same string Display produces, so --json prints
// ["github.com/foo/bar", ...] rather than objects
impl Serialize for ModulePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why implement Display?
//    - It gives us .to_string() and lets us use ModulePath in format!/write!
//    - output.rs prints modules with `write!(out, " --with {}", module)`
//
// 2. What is `impl Into<String>`?
//    - new() accepts &str or String, whatever the caller has
//    - .into() turns it into an owned String
//
// 3. Why a hand-written Serialize instead of #[derive(Serialize)]?
//    - Derive would give {"host": .., "owner": ..}
//    - We want the plain string, so we serialize through Display
// -----------------------------------------------------------------------------
