// src/extract/walker.rs
// =============================================================================
// This module finds the extension list in a markdown document.
//
// The extension list is the FIRST list where every item has exactly one link:
//
//   - [xk6-sql](https://github.com/grafana/xk6-sql)
//   - <https://github.com/grafana/xk6-faker>
//   - https://gitlab.com/owner/repo/releases/tag/v1.0.0
//   - `https://github.com/grafana/xk6-kafka`
//
// ListQualifier is a Visitor (see tree.rs). It keeps a little bit of state
// about the list and item it is currently inside, collects the links of the
// current list, and stops the walk as soon as a list closes without any
// disqualified item.
//
// Rust concepts:
// - Traits: ListQualifier implements the Visitor trait from tree.rs
// - State machines: plain bool/usize fields updated on enter/exit
// - Iterator adapters: filter_map to turn links into module paths
// =============================================================================

use tracing::debug;

use super::module::ModulePath;
use super::pattern;
use super::tree::{Node, Visitor, WalkStatus};
use crate::error::Result;

/// Where a candidate link came from in the markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// `[text](url)`
    Link,
    /// `<url>`
    AutoLink,
    /// a plain URL written as text (or inside a code span)
    BareText,
}

/// A link collected from the list under evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    pub url: String,
    pub provenance: Provenance,
}

#[derive(Debug, Default)]
pub struct ListQualifier {
    found: bool,

    inside_list: bool,
    has_nonmatching_items: bool,

    inside_item: bool,
    has_nonmatching_link: bool,
    number_of_links: usize,

    links: Vec<CandidateLink>,
}

impl ListQualifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a qualifying list has been seen.
    pub fn found(&self) -> bool {
        self.found
    }

    // The links of the qualifying list, in document order
    //
    // Returns: an empty slice if no list qualified. The links gathered for a
    // list that was disqualified are never handed out.
    pub fn links(&self) -> &[CandidateLink] {
        if self.found() {
            &self.links
        } else {
            &[]
        }
    }

    // Converts the qualifying list's links into module paths
    //
    // Links that are not GitHub/GitLab repository links are dropped here,
    // they only counted toward the "one link per item" rule.
    //
    // Example:
    //   [https://example.com/docs, https://github.com/foo/bar]
    //   -> [github.com/foo/bar]
    pub fn into_modules(self) -> Vec<ModulePath> {
        self.links()
            .iter()
            .filter_map(|link| {
                let module = ModulePath::from_link(&link.url);
                if module.is_none() {
                    debug!(url = %link.url, provenance = ?link.provenance, "skipping non-module link");
                }
                module
            })
            .collect()
    }

    fn handle_list(&mut self, entering: bool) -> WalkStatus {
        if entering {
            // a nested list throws away what the enclosing list collected so far
            debug!(nested = self.inside_list, "entering list");

            self.inside_list = true;
            self.has_nonmatching_items = false;
            self.links.clear();

            return WalkStatus::Continue;
        }

        debug!(qualifies = !self.has_nonmatching_items, "exiting list");

        if !self.has_nonmatching_items {
            self.found = true;
            return WalkStatus::Stop;
        }

        self.inside_list = false;

        WalkStatus::Continue
    }

    fn handle_item(&mut self, entering: bool) -> WalkStatus {
        if entering {
            self.inside_item = true;
            self.has_nonmatching_link = false;
            self.number_of_links = 0;

            return WalkStatus::Continue;
        }

        self.inside_item = false;

        if self.number_of_links != 1 {
            debug!(
                links = self.number_of_links,
                nonmatching_link = self.has_nonmatching_link,
                "list item does not have exactly one link"
            );

            self.has_nonmatching_items = true;
        }

        WalkStatus::Continue
    }

    // Only the number of links decides whether an item qualifies. A link that
    // isn't a repository link still counts, it is just dropped later.
    // The link's own text is never a candidate, so its children are skipped.
    fn handle_link(&mut self, url: &str, provenance: Provenance, entering: bool) -> WalkStatus {
        if !entering {
            return WalkStatus::Continue;
        }

        self.number_of_links += 1;
        self.links.push(CandidateLink {
            url: url.to_string(),
            provenance,
        });

        if !pattern::matches(url) {
            debug!(url, "found non-matching link");

            self.has_nonmatching_link = true;
        }

        WalkStatus::SkipChildren
    }

    // Bare text only becomes the item's link when it IS a repository link
    // and nothing before it in the item was a link
    fn handle_text(&mut self, value: &str, entering: bool) -> WalkStatus {
        if !entering || !self.inside_item || self.number_of_links > 0 {
            return WalkStatus::Continue;
        }

        if pattern::matches(value) {
            self.links.push(CandidateLink {
                url: value.to_string(),
                provenance: Provenance::BareText,
            });
            self.number_of_links += 1;
        }

        WalkStatus::Continue
    }
}

impl Visitor for ListQualifier {
    fn visit(&mut self, node: &Node<'_>, entering: bool) -> Result<WalkStatus> {
        if self.found {
            return Ok(WalkStatus::Stop);
        }

        let status = match node {
            Node::List => self.handle_list(entering),
            Node::ListItem => self.handle_item(entering),
            Node::Link(url) if self.inside_item => {
                self.handle_link(url, Provenance::Link, entering)
            }
            Node::AutoLink(url) if self.inside_item => {
                self.handle_link(url, Provenance::AutoLink, entering)
            }
            Node::Text(text) => self.handle_text(text, entering),
            _ => WalkStatus::Continue,
        };

        Ok(status)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is the walker a struct and not a function?
//    - The decision about a list is only known when the list ENDS
//    - So we have to remember things between visits (how many links the
//      current item had, whether any item failed, the links so far)
//    - A struct with fields is the natural place for that memory
//
// 2. What does `if self.found` at the top of visit() do?
//    - Once a list qualified we return Stop for everything
//    - walk() returns right away, so later lists are never looked at
//
// 3. What is a match guard (`Node::Link(url) if self.inside_item`)?
//    - The arm only matches when the extra condition is true too
//    - Links outside a list item fall through to the `_` arm and are ignored
// -----------------------------------------------------------------------------
