// src/extract/tree.rs
// =============================================================================
// This module walks a markdown document as a tree of nodes.
//
// pulldown-cmark is a streaming parser: it gives us a flat list of events
// instead of a tree. But the events are nested properly:
//
//   Start(List)
//     Start(Item)
//       Start(Link) Text("a") End(Link)
//     End(Item)
//   End(List)
//
// So Start(..) is "entering a node", End(..) is "leaving it", and every other
// event (Text, Code, SoftBreak, ...) is a leaf we enter and leave right away.
// An inline code span counts as text: `https://github.com/o/r` in backticks
// is read just like the bare URL.
// The walk() driver turns the stream into those enter/leave visits and lets
// the visitor decide whether to go on, skip a node's children, or stop.
// =============================================================================

use pulldown_cmark::{CowStr, Event, LinkType, Options, Parser, Tag};
use std::iter::Peekable;
use std::mem::{self, Discriminant};
use std::ops::Range;

use crate::error::{Error, Result};

/// The node kinds the extractor cares about. Everything else is `Other`.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    List,
    ListItem,
    /// `[text](destination)`, holds the destination
    Link(CowStr<'a>),
    /// `<https://...>`, holds the URL
    AutoLink(CowStr<'a>),
    /// A run of text (or the content of a code span), already unescaped
    Text(CowStr<'a>),
    Other,
}

impl<'a> Node<'a> {
    fn from_tag(tag: &Tag<'a>) -> Self {
        match tag {
            Tag::List(_) => Node::List,
            Tag::Item => Node::ListItem,
            Tag::Link(LinkType::Autolink | LinkType::Email, url, _) => Node::AutoLink(url.clone()),
            Tag::Link(_, dest, _) => Node::Link(dest.clone()),
            _ => Node::Other,
        }
    }

    fn from_leaf(event: &Event<'a>) -> Self {
        match event {
            Event::Text(text) | Event::Code(text) => Node::Text(text.clone()),
            _ => Node::Other,
        }
    }
}

/// What the visitor wants the driver to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStatus {
    Continue,
    /// Don't visit the children of the node just entered (its exit is still visited)
    SkipChildren,
    /// Abort the whole walk
    Stop,
}

/// Receives every node twice: once entering, once leaving.
pub trait Visitor {
    fn visit(&mut self, node: &Node<'_>, entering: bool) -> Result<WalkStatus>;
}

/// Parses markdown into the (event, source range) stream that walk() consumes.
///
/// Plain CommonMark: no tables, footnotes or other extensions.
pub fn parse(source: &str) -> impl Iterator<Item = (Event<'_>, Range<usize>)> {
    Parser::new_ext(source, Options::empty()).into_offset_iter()
}

/// Drives `visitor` over the event stream in document order.
///
/// Fails with a traversal error if the stream is not properly nested.
pub fn walk<'a, I, V>(events: I, visitor: &mut V) -> Result<()>
where
    I: IntoIterator<Item = (Event<'a>, Range<usize>)>,
    V: Visitor + ?Sized,
{
    // open containers, with the tag kind their End must carry
    let mut stack: Vec<(Node<'a>, Discriminant<Tag<'a>>)> = Vec::new();
    // depth of the node whose children are being skipped
    let mut skipping: Option<usize> = None;

    for (event, range) in TextRuns::new(events.into_iter()) {
        match event {
            Event::Start(tag) => {
                stack.push((Node::from_tag(&tag), mem::discriminant(&tag)));

                if skipping.is_some() {
                    continue;
                }

                if let Some((node, _)) = stack.last() {
                    match visitor.visit(node, true)? {
                        WalkStatus::Continue => {}
                        WalkStatus::SkipChildren => skipping = Some(stack.len()),
                        WalkStatus::Stop => return Ok(()),
                    }
                }
            }

            Event::End(tag) => {
                let depth = stack.len();
                let (node, kind) = stack.pop().ok_or_else(|| {
                    Error::Traversal(format!(
                        "end of {:?} at byte {} without a matching start",
                        tag, range.start
                    ))
                })?;

                if kind != mem::discriminant(&tag) {
                    return Err(Error::Traversal(format!(
                        "end of {:?} at byte {} closes a different node",
                        tag, range.start
                    )));
                }

                match skipping {
                    Some(skipped) if depth > skipped => continue,
                    Some(_) => skipping = None,
                    None => {}
                }

                if visitor.visit(&node, false)? == WalkStatus::Stop {
                    return Ok(());
                }
            }

            leaf => {
                if skipping.is_some() {
                    continue;
                }

                let node = Node::from_leaf(&leaf);

                if visitor.visit(&node, true)? == WalkStatus::Stop {
                    return Ok(());
                }
                if visitor.visit(&node, false)? == WalkStatus::Stop {
                    return Ok(());
                }
            }
        }
    }

    if let Some((node, _)) = stack.last() {
        return Err(Error::Traversal(format!(
            "document ended with {} unclosed node(s), innermost {:?}",
            stack.len(),
            node
        )));
    }

    Ok(())
}

// pulldown-cmark may split one run of text into several Text events (it
// breaks at characters that could start inline markup, like '_' or '*', and
// around backslash escapes). This adapter glues adjacent Text events back
// together so the walker sees a bare URL as one string.
//
// The glued text is the parser's decoded text, not the raw source, so an
// escape like `foo\_bar` comes out as `foo_bar`.
//
// Example:
//   Text("https://github.com/foo"), Text("_x/bar")
//   -> Text("https://github.com/foo_x/bar")
struct TextRuns<I: Iterator> {
    inner: Peekable<I>,
}

impl<I: Iterator> TextRuns<I> {
    fn new(inner: I) -> Self {
        Self {
            inner: inner.peekable(),
        }
    }
}

impl<'a, I> Iterator for TextRuns<I>
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let (event, mut range) = self.inner.next()?;

        let first = match event {
            Event::Text(text) => text,
            other => return Some((other, range)),
        };

        // Only allocate when there really is more than one piece
        let mut merged: Option<String> = None;

        while let Some((Event::Text(_), _)) = self.inner.peek() {
            if let Some((Event::Text(next), next_range)) = self.inner.next() {
                merged.get_or_insert_with(|| first.to_string()).push_str(&next);
                range.start = range.start.min(next_range.start);
                range.end = range.end.max(next_range.end);
            }
        }

        let text = match merged {
            Some(text) => CowStr::from(text),
            None => first,
        };

        Some((Event::Text(text), range))
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Visitor trait?
//    - walk() doesn't know what we are looking for, it only drives the visits
//    - Anything implementing Visitor can be walked (tests use a Recorder)
//
// 2. What is mem::discriminant?
//    - It identifies which enum variant a value is, ignoring its fields
//    - We use it to check that End(Item) really closes a Start(Item)
//
// 3. What is Peekable?
//    - An iterator wrapper that can look at the next item without taking it
//    - TextRuns peeks to see if the next event is more text to glue on
// -----------------------------------------------------------------------------
