//! # Document Model
//!
//! The tree the engine reads and rewrites. A flowing document is a linear
//! sequence of block-level content (paragraphs, headings, list items,
//! tables, images, rules); a paged document is that same content
//! partitioned into `Page` nodes, each with header/body/footer regions.
//!
//! The model is intentionally close to the host editor's mental model, but
//! with one critical difference: the engine never mutates a tree in place.
//! It consumes a snapshot and produces a replacement, so every block is
//! owned by exactly one body at any time and ownership moves with a reflow.

use crate::style::{MarginConfig, PageAttrs, PixelDimensions};
use serde::{Deserialize, Serialize};

/// A flowing document as supplied by the host: the linear block sequence
/// plus the engine options to paginate it with. This is the JSON input
/// format accepted by [`crate::paginate_json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowDocument {
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub options: crate::config::PaginationOptions,
}

/// One block-level unit of content.
///
/// Heights are pre-measured pixels supplied by the host's layout
/// collaborator; the engine never measures anything itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// What kind of block this is.
    pub kind: BlockKind,

    /// Measured total height in pixels.
    pub height: f64,

    /// Override for splittability. `None` uses the kind's default:
    /// line-based blocks split at line boundaries, tables/images/rules
    /// move whole.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,

    /// Stable identifier assigned by the host. A block split across a page
    /// boundary keeps its id on both fragments, which is how continuations
    /// are rejoined when the content is linearized again.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// The block-level content kinds the engine paginates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlockKind {
    /// Body text. `lines` holds the measured height of each laid-out line.
    Paragraph {
        #[serde(default)]
        lines: Vec<f64>,
    },

    /// A heading of the given level (1-6).
    Heading {
        level: u8,
        #[serde(default)]
        lines: Vec<f64>,
    },

    /// One item of a (possibly nested) list.
    ListItem {
        depth: u8,
        #[serde(default)]
        lines: Vec<f64>,
    },

    /// A table. Moves to the next page whole when it does not fit.
    Table,

    /// An image. Never split.
    Image,

    /// A horizontal rule.
    Rule,
}

impl Block {
    /// Create a paragraph from measured line heights.
    pub fn paragraph(lines: Vec<f64>) -> Self {
        let height = lines.iter().sum();
        Self {
            kind: BlockKind::Paragraph { lines },
            height,
            wrap: None,
            id: None,
        }
    }

    /// Create a heading from measured line heights.
    pub fn heading(level: u8, lines: Vec<f64>) -> Self {
        let height = lines.iter().sum();
        Self {
            kind: BlockKind::Heading { level, lines },
            height,
            wrap: None,
            id: None,
        }
    }

    /// Create a list item from measured line heights.
    pub fn list_item(depth: u8, lines: Vec<f64>) -> Self {
        let height = lines.iter().sum();
        Self {
            kind: BlockKind::ListItem { depth, lines },
            height,
            wrap: None,
            id: None,
        }
    }

    /// Create a table block with a measured total height.
    pub fn table(height: f64) -> Self {
        Self {
            kind: BlockKind::Table,
            height,
            wrap: None,
            id: None,
        }
    }

    /// Create an image block with a measured height.
    pub fn image(height: f64) -> Self {
        Self {
            kind: BlockKind::Image,
            height,
            wrap: None,
            id: None,
        }
    }

    /// Create a horizontal rule with a measured height.
    pub fn rule(height: f64) -> Self {
        Self {
            kind: BlockKind::Rule,
            height,
            wrap: None,
            id: None,
        }
    }

    /// Attach a host-assigned identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Can this block break across a page boundary?
    pub fn is_splittable(&self) -> bool {
        let default = match &self.kind {
            BlockKind::Paragraph { .. } | BlockKind::Heading { .. } | BlockKind::ListItem { .. } => {
                true
            }
            BlockKind::Table | BlockKind::Image | BlockKind::Rule => false,
        };
        self.wrap.unwrap_or(default)
    }

    /// The measured per-line heights, for kinds that have lines.
    pub fn line_heights(&self) -> Option<&[f64]> {
        match &self.kind {
            BlockKind::Paragraph { lines }
            | BlockKind::Heading { lines, .. }
            | BlockKind::ListItem { lines, .. } => Some(lines),
            BlockKind::Table | BlockKind::Image | BlockKind::Rule => None,
        }
    }

    /// Absorb a continuation fragment back into this block. Only valid for
    /// two fragments carrying the same id; the caller checks that.
    pub(crate) fn rejoin(&mut self, tail: Block) {
        if let (Some(head_lines), Some(tail_lines)) = (
            match &mut self.kind {
                BlockKind::Paragraph { lines }
                | BlockKind::Heading { lines, .. }
                | BlockKind::ListItem { lines, .. } => Some(lines),
                _ => None,
            },
            tail.line_heights(),
        ) {
            head_lines.extend_from_slice(tail_lines);
        }
        self.height += tail.height;
    }
}

/// One of the three regions of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionKind {
    Header,
    Footer,
}

/// A header or footer region. Carries no content in this engine, only the
/// margins the rendering layer sizes it with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderFooter {
    pub kind: RegionKind,
    pub margins: MarginConfig,
}

/// The content-bearing region of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    /// Resolved content margins, in millimetres.
    pub margins: MarginConfig,
    /// Resolved pixel budget available to content.
    pub dimensions: PixelDimensions,
    /// The blocks this page carries, in reading order.
    pub blocks: Vec<Block>,
}

/// One printable sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Sparse per-page customizations. Empty for pages the engine built
    /// itself; populated when the host customized a page individually.
    #[serde(default, skip_serializing_if = "PageAttrs::is_empty")]
    pub attrs: PageAttrs,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderFooter>,

    pub body: Body,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<HeaderFooter>,
}

/// The paginated document: an ordered sequence of pages whose bodies,
/// concatenated, reconstruct the flowing content exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedDocument {
    pub pages: Vec<Page>,
}

impl PagedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// True when no page carries any content.
    pub fn is_content_empty(&self) -> bool {
        self.pages.iter().all(|p| p.body.blocks.is_empty())
    }

    /// Reconstruct the flowing block sequence: page bodies concatenated in
    /// order, with a fragment that continues the previous page's trailing
    /// block (same id on both sides of the boundary) rejoined into one.
    pub fn linear_blocks(&self) -> Vec<Block> {
        let mut out: Vec<Block> = Vec::new();
        for page in &self.pages {
            for block in page.body.blocks.iter().cloned() {
                match out.last_mut() {
                    Some(prev) if block.id.is_some() && prev.id == block.id => {
                        prev.rejoin(block);
                    }
                    _ => out.push(block),
                }
            }
        }
        out
    }
}

/// Which node types the host schema provides. Pagination is unavailable
/// when the page or body type is missing; header/footer support may be
/// absent independently when both regions are disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSupport {
    pub page: bool,
    pub body: bool,
    pub header_footer: bool,
}

impl Default for SchemaSupport {
    fn default() -> Self {
        Self {
            page: true,
            body: true,
            header_footer: true,
        }
    }
}

impl SchemaSupport {
    pub fn supports_pagination(&self) -> bool {
        self.page && self.body
    }
}

/// The host's document tree as delivered on a change notification: flat
/// flowing content before the first pagination, or a paged tree afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DocSnapshot {
    Flow { blocks: Vec<Block> },
    Paged { document: PagedDocument },
}

impl DocSnapshot {
    pub fn flow(blocks: Vec<Block>) -> Self {
        DocSnapshot::Flow { blocks }
    }

    pub fn paged(document: PagedDocument) -> Self {
        DocSnapshot::Paged { document }
    }

    /// Does this tree already carry page structure?
    pub fn has_page_structure(&self) -> bool {
        match self {
            DocSnapshot::Flow { .. } => false,
            DocSnapshot::Paged { document } => !document.pages.is_empty(),
        }
    }

    /// True when the tree carries no content at all.
    pub fn is_empty(&self) -> bool {
        match self {
            DocSnapshot::Flow { blocks } => blocks.is_empty(),
            DocSnapshot::Paged { document } => document.is_content_empty(),
        }
    }

    /// The flowing block sequence, continuations rejoined.
    pub fn linear_blocks(&self) -> Vec<Block> {
        match self {
            DocSnapshot::Flow { blocks } => blocks.clone(),
            DocSnapshot::Paged { document } => document.linear_blocks(),
        }
    }

    /// Same flowing content as `other`?
    pub fn content_eq(&self, other: &DocSnapshot) -> bool {
        self.linear_blocks() == other.linear_blocks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_kinds_split_by_default() {
        assert!(Block::paragraph(vec![20.0, 20.0]).is_splittable());
        assert!(Block::heading(2, vec![28.0]).is_splittable());
        assert!(Block::list_item(0, vec![20.0]).is_splittable());
        assert!(!Block::table(300.0).is_splittable());
        assert!(!Block::image(200.0).is_splittable());
        assert!(!Block::rule(2.0).is_splittable());
    }

    #[test]
    fn test_wrap_overrides_kind_default() {
        let mut p = Block::paragraph(vec![20.0, 20.0]);
        p.wrap = Some(false);
        assert!(!p.is_splittable());

        let mut t = Block::table(300.0);
        t.wrap = Some(true);
        assert!(t.is_splittable());
    }

    #[test]
    fn test_constructor_height_is_line_sum() {
        let p = Block::paragraph(vec![20.0, 24.0, 20.0]);
        assert!((p.height - 64.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejoin_concatenates_lines_and_heights() {
        let mut head = Block::paragraph(vec![20.0, 20.0]).with_id("p1");
        let tail = Block::paragraph(vec![24.0]).with_id("p1");
        head.rejoin(tail);
        assert_eq!(head.line_heights().unwrap(), &[20.0, 20.0, 24.0]);
        assert!((head.height - 64.0).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_content_eq_ignores_page_boundaries() {
        let original = vec![Block::paragraph(vec![20.0, 20.0, 24.0]).with_id("p1")];
        let flow = DocSnapshot::flow(original);

        // The same paragraph split across two pages.
        let page = |blocks: Vec<Block>| Page {
            attrs: PageAttrs::default(),
            header: None,
            body: Body {
                margins: MarginConfig::default(),
                dimensions: PixelDimensions {
                    width: 100.0,
                    height: 100.0,
                },
                blocks,
            },
            footer: None,
        };
        let paged = DocSnapshot::paged(PagedDocument {
            pages: vec![
                page(vec![Block::paragraph(vec![20.0, 20.0]).with_id("p1")]),
                page(vec![Block::paragraph(vec![24.0]).with_id("p1")]),
            ],
        });

        assert!(flow.content_eq(&paged));
    }

    #[test]
    fn test_adjacent_distinct_blocks_are_not_rejoined() {
        let page = |blocks: Vec<Block>| Page {
            attrs: PageAttrs::default(),
            header: None,
            body: Body {
                margins: MarginConfig::default(),
                dimensions: PixelDimensions {
                    width: 100.0,
                    height: 100.0,
                },
                blocks,
            },
            footer: None,
        };
        let doc = PagedDocument {
            pages: vec![
                page(vec![Block::paragraph(vec![20.0]).with_id("a")]),
                page(vec![Block::paragraph(vec![20.0]).with_id("b")]),
            ],
        };
        assert_eq!(doc.linear_blocks().len(), 2);
    }
}
