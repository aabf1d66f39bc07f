//! # Page Composition
//!
//! The pipeline a reflow runs: resolve attributes for each page index,
//! derive the body pixel budget, split the flowing content into page runs,
//! and materialize the runs as a new page tree. The previous tree is only
//! consulted for per-page customizations; the output is always a wholesale
//! replacement, never a patch.

pub mod split;

use log::debug;

use crate::config::ConfigStore;
use crate::measure::{BlockMeasurer, StoredHeights};
use crate::model::{Block, Body, HeaderFooter, Page, PagedDocument, RegionKind};
use crate::style::{
    mm_to_px, MarginConfig, PixelDimensions, RegionMargins, ResolvedPageAttrs,
};

/// The fully resolved attribute set for one page index: page attributes,
/// per-region margins, and the body's pixel budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaginationAttrs {
    pub page: ResolvedPageAttrs,
    pub regions: RegionMargins,
    pub body_dimensions: PixelDimensions,
}

/// Usable body content size in pixels: oriented paper dimensions minus the
/// body margins. A configuration whose margins exceed the paper clamps to
/// zero instead of failing; content then overflows page by page.
pub fn body_pixel_budget(page: &ResolvedPageAttrs, margins: &MarginConfig) -> PixelDimensions {
    let (paper_w, paper_h) = page.paper_px();
    PixelDimensions {
        width: (paper_w - mm_to_px(margins.horizontal())).max(0.0),
        height: (paper_h - mm_to_px(margins.vertical())).max(0.0),
    }
}

/// Splits content into pages and builds the replacement tree. Carries no
/// settings of its own; everything configurable is read from the
/// [`ConfigStore`] passed into each call.
pub struct Paginator {
    measurer: Box<dyn BlockMeasurer>,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new()
    }
}

impl Paginator {
    pub fn new() -> Self {
        Self::with_measurer(Box::new(StoredHeights))
    }

    pub fn with_measurer(measurer: Box<dyn BlockMeasurer>) -> Self {
        Self { measurer }
    }

    /// Resolve the attribute set for `page_index`. Field-by-field
    /// fallback: attributes stored on the existing page at that index win,
    /// then the live settings, then the defaults. Pure; always yields a
    /// fully populated set.
    pub fn resolve_attributes(
        &self,
        prev: Option<&PagedDocument>,
        page_index: usize,
        store: &ConfigStore,
    ) -> PaginationAttrs {
        let settings = store.current();
        let stored = prev
            .and_then(|doc| doc.page(page_index))
            .map(|page| page.attrs.clone())
            .unwrap_or_default();

        let page = stored.resolve(Some(settings.orientation));
        let regions = RegionMargins::from_body(settings.margins);
        let body_dimensions = body_pixel_budget(&page, &regions.body);

        PaginationAttrs {
            page,
            regions,
            body_dimensions,
        }
    }

    /// Run the full pipeline: split `blocks` into runs sized by each
    /// page's resolved budget, then materialize the page tree.
    pub fn paginate(
        &self,
        blocks: Vec<Block>,
        prev: Option<&PagedDocument>,
        store: &ConfigStore,
    ) -> PagedDocument {
        let runs = split::split_blocks(blocks, self.measurer.as_ref(), |index| {
            self.resolve_attributes(prev, index, store)
                .body_dimensions
                .height
        });
        debug!("content split into {} page run(s)", runs.len());
        self.build_document(runs, prev, store)
    }

    /// Materialize one `Page` per run. Stored customizations from the
    /// previous tree are carried forward by index; regions follow the
    /// enablement flags in the current settings.
    fn build_document(
        &self,
        runs: Vec<Vec<Block>>,
        prev: Option<&PagedDocument>,
        store: &ConfigStore,
    ) -> PagedDocument {
        let settings = store.current();
        let pages = runs
            .into_iter()
            .enumerate()
            .map(|(index, run)| {
                let attrs = self.resolve_attributes(prev, index, store);
                let stored = prev
                    .and_then(|doc| doc.page(index))
                    .map(|page| page.attrs.clone())
                    .unwrap_or_default();

                Page {
                    attrs: stored,
                    header: settings.enable_header.then(|| HeaderFooter {
                        kind: RegionKind::Header,
                        margins: attrs.regions.header,
                    }),
                    body: Body {
                        margins: attrs.regions.body,
                        dimensions: attrs.body_dimensions,
                        blocks: run,
                    },
                    footer: settings.enable_footer.then(|| HeaderFooter {
                        kind: RegionKind::Footer,
                        margins: attrs.regions.footer,
                    }),
                }
            })
            .collect();

        PagedDocument { pages }
    }
}
