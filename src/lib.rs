//! # Pageflow
//!
//! A page-native reflow engine for rich-text documents.
//!
//! Most editors treat a document as one endless column and leave "pages"
//! to the print dialog. A paged editor needs the opposite: the flowing
//! content must live inside fixed-size page containers at all times, and
//! every edit or margin change must repartition it — without ever losing,
//! duplicating, or reordering a block, and without the repartition
//! retriggering itself, since rewriting the tree looks exactly like an
//! edit to anything listening for edits.
//!
//! Pageflow does that repartition. It consumes pre-measured block heights
//! (measurement belongs to the host's layout system), so the whole engine
//! is synchronous, deterministic, and testable without a browser.
//!
//! ## Architecture
//!
//! ```text
//! Host edit / settings update
//!       ↓
//!  [controller] — change detection, cycle guard, settings store
//!       ↓
//!  [style]      — attribute resolution: page attrs → settings → defaults
//!       ↓
//!  [layout]     — pixel budgets, greedy block splitting, page tree build
//!       ↓
//!  Paged document (header / body / footer per page)
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod layout;
pub mod measure;
pub mod model;
pub mod style;

pub use config::{PageAmendmentOptions, PageSettings, PaginationOptions};
pub use controller::{ChangeNotification, ReflowController, ReflowOutcome};
pub use error::{PageflowError, Result};
pub use layout::Paginator;
pub use model::{Block, BlockKind, DocSnapshot, FlowDocument, PagedDocument};

use config::ConfigStore;

/// Paginate a flowing block sequence in one shot.
///
/// This is the stateless entry point for hosts that do not need live
/// reflow; interactive sessions use [`ReflowController`] instead.
pub fn paginate(blocks: Vec<Block>, options: &PaginationOptions) -> PagedDocument {
    let store = ConfigStore::new(options);
    Paginator::new().paginate(blocks, None, &store)
}

/// Paginate a flow document described as JSON.
pub fn paginate_json(json: &str) -> Result<PagedDocument> {
    let document: FlowDocument = serde_json::from_str(json)?;
    Ok(paginate(document.blocks, &document.options))
}
