//! # Reflow Controller
//!
//! The change-detecting driver that keeps the page tree in step with the
//! content. It owns the only mutable state in the engine: the current
//! settings, the installed page tree, and a two-state cycle guard.
//!
//! The hard part is not rebuilding pages; it is *not* rebuilding them
//! forever. Installing a rebuilt tree is itself a structural change, and a
//! naive listener would treat it as new content and reflow again, without
//! end. Two mechanisms stop that. A plain state flag suppresses any
//! notification arriving while a cycle is open, including the one our own
//! tree replacement produces; whatever the host reports once the
//! controller is idle supersedes it. And change detection compares the
//! incoming tree against the installed one, so a late replay of the
//! replacement compares equal and starts nothing.
//!
//! Settings updates ride as out-of-band metadata on the same notification
//! path, so content edits and margin edits funnel through one trigger.

use log::{debug, trace};

use crate::config::{ConfigStore, PageSettings, PaginationOptions};
use crate::layout::Paginator;
use crate::model::{DocSnapshot, PagedDocument, SchemaSupport};
use crate::style::{MarginConfig, Orientation, PixelDimensions, ResolvedPageAttrs};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControllerState {
    Idle,
    Reflowing,
}

/// A change delivered by the host editor: the tree before and after the
/// edit, plus an optional settings payload.
#[derive(Debug, Clone)]
pub struct ChangeNotification {
    pub previous: DocSnapshot,
    pub next: DocSnapshot,
    /// Settings replacement riding along with this change, if any.
    pub settings: Option<PageSettings>,
}

impl ChangeNotification {
    /// A plain content edit.
    pub fn edit(previous: DocSnapshot, next: DocSnapshot) -> Self {
        Self {
            previous,
            next,
            settings: None,
        }
    }

    /// A settings replacement with no content change.
    pub fn settings_update(snapshot: DocSnapshot, settings: PageSettings) -> Self {
        Self {
            previous: snapshot.clone(),
            next: snapshot,
            settings: Some(settings),
        }
    }
}

/// What a notification did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflowOutcome {
    /// A cycle ran and a new tree was installed.
    Rebuilt,
    /// No content or settings change; the tree stands.
    Unchanged,
    /// Arrived mid-cycle; superseded by the next idle-state report.
    Suppressed,
    /// The host schema cannot carry page structure; pagination is off.
    Unavailable,
}

/// Listens for document and settings changes and keeps the page tree
/// current. One instance per document session; no terminal state.
pub struct ReflowController {
    paginator: Paginator,
    config: ConfigStore,
    schema: SchemaSupport,
    state: ControllerState,
    document: PagedDocument,
    cycles: u64,
}

impl ReflowController {
    pub fn new(options: PaginationOptions) -> Self {
        Self::with_schema(options, SchemaSupport::default())
    }

    pub fn with_schema(options: PaginationOptions, schema: SchemaSupport) -> Self {
        let mut config = ConfigStore::new(&options);
        if !schema.header_footer {
            // Without header/footer node types the regions cannot exist,
            // whatever the options ask for.
            let mut settings = config.current().clone();
            settings.enable_header = false;
            settings.enable_footer = false;
            config.replace(settings);
        }
        Self {
            paginator: Paginator::new(),
            config,
            schema,
            state: ControllerState::Idle,
            document: PagedDocument::default(),
            cycles: 0,
        }
    }

    /// Entry point for host change notifications.
    pub fn notify(&mut self, change: ChangeNotification) -> ReflowOutcome {
        if !self.schema.supports_pagination() {
            trace!("schema lacks page/body node types; pagination unavailable");
            return ReflowOutcome::Unavailable;
        }

        if self.state == ControllerState::Reflowing {
            debug!("change arrived mid-cycle; suppressing");
            return ReflowOutcome::Suppressed;
        }

        self.process(change)
    }

    /// Replace the active margins and reflow.
    pub fn set_margins(&mut self, margins: MarginConfig) -> ReflowOutcome {
        let mut settings = self.config.current().clone();
        settings.margins = margins;
        self.dispatch_settings(settings)
    }

    /// Replace the active orientation and reflow.
    pub fn set_orientation(&mut self, orientation: Orientation) -> ReflowOutcome {
        let mut settings = self.config.current().clone();
        settings.orientation = orientation;
        self.dispatch_settings(settings)
    }

    /// Resolved attributes for an existing page, for the rendering layer.
    pub fn page_attributes(&self, page_index: usize) -> Option<ResolvedPageAttrs> {
        self.document.page(page_index)?;
        Some(
            self.paginator
                .resolve_attributes(Some(&self.document), page_index, &self.config)
                .page,
        )
    }

    /// The body pixel budget recorded on an existing page.
    pub fn body_pixel_budget(&self, page_index: usize) -> Option<PixelDimensions> {
        self.document
            .page(page_index)
            .map(|page| page.body.dimensions)
    }

    /// The installed page tree. Consistent only between cycles; readers
    /// must treat it as immutable.
    pub fn document(&self) -> &PagedDocument {
        &self.document
    }

    /// The active settings.
    pub fn settings(&self) -> &PageSettings {
        self.config.current()
    }

    /// How many reflow cycles have run. Exactly one per genuine external
    /// change; the rebuild's own echo never adds one.
    pub fn reflow_cycles(&self) -> u64 {
        self.cycles
    }

    fn dispatch_settings(&mut self, settings: PageSettings) -> ReflowOutcome {
        let snapshot = DocSnapshot::paged(self.document.clone());
        self.notify(ChangeNotification::settings_update(snapshot, settings))
    }

    /// Does `next` differ from the installed tree? Paged snapshots compare
    /// structurally, so per-page attribute customizations count; flow
    /// snapshots compare by content. Our own replacement echo compares
    /// equal either way.
    fn tree_changed(&self, next: &DocSnapshot) -> bool {
        match next {
            DocSnapshot::Paged { document } => *document != self.document,
            DocSnapshot::Flow { blocks } => *blocks != self.document.linear_blocks(),
        }
    }

    fn process(&mut self, change: ChangeNotification) -> ReflowOutcome {
        let doc_changed = self.tree_changed(&change.next);
        let has_pages = change.next.has_page_structure();
        let initial_load = change.previous.is_empty() && !change.next.is_empty();
        let settings_changed = change.settings.is_some();

        if let Some(mut settings) = change.settings {
            if !self.schema.header_footer {
                settings.enable_header = false;
                settings.enable_footer = false;
            }
            debug!("settings replaced: {:?}", settings);
            self.config.replace(settings);
        }

        if !doc_changed && has_pages && !initial_load && !settings_changed {
            trace!("no content or settings change; skipping reflow");
            return ReflowOutcome::Unchanged;
        }

        self.state = ControllerState::Reflowing;
        self.cycles += 1;
        debug!(
            "reflow cycle {}: doc_changed={} has_pages={} initial_load={} settings_changed={}",
            self.cycles, doc_changed, has_pages, initial_load, settings_changed
        );

        let blocks = change.next.linear_blocks();
        let rebuilt = {
            let prev = match &change.next {
                DocSnapshot::Paged { document } => Some(document),
                DocSnapshot::Flow { .. } if !self.document.pages.is_empty() => {
                    Some(&self.document)
                }
                DocSnapshot::Flow { .. } => None,
            };
            self.paginator.paginate(blocks, prev, &self.config)
        };

        let old = std::mem::replace(&mut self.document, rebuilt);
        debug!(
            "installed rebuilt tree: {} page(s)",
            self.document.page_count()
        );

        // Installing the tree is itself a structural change the host
        // reports back. Deliver that echo while the cycle is still open:
        // the guard must swallow it, or every reflow would cause another.
        let echo = ChangeNotification::edit(
            DocSnapshot::paged(old),
            DocSnapshot::paged(self.document.clone()),
        );
        let echoed = self.notify(echo);
        debug_assert_eq!(echoed, ReflowOutcome::Suppressed);

        self.state = ControllerState::Idle;
        ReflowOutcome::Rebuilt
    }
}
