//! Engine configuration.
//!
//! [`PaginationOptions`] is what the host hands the engine at construction;
//! [`PageSettings`] is the live override value the host replaces at runtime
//! (a wholesale replacement, never a partial merge); [`ConfigStore`] holds
//! the current value and is read-only to everything except the update
//! signal path.

use crate::style::{MarginConfig, Orientation};
use serde::{Deserialize, Serialize};

/// Options recognized at engine construction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationOptions {
    /// Margins applied until the host overrides them.
    pub default_margin_config: MarginConfig,
    /// Orientation applied until the host overrides it.
    pub default_paper_orientation: Orientation,
    /// Which page regions to materialize.
    pub page_amendment_options: PageAmendmentOptions,
}

/// Header/footer enablement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageAmendmentOptions {
    pub enable_header: bool,
    pub enable_footer: bool,
}

impl Default for PageAmendmentOptions {
    fn default() -> Self {
        Self {
            enable_header: true,
            enable_footer: true,
        }
    }
}

/// The active layout settings. Travels as out-of-band metadata on a change
/// notification, or is assembled by the `set_margins` / `set_orientation`
/// entry points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSettings {
    pub margins: MarginConfig,
    pub orientation: Orientation,
    pub enable_header: bool,
    pub enable_footer: bool,
}

impl PageSettings {
    pub fn from_options(options: &PaginationOptions) -> Self {
        Self {
            margins: options.default_margin_config,
            orientation: options.default_paper_orientation,
            enable_header: options.page_amendment_options.enable_header,
            enable_footer: options.page_amendment_options.enable_footer,
        }
    }
}

/// Holds the current settings value for one document session.
///
/// Initialized from the construction options, replaced wholesale on every
/// update signal. Everything else only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigStore {
    current: PageSettings,
}

impl ConfigStore {
    pub fn new(options: &PaginationOptions) -> Self {
        Self {
            current: PageSettings::from_options(options),
        }
    }

    /// Replace the stored settings with a new value.
    pub fn replace(&mut self, settings: PageSettings) {
        self.current = settings;
    }

    pub fn current(&self) -> &PageSettings {
        &self.current
    }
}
