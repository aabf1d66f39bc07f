//! # Page Attributes
//!
//! Paper geometry, margins, colours and borders, and the resolution step
//! that turns the sparse attributes stored on a page node into a fully
//! populated set. Resolution is a three-level fallback, applied field by
//! field: explicit page-node attributes win, then the live settings
//! override, then the hard defaults.
//!
//! Paper sizes and margins are millimetres (the unit the host's page
//! dialogs speak); content budgets are pixels at the engine's reference
//! 96 dpi.

use serde::{Deserialize, Serialize};

/// Pixels per millimetre at 96 dpi.
pub const PX_PER_MM: f64 = 96.0 / 25.4;

/// Convert millimetres to reference pixels.
pub fn mm_to_px(mm: f64) -> f64 {
    mm * PX_PER_MM
}

pub const DEFAULT_PAPER_SIZE: PaperSize = PaperSize::A4;
pub const DEFAULT_PAPER_ORIENTATION: Orientation = Orientation::Portrait;
pub const DEFAULT_PAPER_COLOUR: Color = Color::WHITE;

/// Default symmetric page margin: one inch.
pub const DEFAULT_MARGIN_MM: f64 = 25.4;

/// Vertical margin applied to header and footer regions.
pub const HEADER_FOOTER_MARGIN_MM: f64 = 5.0;

/// Standard paper sizes, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PaperSize {
    #[default]
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom {
        width: f64,
        height: f64,
    },
}

impl PaperSize {
    /// Returns (width, height) in millimetres, portrait-oriented.
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// Which way the paper is turned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Apply this orientation to portrait paper dimensions.
    pub fn apply(&self, (width, height): (f64, f64)) -> (f64, f64) {
        match self {
            Orientation::Portrait => (width, height),
            Orientation::Landscape => (height, width),
        }
    }
}

/// An RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64, // 0.0 - 1.0
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        let (r, g, b) = match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).unwrap_or(0);
                (r, g, b)
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                (r, g, b)
            }
            _ => (0, 0, 0),
        };
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Per-side margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginConfig {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl MarginConfig {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// The host dialog's "narrow" preset.
    pub fn narrow() -> Self {
        Self::uniform(12.7)
    }

    /// The host dialog's "normal" preset.
    pub fn normal() -> Self {
        Self::uniform(15.0)
    }

    /// The host dialog's "wide" preset.
    pub fn wide() -> Self {
        Self::uniform(31.8)
    }
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self::uniform(DEFAULT_MARGIN_MM)
    }
}

/// Per-side border widths in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBorders {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl PageBorders {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }
}

/// Sparse attributes stored on a page node. A field is `Some` only when
/// that page was individually customized; everything else falls through to
/// the settings override and then the defaults at resolution time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_size: Option<PaperSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_colour: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borders: Option<PageBorders>,
}

impl PageAttrs {
    pub fn is_empty(&self) -> bool {
        self.paper_size.is_none()
            && self.orientation.is_none()
            && self.paper_colour.is_none()
            && self.borders.is_none()
    }

    /// Resolve to a fully populated set. `orientation_override` is the live
    /// settings value; paper size, colour and borders have no settings
    /// level and fall straight through to the defaults.
    pub fn resolve(&self, orientation_override: Option<Orientation>) -> ResolvedPageAttrs {
        ResolvedPageAttrs {
            paper_size: self.paper_size.unwrap_or(DEFAULT_PAPER_SIZE),
            orientation: self
                .orientation
                .or(orientation_override)
                .unwrap_or(DEFAULT_PAPER_ORIENTATION),
            paper_colour: self.paper_colour.unwrap_or(DEFAULT_PAPER_COLOUR),
            borders: self.borders.unwrap_or_default(),
        }
    }
}

/// A fully populated page attribute set. What the rendering layer sizes
/// and paints a page container with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPageAttrs {
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub paper_colour: Color,
    pub borders: PageBorders,
}

impl ResolvedPageAttrs {
    /// Oriented paper dimensions in pixels: orientation swaps the raw
    /// width/height before anything else looks at them.
    pub fn paper_px(&self) -> (f64, f64) {
        let (w_mm, h_mm) = self.orientation.apply(self.paper_size.dimensions_mm());
        (mm_to_px(w_mm), mm_to_px(h_mm))
    }
}

/// Resolved margins for each region of one page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionMargins {
    pub header: MarginConfig,
    pub body: MarginConfig,
    pub footer: MarginConfig,
}

impl RegionMargins {
    /// Derive region margins from the body margins: header and footer
    /// share the body's horizontal insets with a fixed vertical inset.
    pub fn from_body(body: MarginConfig) -> Self {
        let band = MarginConfig {
            top: HEADER_FOOTER_MARGIN_MM,
            bottom: HEADER_FOOTER_MARGIN_MM,
            left: body.left,
            right: body.right,
        };
        Self {
            header: band,
            body,
            footer: band,
        }
    }
}

/// A resolved pixel budget.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelDimensions {
    pub width: f64,
    pub height: f64,
}
