//! Prelude module for common re-exports.
//!
//! ```rust
//! use els_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, MachineConfig, PanelOptions, SharedConfig};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{MESSAGE_WIDTH, UI_REFRESH_RATE_HZ, VALUE_WIDTH};

// ─── Display ────────────────────────────────────────────────────────
pub use crate::glyph::{Glyph, GlyphText, MessageGlyphs, ValueGlyphs};

// ─── Collaborators ──────────────────────────────────────────────────
pub use crate::motion::MotionCore;
pub use crate::panel::{ControlPanel, Indicators, Keys};
pub use crate::ratio::{Leadscrew, Pitch, Ratio, RatioError};
