//! ELS Common Library
//!
//! Shared types, configuration loading and collaborator contracts for the
//! electronic leadscrew control panel.
//!
//! # Module Structure
//!
//! - [`glyph`] - Display glyphs and compile-time text conversion
//! - [`ratio`] - Reduced rational ratios and pitch/leadscrew arithmetic
//! - [`panel`] - Keypad and indicator flags, `ControlPanel` driver contract
//! - [`motion`] - `MotionCore` contract of the motion-synchronization engine
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - System constants
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use els_common::prelude::*;
//! ```

pub mod config;
pub mod consts;
pub mod glyph;
pub mod motion;
pub mod panel;
pub mod prelude;
pub mod ratio;
