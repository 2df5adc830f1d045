//! # ELS Control Panel Library
//!
//! Decision layer of the electronic leadscrew control panel. Turns keypad
//! events and machine state into the feed/thread/gear ratio used by the
//! motion core, and into the glyphs and indicator lights on the panel.
//!
//! ## Components
//!
//! 1. **RatioTable** ([`table`]): cyclic selector over a fixed row list
//! 2. **Catalogs** ([`catalog`]): feed/thread tables per unit × mode, gear table
//! 3. **MessageSequencer** ([`message`]): timed, chained message overrides
//! 4. **PanelControlLoop** ([`control`]): per-tick key handling, safety
//!    gating and display update
//!
//! ## Zero-Allocation Tick
//!
//! Tables are built once at startup into fixed-capacity storage and message
//! frames are static data. A tick performs no heap allocation.

pub mod catalog;
pub mod config;
pub mod control;
pub mod message;
pub mod sim;
pub mod table;
