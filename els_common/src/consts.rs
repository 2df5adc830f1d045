//! System-wide constants.

/// Panel refresh rate; one control-loop tick per refresh.
pub const UI_REFRESH_RATE_HZ: u32 = 100;

/// Glyph positions in the message display.
pub const MESSAGE_WIDTH: usize = 8;

/// Glyph positions in the value display.
pub const VALUE_WIDTH: usize = 4;

/// Nanometres per inch (exact).
pub const NM_PER_INCH: u128 = 25_400_000;

/// Nanometres per hundredth of a millimetre.
pub const NM_PER_HMM: u128 = 10_000;

/// Convert a display duration in milliseconds to control-loop ticks.
#[inline]
pub const fn millis_to_ticks(ms: u32) -> u16 {
    let ticks = ms as u64 * UI_REFRESH_RATE_HZ as u64 / 1000;
    assert!(ticks <= u16::MAX as u64, "display duration too long");
    ticks as u16
}
