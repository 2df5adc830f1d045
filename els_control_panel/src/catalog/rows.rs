//! Fixed row lists. Order defines UP/DOWN traversal and must not change.

use els_common::glyph::{ValueGlyphs, value};
use els_common::ratio::Pitch::{self, Hmm, InchThou, Tpi10};

use crate::message::{FrameId, frames};

/// A feed/thread row before machine parameters are applied.
#[derive(Debug, Clone, Copy)]
pub struct FeedSpec {
    pub display: ValueGlyphs,
    pub pitch: Pitch,
}

const fn row(display: &str, pitch: Pitch) -> FeedSpec {
    FeedSpec {
        display: value(display),
        pitch,
    }
}

/// A gear row: spindle turns per encoder turn, and its announcement.
#[derive(Debug, Clone, Copy)]
pub struct GearSpec {
    pub message: FrameId,
    pub numerator: u64,
    pub denominator: u64,
}

pub const INCH_THREADS_DEFAULT: usize = 11;
pub static INCH_THREADS: [FeedSpec; 25] = [
    row("8", Tpi10(80)),
    row("9", Tpi10(90)),
    row("10", Tpi10(100)),
    row("11", Tpi10(110)),
    row("11.5", Tpi10(115)),
    row("12", Tpi10(120)),
    row("13", Tpi10(130)),
    row("14", Tpi10(140)),
    row("16", Tpi10(160)),
    row("18", Tpi10(180)),
    row("19", Tpi10(190)),
    row("20", Tpi10(200)),
    row("24", Tpi10(240)),
    row("26", Tpi10(260)),
    row("27", Tpi10(270)),
    row("28", Tpi10(280)),
    row("32", Tpi10(320)),
    row("36", Tpi10(360)),
    row("40", Tpi10(400)),
    row("44", Tpi10(440)),
    row("48", Tpi10(480)),
    row("56", Tpi10(560)),
    row("64", Tpi10(640)),
    row("72", Tpi10(720)),
    row("80", Tpi10(800)),
];

pub const METRIC_THREADS_DEFAULT: usize = 11;
pub static METRIC_THREADS: [FeedSpec; 24] = [
    row("0.20", Hmm(20)),
    row("0.25", Hmm(25)),
    row("0.30", Hmm(30)),
    row("0.35", Hmm(35)),
    row("0.40", Hmm(40)),
    row("0.45", Hmm(45)),
    row("0.50", Hmm(50)),
    row("0.60", Hmm(60)),
    row("0.70", Hmm(70)),
    row("0.75", Hmm(75)),
    row("0.80", Hmm(80)),
    row("1.00", Hmm(100)),
    row("1.25", Hmm(125)),
    row("1.50", Hmm(150)),
    row("1.75", Hmm(175)),
    row("2.00", Hmm(200)),
    row("2.50", Hmm(250)),
    row("3.00", Hmm(300)),
    row("3.50", Hmm(350)),
    row("4.00", Hmm(400)),
    row("4.50", Hmm(450)),
    row("5.00", Hmm(500)),
    row("5.50", Hmm(550)),
    row("6.00", Hmm(600)),
];

pub const INCH_FEEDS_DEFAULT: usize = 4;
pub static INCH_FEEDS: [FeedSpec; 13] = [
    row("0.001", InchThou(1)),
    row("0.002", InchThou(2)),
    row("0.003", InchThou(3)),
    row("0.004", InchThou(4)),
    row("0.005", InchThou(5)),
    row("0.006", InchThou(6)),
    row("0.007", InchThou(7)),
    row("0.008", InchThou(8)),
    row("0.009", InchThou(9)),
    row("0.010", InchThou(10)),
    row("0.012", InchThou(12)),
    row("0.015", InchThou(15)),
    row("0.020", InchThou(20)),
];

pub const METRIC_FEEDS_DEFAULT: usize = 3;
pub static METRIC_FEEDS: [FeedSpec; 13] = [
    row("0.02", Hmm(2)),
    row("0.05", Hmm(5)),
    row("0.07", Hmm(7)),
    row("0.10", Hmm(10)),
    row("0.12", Hmm(12)),
    row("0.15", Hmm(15)),
    row("0.17", Hmm(17)),
    row("0.20", Hmm(20)),
    row("0.25", Hmm(25)),
    row("0.30", Hmm(30)),
    row("0.35", Hmm(35)),
    row("0.40", Hmm(40)),
    row("0.50", Hmm(50)),
];

pub const GEARS_DEFAULT: usize = 0;
pub static GEARS: [GearSpec; 4] = [
    GearSpec {
        message: frames::GEAR_DIRECT,
        numerator: 1,
        denominator: 1,
    },
    GearSpec {
        message: frames::GEAR_2_TO_1,
        numerator: 1,
        denominator: 2,
    },
    GearSpec {
        message: frames::GEAR_4_TO_1,
        numerator: 1,
        denominator: 4,
    },
    GearSpec {
        message: frames::GEAR_8_TO_1,
        numerator: 1,
        denominator: 8,
    },
];
