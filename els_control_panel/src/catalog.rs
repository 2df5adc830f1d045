//! Ratio table catalogs.
//!
//! The feed/thread catalog holds one table per unit system × mode and is
//! resolved from the panel's two mode flags. The gear catalog holds the
//! single table of gear settings. Both are built once from the machine
//! configuration; the rows themselves are fixed (see [`rows`]).

pub mod rows;

use els_common::config::MachineConfig;
use els_common::glyph::ValueGlyphs;
use els_common::panel::Indicators;
use els_common::ratio::{Ratio, RatioError};
use thiserror::Error;
use tracing::debug;

use crate::message::FrameId;
use crate::table::{RatioRow, RatioTable, TableError};

use rows::{FeedSpec, GearSpec};

/// Catalog construction error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("{table}: {source}")]
    Ratio {
        table: &'static str,
        #[source]
        source: RatioError,
    },

    #[error("{table}: {source}")]
    Table {
        table: &'static str,
        #[source]
        source: TableError,
    },
}

/// A feed or thread setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedThreadRow {
    pub display: ValueGlyphs,
    /// Mode lights shown with this row.
    pub leds: Indicators,
    pub ratio: Ratio,
}

impl RatioRow for FeedThreadRow {
    fn ratio(&self) -> Ratio {
        self.ratio
    }
}

/// A gear setting and the message announcing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GearRow {
    pub message: FrameId,
    pub ratio: Ratio,
}

impl RatioRow for GearRow {
    fn ratio(&self) -> Ratio {
        self.ratio
    }
}

pub type FeedTable = RatioTable<FeedThreadRow>;
pub type GearTable = RatioTable<GearRow>;

/// The four feed/thread tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedTableKind {
    InchThread,
    InchFeed,
    MetricThread,
    MetricFeed,
}

impl FeedTableKind {
    pub const ALL: [FeedTableKind; 4] = [
        FeedTableKind::InchThread,
        FeedTableKind::InchFeed,
        FeedTableKind::MetricThread,
        FeedTableKind::MetricFeed,
    ];

    #[inline]
    pub const fn from_modes(metric: bool, thread: bool) -> Self {
        match (metric, thread) {
            (false, true) => FeedTableKind::InchThread,
            (false, false) => FeedTableKind::InchFeed,
            (true, true) => FeedTableKind::MetricThread,
            (true, false) => FeedTableKind::MetricFeed,
        }
    }

    /// `(metric, thread)` flags selecting this table.
    pub const fn modes(self) -> (bool, bool) {
        match self {
            FeedTableKind::InchThread => (false, true),
            FeedTableKind::InchFeed => (false, false),
            FeedTableKind::MetricThread => (true, true),
            FeedTableKind::MetricFeed => (true, false),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            FeedTableKind::InchThread => "inch threads",
            FeedTableKind::InchFeed => "inch feeds",
            FeedTableKind::MetricThread => "metric threads",
            FeedTableKind::MetricFeed => "metric feeds",
        }
    }

    /// Mode lights shared by every row of the table.
    pub const fn leds(self) -> Indicators {
        match self {
            FeedTableKind::InchThread => Indicators::THREAD.union(Indicators::TPI),
            FeedTableKind::InchFeed => Indicators::FEED.union(Indicators::INCH),
            FeedTableKind::MetricThread => Indicators::THREAD.union(Indicators::MM),
            FeedTableKind::MetricFeed => Indicators::FEED.union(Indicators::MM),
        }
    }

    fn specs(self) -> (&'static [FeedSpec], usize) {
        match self {
            FeedTableKind::InchThread => {
                (rows::INCH_THREADS.as_slice(), rows::INCH_THREADS_DEFAULT)
            }
            FeedTableKind::InchFeed => (rows::INCH_FEEDS.as_slice(), rows::INCH_FEEDS_DEFAULT),
            FeedTableKind::MetricThread => {
                (rows::METRIC_THREADS.as_slice(), rows::METRIC_THREADS_DEFAULT)
            }
            FeedTableKind::MetricFeed => {
                (rows::METRIC_FEEDS.as_slice(), rows::METRIC_FEEDS_DEFAULT)
            }
        }
    }

    fn build(self, machine: &MachineConfig) -> Result<FeedTable, CatalogError> {
        let (specs, default) = self.specs();
        let leds = self.leds();
        let rows = specs
            .iter()
            .map(|spec| {
                Ratio::for_pitch(spec.pitch, machine).map(|ratio| FeedThreadRow {
                    display: spec.display,
                    leds,
                    ratio,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| CatalogError::Ratio {
                table: self.name(),
                source,
            })?;
        RatioTable::new(rows, default).map_err(|source| CatalogError::Table {
            table: self.name(),
            source,
        })
    }
}

/// Feed/thread tables for every unit × mode combination.
#[derive(Debug, Clone)]
pub struct FeedTableCatalog {
    inch_threads: FeedTable,
    inch_feeds: FeedTable,
    metric_threads: FeedTable,
    metric_feeds: FeedTable,
}

impl FeedTableCatalog {
    /// Build all four tables for `machine`.
    pub fn new(machine: &MachineConfig) -> Result<Self, CatalogError> {
        let catalog = Self {
            inch_threads: FeedTableKind::InchThread.build(machine)?,
            inch_feeds: FeedTableKind::InchFeed.build(machine)?,
            metric_threads: FeedTableKind::MetricThread.build(machine)?,
            metric_feeds: FeedTableKind::MetricFeed.build(machine)?,
        };
        debug!(
            inch_threads = catalog.inch_threads.len(),
            inch_feeds = catalog.inch_feeds.len(),
            metric_threads = catalog.metric_threads.len(),
            metric_feeds = catalog.metric_feeds.len(),
            "feed catalog built"
        );
        Ok(catalog)
    }

    /// Table for the given unit system and mode.
    pub fn resolve(&self, metric: bool, thread: bool) -> &FeedTable {
        match FeedTableKind::from_modes(metric, thread) {
            FeedTableKind::InchThread => &self.inch_threads,
            FeedTableKind::InchFeed => &self.inch_feeds,
            FeedTableKind::MetricThread => &self.metric_threads,
            FeedTableKind::MetricFeed => &self.metric_feeds,
        }
    }

    pub fn resolve_mut(&mut self, metric: bool, thread: bool) -> &mut FeedTable {
        match FeedTableKind::from_modes(metric, thread) {
            FeedTableKind::InchThread => &mut self.inch_threads,
            FeedTableKind::InchFeed => &mut self.inch_feeds,
            FeedTableKind::MetricThread => &mut self.metric_threads,
            FeedTableKind::MetricFeed => &mut self.metric_feeds,
        }
    }
}

/// The gear settings table.
#[derive(Debug, Clone)]
pub struct GearTableCatalog {
    table: GearTable,
}

impl GearTableCatalog {
    pub fn new() -> Result<Self, CatalogError> {
        Self::from_specs(&rows::GEARS, rows::GEARS_DEFAULT)
    }

    fn from_specs(specs: &[GearSpec], default: usize) -> Result<Self, CatalogError> {
        let rows = specs
            .iter()
            .map(|spec| {
                Ratio::new(spec.numerator, spec.denominator).map(|ratio| GearRow {
                    message: spec.message,
                    ratio,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| CatalogError::Ratio {
                table: "gears",
                source,
            })?;
        let table = RatioTable::new(rows, default).map_err(|source| CatalogError::Table {
            table: "gears",
            source,
        })?;
        Ok(Self { table })
    }

    #[inline]
    pub fn table(&self) -> &GearTable {
        &self.table
    }

    #[inline]
    pub fn table_mut(&mut self) -> &mut GearTable {
        &mut self.table
    }
}
