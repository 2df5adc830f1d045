//! Exact feed ratios.
//!
//! A [`Ratio`] is the number of stepper microsteps to emit per encoder count,
//! kept as a reduced fraction so the motion core can propagate it with
//! integer arithmetic and no rounding.
//!
//! Ratios are derived from a [`Pitch`] (what the operator selected) and the
//! machine's leadscrew and drive parameters. All lengths are converted to
//! nanometres first: both 1 in and 0.01 mm are whole numbers of nanometres,
//! so metric and imperial pitches mix without error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MachineConfig;
use crate::consts::{NM_PER_HMM, NM_PER_INCH};

/// Ratio construction error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RatioError {
    #[error("ratio numerator is zero")]
    ZeroNumerator,

    #[error("ratio denominator is zero")]
    ZeroDenominator,

    /// The reduced fraction does not fit in 64 bits.
    #[error("reduced ratio {numerator}/{denominator} overflows u64")]
    Overflow { numerator: u128, denominator: u128 },
}

/// Reduced, non-zero rational ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    numerator: u64,
    denominator: u64,
}

const fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Ratio {
    /// 1:1.
    pub const UNITY: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    /// Build a ratio, reducing it to lowest terms.
    pub fn new(numerator: u64, denominator: u64) -> Result<Self, RatioError> {
        Self::reduce(numerator as u128, denominator as u128)
    }

    fn reduce(numerator: u128, denominator: u128) -> Result<Self, RatioError> {
        if denominator == 0 {
            return Err(RatioError::ZeroDenominator);
        }
        if numerator == 0 {
            return Err(RatioError::ZeroNumerator);
        }
        let g = gcd(numerator, denominator);
        let (n, d) = (numerator / g, denominator / g);
        match (u64::try_from(n), u64::try_from(d)) {
            (Ok(numerator), Ok(denominator)) => Ok(Self {
                numerator,
                denominator,
            }),
            _ => Err(RatioError::Overflow {
                numerator: n,
                denominator: d,
            }),
        }
    }

    #[inline]
    pub const fn numerator(&self) -> u64 {
        self.numerator
    }

    #[inline]
    pub const fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Product of two ratios, reduced.
    pub fn checked_mul(self, other: Ratio) -> Result<Ratio, RatioError> {
        Self::reduce(
            self.numerator as u128 * other.numerator as u128,
            self.denominator as u128 * other.denominator as u128,
        )
    }

    /// Microsteps per encoder count for `pitch` on the given machine.
    ///
    /// `travel / lead * steps * microsteps / encoder_counts`, all exact.
    pub fn for_pitch(pitch: Pitch, machine: &MachineConfig) -> Result<Ratio, RatioError> {
        let (travel_n, travel_d) = pitch.travel_nm();
        let (lead_n, lead_d) = machine.leadscrew.lead_nm();
        let steps = machine.stepper_resolution as u128 * machine.stepper_microsteps as u128;
        Self::reduce(
            travel_n * lead_d * steps,
            travel_d * lead_n * machine.encoder_resolution as u128,
        )
    }
}

/// Tool travel per spindle revolution, as selected on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pitch {
    /// Imperial thread, in tenths of threads per inch (115 = 11.5 TPI).
    Tpi10(u32),
    /// Imperial feed, in thousandths of an inch per revolution.
    InchThou(u32),
    /// Metric thread or feed, in hundredths of a millimetre per revolution.
    Hmm(u32),
}

impl Pitch {
    /// Travel per revolution as a fraction of nanometres.
    pub const fn travel_nm(self) -> (u128, u128) {
        match self {
            Pitch::Tpi10(tpi10) => (NM_PER_INCH * 10, tpi10 as u128),
            Pitch::InchThou(thou) => (thou as u128 * NM_PER_INCH, 1000),
            Pitch::Hmm(hmm) => (hmm as u128 * NM_PER_HMM, 1),
        }
    }
}

/// Leadscrew lead, as configured for the machine.
///
/// In TOML: `leadscrew = { tpi = 12 }` or `leadscrew = { pitch_hmm = 200 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leadscrew {
    /// Imperial leadscrew, threads per inch.
    Tpi(u32),
    /// Metric leadscrew, pitch in hundredths of a millimetre.
    PitchHmm(u32),
}

impl Leadscrew {
    /// Lead per leadscrew revolution as a fraction of nanometres.
    pub const fn lead_nm(self) -> (u128, u128) {
        match self {
            Leadscrew::Tpi(tpi) => (NM_PER_INCH, tpi as u128),
            Leadscrew::PitchHmm(hmm) => (hmm as u128 * NM_PER_HMM, 1),
        }
    }

    /// Raw configured value, used for validation.
    pub const fn raw(self) -> u32 {
        match self {
            Leadscrew::Tpi(v) | Leadscrew::PitchHmm(v) => v,
        }
    }
}
