//! Building blocks of the selection thresholds
//!
//! Every selection working point is a plain-data threshold structure. Those
//! which vary with the data-taking campaign are stored in a `PerYear` lookup,
//! so that year dependence is a matter of picking the right entry rather than
//! of branching in the selection code.

use crate::{
    numeric::{functions::*, Float, IdValue},
    year::Year,
};

use serde::{Deserialize, Serialize};

/// One threshold entry per data-taking year
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct PerYear<T> {
    /// Thresholds of the 2016 campaign
    #[serde(rename = "2016")]
    pub y2016: T,

    /// Thresholds of the 2017 campaign
    #[serde(rename = "2017")]
    pub y2017: T,

    /// Thresholds of the 2018 campaign
    #[serde(rename = "2018")]
    pub y2018: T,
}
//
impl<T: Copy> PerYear<T> {
    /// Use the same thresholds for every year
    pub const fn uniform(cuts: T) -> Self {
        Self {
            y2016: cuts,
            y2017: cuts,
            y2018: cuts,
        }
    }
}
//
impl<T> PerYear<T> {
    /// Thresholds which apply to a given year
    pub fn get(&self, year: Year) -> &T {
        match year {
            Year::Y2016 => &self.y2016,
            Year::Y2017 => &self.y2017,
            Year::Y2018 => &self.y2018,
        }
    }
}

/// Requirement on an integer ID field
///
/// The same quality criterion may be encoded as an ordinal level in one
/// campaign and as a bitmask of passed working points in another.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(tag = "encoding", rename_all = "snake_case")]
pub enum IdRequirement {
    /// Ordinal level, at least `min`
    Ordinal {
        /// Lowest accepted level
        min: IdValue,
    },

    /// Ordinal level, exactly `level`
    Exact {
        /// Only accepted level
        level: IdValue,
    },

    /// Bitmask, all of `bits` set
    Bitmask {
        /// Bits which must all be set
        bits: IdValue,
    },
}
//
impl IdRequirement {
    /// Check an ID field value against this requirement
    pub fn accepts(self, id: IdValue) -> bool {
        match self {
            IdRequirement::Ordinal { min } => id >= min,
            IdRequirement::Exact { level } => id == level,
            IdRequirement::Bitmask { bits } => has_bits(id, bits),
        }
    }
}

/// Open range of absolute pseudorapidity
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct AbsEtaRange {
    /// Exclusive lower bound on |η| (none for ranges starting at η = 0)
    pub above: Option<Float>,

    /// Exclusive upper bound on |η|
    pub below: Float,
}
//
impl AbsEtaRange {
    /// Truth that |eta| lies strictly within the range
    pub fn contains(&self, eta: Float) -> bool {
        let abs_eta = abs(eta);
        let above = match self.above {
            Some(min) => abs_eta > min,
            None => true,
        };
        above & (abs_eta < self.below)
    }
}

/// Open window on a signed coordinate
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Window {
    /// Exclusive lower bound
    pub above: Float,

    /// Exclusive upper bound
    pub below: Float,
}
//
impl Window {
    /// Truth that x lies strictly within the window
    pub fn contains(&self, x: Float) -> bool {
        (x > self.above) & (x < self.below)
    }
}

/// ECAL barrel acceptance
pub const BARREL: AbsEtaRange = AbsEtaRange {
    above: None,
    below: 1.4442,
};

/// ECAL barrel/endcap transition region
pub const TRANSITION_GAP: AbsEtaRange = AbsEtaRange {
    above: Some(1.4442),
    below: 1.5660,
};

/// ECAL endcap acceptance
pub const ENDCAP: AbsEtaRange = AbsEtaRange {
    above: Some(1.5660),
    below: 2.5,
};
