//! Cut-based photon identification
//!
//! The NanoAOD cut-based photon ID is an ordinal level (0: fail, 1: loose,
//! 2: medium, 3: tight) in the 2016 samples and a bitmask of passed working
//! points in the 2017 and 2018 ones.

use crate::{
    array::{aligned_shape, Column, Mask},
    cuts::{AbsEtaRange, IdRequirement, PerYear, TRANSITION_GAP},
    error::Result,
    numeric::{Float, IdValue},
    scheduling,
    year::Year,
};

use serde::{Deserialize, Serialize};

/// Loose photon working point
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct PhotonCuts {
    /// Exclusive minimum transverse momentum (GeV)
    pub min_pt: Float,

    /// Acceptance
    pub acceptance: AbsEtaRange,

    /// Region excluded from the acceptance
    pub excluded: AbsEtaRange,

    /// Requirement on the cut-based ID
    pub id: IdRequirement,
}
//
impl PhotonCuts {
    /// Decide whether one photon passes this working point
    pub fn accepts(&self, pt: Float, eta: Float, id: IdValue) -> bool {
        (pt > self.min_pt)
            & !self.excluded.contains(eta)
            & self.acceptance.contains(eta)
            & self.id.accepts(id)
    }

    /// Evaluate this working point on index-aligned photon columns
    pub fn select(
        &self,
        pt: &Column<Float>,
        eta: &Column<Float>,
        id: &Column<IdValue>,
    ) -> Result<Mask> {
        let shape = aligned_shape(&[("pt", pt.shape()), ("eta", eta.shape()), ("id", id.shape())])?;
        let (pt, eta, id) = (pt.values(), eta.values(), id.values());
        Ok(scheduling::evaluate(shape, |i| self.accepts(pt[i], eta[i], id[i])))
    }
}

/// High-pT photon working point
///
/// No η requirement: the barrel-only supercluster flag is expected to have
/// been applied upstream.
///
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct TightPhotonCuts {
    /// Exclusive minimum transverse momentum (GeV)
    pub min_pt: Float,

    /// Requirement on the cut-based ID
    pub id: IdRequirement,
}
//
impl TightPhotonCuts {
    /// Decide whether one photon passes this working point
    pub fn accepts(&self, pt: Float, id: IdValue) -> bool {
        (pt > self.min_pt) & self.id.accepts(id)
    }

    /// Evaluate this working point on index-aligned photon columns
    pub fn select(&self, pt: &Column<Float>, id: &Column<IdValue>) -> Result<Mask> {
        let shape = aligned_shape(&[("pt", pt.shape()), ("id", id.shape())])?;
        let (pt, id) = (pt.values(), id.values());
        Ok(scheduling::evaluate(shape, |i| self.accepts(pt[i], id[i])))
    }
}

/// Loose photon with a given ID requirement
const fn loose(id: IdRequirement) -> PhotonCuts {
    PhotonCuts {
        min_pt: 15.0,
        acceptance: AbsEtaRange {
            above: None,
            below: 2.5,
        },
        excluded: TRANSITION_GAP,
        id,
    }
}

/// Loose photons
pub const LOOSE: PerYear<PhotonCuts> = PerYear {
    y2016: loose(IdRequirement::Ordinal { min: 1 }),
    y2017: loose(IdRequirement::Bitmask { bits: 1 }),
    y2018: loose(IdRequirement::Bitmask { bits: 1 }),
};

/// Tight photons, using the medium ID as in the monojet analysis
///
/// The single photon trigger threshold is 175 GeV in 2016 and 200 GeV later
/// on, hence the different pT requirements.
///
pub const TIGHT: PerYear<TightPhotonCuts> = PerYear {
    y2016: TightPhotonCuts {
        min_pt: 200.0,
        id: IdRequirement::Ordinal { min: 2 },
    },
    y2017: TightPhotonCuts {
        min_pt: 230.0,
        id: IdRequirement::Bitmask { bits: 2 },
    },
    y2018: TightPhotonCuts {
        min_pt: 230.0,
        id: IdRequirement::Bitmask { bits: 2 },
    },
};

/// Loose photons
pub fn is_loose_photon(
    pt: &Column<Float>,
    eta: &Column<Float>,
    loose_id: &Column<IdValue>,
    year: Year,
) -> Result<Mask> {
    LOOSE.get(year).select(pt, eta, loose_id)
}

/// Tight photons
pub fn is_tight_photon(pt: &Column<Float>, tight_id: &Column<IdValue>, year: Year) -> Result<Mask> {
    TIGHT.get(year).select(pt, tight_id)
}
