//! Jet identification
//!
//! The jet ID flags are a bitmask where bit 1 is loose (always unset in 2017,
//! where it does not exist), bit 2 tight and bit 3 tight with lepton veto. The
//! tight ID is the standard one. Pileup jet ID is only applied below a pT
//! threshold, using its loose working point (bit 1).

use crate::{
    array::{aligned_shape, Column, Mask},
    cuts::{IdRequirement, PerYear, Window},
    error::Result,
    numeric::{functions::*, Float, IdValue},
    scheduling,
    year::Year,
};

use serde::{Deserialize, Serialize};

/// AK4 jet working point
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct JetCuts {
    /// Exclusive minimum transverse momentum (GeV)
    pub min_pt: Float,

    /// Exclusive maximum |η|
    pub max_abs_eta: Float,

    /// Requirement on the jet ID flags
    pub jet_id: IdRequirement,

    /// Exclusive maximum neutral hadron energy fraction
    pub max_neutral_hadron_fraction: Float,

    /// Exclusive minimum charged hadron energy fraction
    pub min_charged_hadron_fraction: Float,

    /// Inclusive pT above which the pileup jet ID is not applied (GeV)
    pub pileup_id_max_pt: Float,

    /// Requirement on the pileup jet ID flags, below `pileup_id_max_pt`
    pub pu_id: IdRequirement,
}
//
impl JetCuts {
    /// Decide whether one jet passes this working point
    pub fn accepts(
        &self,
        pt: Float,
        eta: Float,
        jet_id: IdValue,
        pu_id: IdValue,
        nhf: Float,
        chf: Float,
    ) -> bool {
        let base = (pt > self.min_pt)
            & (abs(eta) < self.max_abs_eta)
            & self.jet_id.accepts(jet_id)
            & (nhf < self.max_neutral_hadron_fraction)
            & (chf > self.min_charged_hadron_fraction);
        ((pt >= self.pileup_id_max_pt) & base)
            | ((pt < self.pileup_id_max_pt) & base & self.pu_id.accepts(pu_id))
    }

    /// Evaluate this working point on index-aligned jet columns
    #[allow(clippy::too_many_arguments)]
    pub fn select(
        &self,
        pt: &Column<Float>,
        eta: &Column<Float>,
        jet_id: &Column<IdValue>,
        pu_id: &Column<IdValue>,
        nhf: &Column<Float>,
        chf: &Column<Float>,
    ) -> Result<Mask> {
        let shape = aligned_shape(&[
            ("pt", pt.shape()),
            ("eta", eta.shape()),
            ("jet_id", jet_id.shape()),
            ("pu_id", pu_id.shape()),
            ("nhf", nhf.shape()),
            ("chf", chf.shape()),
        ])?;
        let (pt, eta, nhf, chf) = (pt.values(), eta.values(), nhf.values(), chf.values());
        let (jet_id, pu_id) = (jet_id.values(), pu_id.values());
        Ok(scheduling::evaluate(shape, |i| {
            self.accepts(pt[i], eta[i], jet_id[i], pu_id[i], nhf[i], chf[i])
        }))
    }
}

/// AK8 jet working point
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct FatJetCuts {
    /// Exclusive minimum transverse momentum (GeV)
    pub min_pt: Float,

    /// Exclusive maximum |η|
    pub max_abs_eta: Float,

    /// Requirement on the jet ID flags
    pub jet_id: IdRequirement,
}
//
impl FatJetCuts {
    /// Decide whether one fat jet passes this working point
    pub fn accepts(&self, pt: Float, eta: Float, jet_id: IdValue) -> bool {
        (pt > self.min_pt) & (abs(eta) < self.max_abs_eta) & self.jet_id.accepts(jet_id)
    }

    /// Evaluate this working point on index-aligned fat jet columns
    pub fn select(
        &self,
        pt: &Column<Float>,
        eta: &Column<Float>,
        jet_id: &Column<IdValue>,
    ) -> Result<Mask> {
        let shape = aligned_shape(&[
            ("pt", pt.shape()),
            ("eta", eta.shape()),
            ("jet_id", jet_id.shape()),
        ])?;
        let (pt, eta, jet_id) = (pt.values(), eta.values(), jet_id.values());
        Ok(scheduling::evaluate(shape, |i| self.accepts(pt[i], eta[i], jet_id[i])))
    }
}

/// Region of the HCAL endcap minus side which lost two sectors during part of
/// the 2018 run
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct HemRegion {
    /// Exclusive minimum transverse momentum (GeV)
    pub min_pt: Float,

    /// Pseudorapidity window
    pub eta: Window,

    /// Azimuthal window (rad)
    pub phi: Window,
}
//
impl HemRegion {
    /// Truth that a jet lies in the affected region
    pub fn contains(&self, pt: Float, eta: Float, phi: Float) -> bool {
        (pt > self.min_pt) & self.eta.contains(eta) & self.phi.contains(phi)
    }

    /// Flag the jets which lie in the affected region
    pub fn select(
        &self,
        pt: &Column<Float>,
        eta: &Column<Float>,
        phi: &Column<Float>,
    ) -> Result<Mask> {
        let shape =
            aligned_shape(&[("pt", pt.shape()), ("eta", eta.shape()), ("phi", phi.shape())])?;
        let (pt, eta, phi) = (pt.values(), eta.values(), phi.values());
        Ok(scheduling::evaluate(shape, |i| self.contains(pt[i], eta[i], phi[i])))
    }
}

/// Good AK4 jets: tight jet ID, loose pileup ID below 50 GeV
pub const GOOD: PerYear<JetCuts> = PerYear::uniform(JetCuts {
    min_pt: 30.0,
    max_abs_eta: 2.4,
    jet_id: IdRequirement::Bitmask { bits: 2 },
    max_neutral_hadron_fraction: 0.8,
    min_charged_hadron_fraction: 0.1,
    pileup_id_max_pt: 50.0,
    pu_id: IdRequirement::Bitmask { bits: 1 },
});

/// Good AK8 jets
pub const GOOD_FAT: FatJetCuts = FatJetCuts {
    min_pt: 160.0,
    max_abs_eta: 2.4,
    jet_id: IdRequirement::Bitmask { bits: 2 },
};

/// Jets in the HEM15/16 failure region
pub const HEM: HemRegion = HemRegion {
    min_pt: 30.0,
    eta: Window {
        above: -3.0,
        below: -1.3,
    },
    phi: Window {
        above: -1.57,
        below: -0.87,
    },
};

/// Good AK4 jets
pub fn is_good_jet(
    pt: &Column<Float>,
    eta: &Column<Float>,
    jet_id: &Column<IdValue>,
    pu_id: &Column<IdValue>,
    neutral_hadron_fraction: &Column<Float>,
    charged_hadron_fraction: &Column<Float>,
    year: Year,
) -> Result<Mask> {
    GOOD.get(year).select(
        pt,
        eta,
        jet_id,
        pu_id,
        neutral_hadron_fraction,
        charged_hadron_fraction,
    )
}

/// Good AK8 jets
pub fn is_good_fat_jet(
    pt: &Column<Float>,
    eta: &Column<Float>,
    jet_id: &Column<IdValue>,
) -> Result<Mask> {
    GOOD_FAT.select(pt, eta, jet_id)
}

/// Jets in the HEM15/16 failure region, to be vetoed
pub fn is_hem_jet(pt: &Column<Float>, eta: &Column<Float>, phi: &Column<Float>) -> Result<Mask> {
    HEM.select(pt, eta, phi)
}
