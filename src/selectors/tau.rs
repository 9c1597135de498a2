//! Hadronic tau identification
//!
//! Uses the DeepTau 2017 v2.1 discriminants, stored as bitmasks of passed
//! working points. Against electrons and jets: 1 = VVVLoose, 2 = VVLoose,
//! 4 = VLoose, 8 = Loose, 16 = Medium, 32 = Tight, 64 = VTight, 128 = VVTight.
//! Against muons: 1 = VLoose, 2 = Loose, 4 = Medium, 8 = Tight.

use crate::{
    array::{aligned_shape, Column, Mask},
    cuts::{IdRequirement, PerYear},
    error::Result,
    numeric::{functions::*, Float, IdValue},
    scheduling,
    year::Year,
};

use serde::{Deserialize, Serialize};

/// Tau working point
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct TauCuts {
    /// Exclusive minimum transverse momentum (GeV)
    pub min_pt: Float,

    /// Exclusive maximum |η|
    pub max_abs_eta: Float,

    /// Decay modes which are explicitly rejected
    pub rejected_decay_modes: [IdValue; 2],

    /// Requirement on the DeepTau discriminant against electrons
    pub vs_electron: IdRequirement,

    /// Requirement on the DeepTau discriminant against jets
    pub vs_jet: IdRequirement,

    /// Requirement on the DeepTau discriminant against muons
    pub vs_muon: IdRequirement,
}
//
impl TauCuts {
    /// Decide whether one tau passes this working point
    #[allow(clippy::too_many_arguments)]
    pub fn accepts(
        &self,
        pt: Float,
        eta: Float,
        decay_mode: IdValue,
        decay_mode_dms: bool,
        vs_electron: IdValue,
        vs_jet: IdValue,
        vs_muon: IdValue,
    ) -> bool {
        let rejected_mode = self
            .rejected_decay_modes
            .iter()
            .fold(false, |rejected, &mode| rejected | (decay_mode == mode));
        (pt > self.min_pt)
            & (abs(eta) < self.max_abs_eta)
            & !rejected_mode
            & decay_mode_dms
            & self.vs_electron.accepts(vs_electron)
            & self.vs_jet.accepts(vs_jet)
            & self.vs_muon.accepts(vs_muon)
    }

    /// Evaluate this working point on index-aligned tau columns
    #[allow(clippy::too_many_arguments)]
    pub fn select(
        &self,
        pt: &Column<Float>,
        eta: &Column<Float>,
        decay_mode: &Column<IdValue>,
        decay_mode_dms: &Column<bool>,
        vs_electron: &Column<IdValue>,
        vs_jet: &Column<IdValue>,
        vs_muon: &Column<IdValue>,
    ) -> Result<Mask> {
        let shape = aligned_shape(&[
            ("pt", pt.shape()),
            ("eta", eta.shape()),
            ("decay_mode", decay_mode.shape()),
            ("decay_mode_dms", decay_mode_dms.shape()),
            ("id_vs_electron", vs_electron.shape()),
            ("id_vs_jet", vs_jet.shape()),
            ("id_vs_muon", vs_muon.shape()),
        ])?;
        let (pt, eta) = (pt.values(), eta.values());
        let (decay_mode, decay_mode_dms) = (decay_mode.values(), decay_mode_dms.values());
        let (vs_e, vs_j, vs_m) = (vs_electron.values(), vs_jet.values(), vs_muon.values());
        Ok(scheduling::evaluate(shape, |i| {
            self.accepts(
                pt[i],
                eta[i],
                decay_mode[i],
                decay_mode_dms[i],
                vs_e[i],
                vs_j[i],
                vs_m[i],
            )
        }))
    }
}

/// Loose taus: medium vs electrons, very loose vs jets, loose vs muons
///
/// Decay modes 5 and 6 must be rejected when using the new decay mode
/// finding together with DeepTau v2.1.
///
pub const LOOSE: PerYear<TauCuts> = PerYear::uniform(TauCuts {
    min_pt: 20.0,
    max_abs_eta: 2.3,
    rejected_decay_modes: [5, 6],
    vs_electron: IdRequirement::Bitmask { bits: 16 },
    vs_jet: IdRequirement::Bitmask { bits: 4 },
    vs_muon: IdRequirement::Bitmask { bits: 2 },
});

/// Loose taus
#[allow(clippy::too_many_arguments)]
pub fn is_loose_tau(
    pt: &Column<Float>,
    eta: &Column<Float>,
    decay_mode: &Column<IdValue>,
    decay_mode_dms: &Column<bool>,
    id_vs_electron: &Column<IdValue>,
    id_vs_jet: &Column<IdValue>,
    id_vs_muon: &Column<IdValue>,
    year: Year,
) -> Result<Mask> {
    LOOSE.get(year).select(
        pt,
        eta,
        decay_mode,
        decay_mode_dms,
        id_vs_electron,
        id_vs_jet,
        id_vs_muon,
    )
}
