//! Muon identification and isolation
//!
//! The ID flags are the POG selectors (impact parameter cuts are baked into
//! the tight one), isolation is the relative PF isolation in a ΔR < 0.4 cone.

use crate::{
    array::{aligned_shape, Column, Mask},
    cuts::PerYear,
    error::Result,
    numeric::{functions::*, Float},
    scheduling,
    year::Year,
};

use serde::{Deserialize, Serialize};

/// Requirement on the relative isolation
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IsolationCut {
    /// Isolated muons, below an exclusive maximum
    Isolated {
        /// Exclusive maximum relative isolation
        max: Float,
    },

    /// Non-isolated muons, above an exclusive minimum
    NonIsolated {
        /// Exclusive minimum relative isolation
        min: Float,
    },
}
//
impl IsolationCut {
    /// Check a relative isolation value
    pub fn accepts(self, iso: Float) -> bool {
        match self {
            IsolationCut::Isolated { max } => iso < max,
            IsolationCut::NonIsolated { min } => iso > min,
        }
    }
}

/// Muon working point
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct MuonCuts {
    /// Exclusive minimum transverse momentum (GeV)
    pub min_pt: Float,

    /// Exclusive maximum |η|
    pub max_abs_eta: Float,

    /// Requirement on the relative isolation
    pub isolation: IsolationCut,
}
//
impl MuonCuts {
    /// Decide whether one muon passes this working point
    pub fn accepts(&self, pt: Float, eta: Float, iso: Float, id: bool) -> bool {
        (pt > self.min_pt) & (abs(eta) < self.max_abs_eta) & id & self.isolation.accepts(iso)
    }

    /// Evaluate this working point on index-aligned muon columns
    ///
    /// `id` is the POG ID flag matching the working point.
    ///
    pub fn select(
        &self,
        pt: &Column<Float>,
        eta: &Column<Float>,
        iso: &Column<Float>,
        id: &Column<bool>,
    ) -> Result<Mask> {
        let shape = aligned_shape(&[
            ("pt", pt.shape()),
            ("eta", eta.shape()),
            ("iso", iso.shape()),
            ("id", id.shape()),
        ])?;
        let (pt, eta, iso, id) = (pt.values(), eta.values(), iso.values(), id.values());
        Ok(scheduling::evaluate(shape, |i| self.accepts(pt[i], eta[i], iso[i], id[i])))
    }
}

/// Loose muons: loose ID, loose isolation
pub const LOOSE: PerYear<MuonCuts> = PerYear::uniform(MuonCuts {
    min_pt: 10.0,
    max_abs_eta: 2.4,
    isolation: IsolationCut::Isolated { max: 0.25 },
});

/// Tight muons: tight ID, tight isolation
pub const TIGHT: PerYear<MuonCuts> = PerYear::uniform(MuonCuts {
    min_pt: 20.0,
    max_abs_eta: 2.4,
    isolation: IsolationCut::Isolated { max: 0.15 },
});

/// Soft muons: tight ID, failing tight isolation
pub const SOFT: PerYear<MuonCuts> = PerYear::uniform(MuonCuts {
    min_pt: 5.0,
    max_abs_eta: 2.4,
    isolation: IsolationCut::NonIsolated { min: 0.15 },
});

/// Loose muons (`loose_id` is the POG loose ID flag)
pub fn is_loose_muon(
    pt: &Column<Float>,
    eta: &Column<Float>,
    iso: &Column<Float>,
    loose_id: &Column<bool>,
    year: Year,
) -> Result<Mask> {
    LOOSE.get(year).select(pt, eta, iso, loose_id)
}

/// Tight muons (`tight_id` is the POG tight ID flag)
pub fn is_tight_muon(
    pt: &Column<Float>,
    eta: &Column<Float>,
    iso: &Column<Float>,
    tight_id: &Column<bool>,
    year: Year,
) -> Result<Mask> {
    TIGHT.get(year).select(pt, eta, iso, tight_id)
}

/// Soft muons (`tight_id` is the POG tight ID flag)
pub fn is_soft_muon(
    pt: &Column<Float>,
    eta: &Column<Float>,
    iso: &Column<Float>,
    tight_id: &Column<bool>,
    year: Year,
) -> Result<Mask> {
    SOFT.get(year).select(pt, eta, iso, tight_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    type Predicate =
        fn(&Column<Float>, &Column<Float>, &Column<Float>, &Column<bool>, Year) -> Result<Mask>;

    fn check(predicate: Predicate, pt: Float, eta: Float, iso: Float, id: bool) -> bool {
        let col = |x| Column::flat(vec![x]);
        let masks = Year::ALL
            .map(|year| predicate(&col(pt), &col(eta), &col(iso), &Column::flat(vec![id]), year));
        let passes = masks.map(|mask| mask.unwrap().values()[0]);
        assert!(passes.iter().all(|&p| p == passes[0]), "year-dependent muon cut");
        passes[0]
    }

    #[test]
    fn loose() {
        assert!(check(is_loose_muon, 11.0, 2.3, 0.2, true));
        assert!(!check(is_loose_muon, 10.0, 2.3, 0.2, true));
        assert!(!check(is_loose_muon, 11.0, -2.4, 0.2, true));
        assert!(!check(is_loose_muon, 11.0, 2.3, 0.25, true));
        assert!(!check(is_loose_muon, 11.0, 2.3, 0.2, false));
    }

    #[test]
    fn tight() {
        assert!(check(is_tight_muon, 21.0, 0.0, 0.1, true));
        assert!(!check(is_tight_muon, 20.0, 0.0, 0.1, true));
        assert!(!check(is_tight_muon, 21.0, 0.0, 0.2, true));
        assert!(!check(is_tight_muon, 21.0, 0.0, 0.1, false));
    }

    #[test]
    fn soft_isolation_is_inverted() {
        assert!(check(is_soft_muon, 6.0, 1.0, 0.3, true));
        assert!(!check(is_soft_muon, 6.0, 1.0, 0.1, true));
        assert!(!check(is_soft_muon, 5.0, 1.0, 0.3, true));
        assert!(!check(is_soft_muon, 6.0, 1.0, 0.3, false));
        // Exactly at the boundary, a muon is neither tight nor soft
        assert!(!check(is_soft_muon, 25.0, 1.0, 0.15, true));
        assert!(!check(is_tight_muon, 25.0, 1.0, 0.15, true));
    }

    #[test]
    fn nan_isolation_fails_both_ways() {
        assert!(!check(is_tight_muon, 25.0, 1.0, Float::NAN, true));
        assert!(!check(is_soft_muon, 25.0, 1.0, Float::NAN, true));
    }
}
