//! Cut-based electron identification
//!
//! Uses the Fall17 V2 cut-based ID for all Run 2 campaigns, whose NanoAOD
//! encoding is an ordinal level (0: fail, 1: veto, 2: loose, 3: medium,
//! 4: tight). Impact parameter cuts differ between barrel and endcap.

use crate::{
    array::{aligned_shape, Column, Mask},
    cuts::{AbsEtaRange, IdRequirement, PerYear, BARREL, ENDCAP},
    error::Result,
    numeric::{functions::*, Float, IdValue},
    scheduling,
    year::Year,
};

use serde::{Deserialize, Serialize};

/// Thresholds applying within one ECAL region
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct ElectronRegion {
    /// Acceptance of the region
    pub eta: AbsEtaRange,

    /// Exclusive minimum transverse momentum (GeV)
    pub min_pt: Float,

    /// Exclusive maximum transverse impact parameter (cm)
    pub max_abs_dxy: Float,

    /// Exclusive maximum longitudinal impact parameter (cm)
    pub max_abs_dz: Float,
}
//
impl ElectronRegion {
    /// Check the kinematics of one electron against this region
    fn accepts(&self, pt: Float, eta: Float, dxy: Float, dz: Float) -> bool {
        (pt > self.min_pt)
            & self.eta.contains(eta)
            & (abs(dxy) < self.max_abs_dxy)
            & (abs(dz) < self.max_abs_dz)
    }
}

/// Electron working point
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct ElectronCuts {
    /// Barrel thresholds
    pub barrel: ElectronRegion,

    /// Endcap thresholds
    pub endcap: ElectronRegion,

    /// Requirement on the cut-based ID
    pub id: IdRequirement,
}
//
impl ElectronCuts {
    /// Decide whether one electron passes this working point
    pub fn accepts(&self, pt: Float, eta: Float, dxy: Float, dz: Float, id: IdValue) -> bool {
        (self.barrel.accepts(pt, eta, dxy, dz) | self.endcap.accepts(pt, eta, dxy, dz))
            & self.id.accepts(id)
    }

    /// Evaluate this working point on index-aligned electron columns
    pub fn select(
        &self,
        pt: &Column<Float>,
        eta: &Column<Float>,
        dxy: &Column<Float>,
        dz: &Column<Float>,
        id: &Column<IdValue>,
    ) -> Result<Mask> {
        let shape = aligned_shape(&[
            ("pt", pt.shape()),
            ("eta", eta.shape()),
            ("dxy", dxy.shape()),
            ("dz", dz.shape()),
            ("id", id.shape()),
        ])?;
        let (pt, eta, dxy, dz, id) = (pt.values(), eta.values(), dxy.values(), dz.values(), id.values());
        Ok(scheduling::evaluate(shape, |i| {
            self.accepts(pt[i], eta[i], dxy[i], dz[i], id[i])
        }))
    }
}

/// Barrel region with a given pT threshold
const fn barrel(min_pt: Float) -> ElectronRegion {
    ElectronRegion {
        eta: BARREL,
        min_pt,
        max_abs_dxy: 0.05,
        max_abs_dz: 0.1,
    }
}

/// Endcap region with a given pT threshold
const fn endcap(min_pt: Float) -> ElectronRegion {
    ElectronRegion {
        eta: ENDCAP,
        min_pt,
        max_abs_dxy: 0.1,
        max_abs_dz: 0.2,
    }
}

/// Loose electron working point
pub const LOOSE: PerYear<ElectronCuts> = PerYear::uniform(ElectronCuts {
    barrel: barrel(10.0),
    endcap: endcap(10.0),
    id: IdRequirement::Ordinal { min: 2 },
});

/// Tight electron working point
///
/// The 2017/18 endcap threshold is raised to match the monojet analysis, which
/// uses dedicated ID scale factors. 2016 follows HLT_Ele27_WPTight_Gsf.
///
pub const TIGHT: PerYear<ElectronCuts> = PerYear {
    y2016: tight(29.0),
    y2017: tight(40.0),
    y2018: tight(40.0),
};

/// Tight working point with a given endcap pT threshold
const fn tight(endcap_pt: Float) -> ElectronCuts {
    ElectronCuts {
        barrel: barrel(40.0),
        endcap: endcap(endcap_pt),
        id: IdRequirement::Exact { level: 4 },
    }
}

/// Loose electrons
pub fn is_loose_electron(
    pt: &Column<Float>,
    eta: &Column<Float>,
    dxy: &Column<Float>,
    dz: &Column<Float>,
    id: &Column<IdValue>,
    year: Year,
) -> Result<Mask> {
    LOOSE.get(year).select(pt, eta, dxy, dz, id)
}

/// Tight electrons
pub fn is_tight_electron(
    pt: &Column<Float>,
    eta: &Column<Float>,
    dxy: &Column<Float>,
    dz: &Column<Float>,
    id: &Column<IdValue>,
    year: Year,
) -> Result<Mask> {
    TIGHT.get(year).select(pt, eta, dxy, dz, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn flat<T: Clone>(value: T) -> Column<T> {
        Column::flat(vec![value])
    }

    fn loose(pt: Float, eta: Float, dxy: Float, dz: Float, id: IdValue, year: Year) -> bool {
        let mask =
            is_loose_electron(&flat(pt), &flat(eta), &flat(dxy), &flat(dz), &flat(id), year)
                .unwrap();
        mask.values()[0]
    }

    fn tight(pt: Float, eta: Float, id: IdValue, year: Year) -> bool {
        let mask =
            is_tight_electron(&flat(pt), &flat(eta), &flat(0.0), &flat(0.0), &flat(id), year)
                .unwrap();
        mask.values()[0]
    }

    #[test]
    fn loose_pt_threshold_is_strict() {
        assert!(!loose(10.0, 0.5, 0.0, 0.0, 2, Year::Y2017));
        assert!(loose(10.0001, 0.5, 0.0, 0.0, 2, Year::Y2017));
    }

    #[test]
    fn loose_regions() {
        for year in Year::ALL {
            // Barrel impact parameter cuts are tighter than endcap ones
            assert!(!loose(20.0, 1.0, 0.07, 0.0, 2, year));
            assert!(loose(20.0, 2.0, 0.07, 0.15, 2, year));
            assert!(!loose(20.0, -2.0, 0.07, 0.25, 2, year));
            // Transition gap and beyond the tracker
            assert!(!loose(20.0, 1.5, 0.0, 0.0, 2, year));
            assert!(!loose(20.0, 2.5, 0.0, 0.0, 2, year));
            // ID level
            assert!(!loose(20.0, 0.0, 0.0, 0.0, 1, year));
            assert!(loose(20.0, 0.0, 0.0, 0.0, 4, year));
        }
    }

    #[test]
    fn tight_endcap_threshold_depends_on_year() {
        assert!(tight(35.0, 2.0, 4, Year::Y2016));
        assert!(!tight(35.0, 2.0, 4, Year::Y2017));
        assert!(!tight(35.0, 2.0, 4, Year::Y2018));
        assert!(tight(41.0, 2.0, 4, Year::Y2018));
        // Barrel is the same every year
        for year in Year::ALL {
            assert!(!tight(35.0, 0.5, 4, year));
            assert!(tight(41.0, 0.5, 4, year));
            // Tight requires exactly the tight level
            assert!(!tight(41.0, 0.5, 3, year));
        }
    }

    #[test]
    fn nan_never_passes() {
        assert!(!loose(Float::NAN, 0.5, 0.0, 0.0, 2, Year::Y2016));
        assert!(!loose(20.0, Float::NAN, 0.0, 0.0, 2, Year::Y2016));
        assert!(!loose(20.0, 0.5, Float::NAN, 0.0, 2, Year::Y2016));
    }

    #[test]
    fn jagged_columns() {
        let pt = Column::jagged(vec![vec![25.0, 5.0], vec![], vec![50.0]]);
        let eta = Column::jagged(vec![vec![0.3, 0.3], vec![], vec![-1.8]]);
        let zeros = Column::jagged(vec![vec![0.0, 0.0], vec![], vec![0.0]]);
        let id = Column::jagged(vec![vec![2, 4], vec![], vec![3]]);
        let mask = is_loose_electron(&pt, &eta, &zeros, &zeros, &id, Year::Y2018).unwrap();
        assert_eq!(mask.offsets(), pt.offsets());
        assert_eq!(mask.values(), &[true, false, true]);
    }

    #[test]
    fn misaligned_columns() {
        let pt = Column::flat(vec![20.0, 30.0]);
        let eta = Column::flat(vec![0.0]);
        let other = Column::flat(vec![0.0, 0.0]);
        let id = Column::flat(vec![4, 4]);
        match is_tight_electron(&pt, &eta, &other, &other, &id, Year::Y2016) {
            Err(Error::ShapeMismatch { argument, .. }) => assert_eq!(argument, "eta"),
            other => panic!("unexpected result {other:?}"),
        }
    }
}
