//! Physics object selection predicates
//!
//! Each predicate takes index-aligned candidate columns (and, where the
//! thresholds depend on it, the data-taking year) and returns a mask of the
//! same shape, true for the candidates which pass the working point. Columns
//! whose shapes differ are rejected before any comparison is made.
//!
//! Thresholds live in per-object constant tables, and each object type has a
//! single evaluation routine shared by all of its working points.

pub mod electron;
pub mod jet;
pub mod muon;
pub mod photon;
pub mod tau;

pub use self::{
    electron::{is_loose_electron, is_tight_electron},
    jet::{is_good_fat_jet, is_good_jet, is_hem_jet},
    muon::{is_loose_muon, is_soft_muon, is_tight_muon},
    photon::{is_loose_photon, is_tight_photon},
    tau::is_loose_tau,
};

/// Name of the loose electron selector
pub const IS_LOOSE_ELECTRON: &str = "isLooseElectron";
/// Name of the tight electron selector
pub const IS_TIGHT_ELECTRON: &str = "isTightElectron";
/// Name of the loose muon selector
pub const IS_LOOSE_MUON: &str = "isLooseMuon";
/// Name of the tight muon selector
pub const IS_TIGHT_MUON: &str = "isTightMuon";
/// Name of the soft muon selector
pub const IS_SOFT_MUON: &str = "isSoftMuon";
/// Name of the loose tau selector
pub const IS_LOOSE_TAU: &str = "isLooseTau";
/// Name of the loose photon selector
pub const IS_LOOSE_PHOTON: &str = "isLoosePhoton";
/// Name of the tight photon selector
pub const IS_TIGHT_PHOTON: &str = "isTightPhoton";
/// Name of the AK4 jet selector
pub const IS_GOOD_JET: &str = "isGoodJet";
/// Name of the AK8 jet selector
pub const IS_GOOD_FAT_JET: &str = "isGoodFatJet";
/// Name of the HEM veto jet flag
pub const IS_HEM_JET: &str = "isHEMJet";

/// Every selector name, in the order in which they are registered
pub const NAMES: [&str; 11] = [
    IS_LOOSE_ELECTRON,
    IS_TIGHT_ELECTRON,
    IS_LOOSE_MUON,
    IS_TIGHT_MUON,
    IS_SOFT_MUON,
    IS_LOOSE_TAU,
    IS_LOOSE_PHOTON,
    IS_TIGHT_PHOTON,
    IS_GOOD_JET,
    IS_GOOD_FAT_JET,
    IS_HEM_JET,
];
