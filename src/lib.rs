//! Physics object IDs: Run 2 candidate selections
//!
//!
//! # Introduction (for the physicist)
//!
//! Reconstructed electrons, muons, taus, photons and jets must pass an
//! identification working point before an analysis can use them. The
//! thresholds of these working points come from the physics object groups
//! (POGs) and vary between the 2016, 2017 and 2018 data-taking campaigns,
//! sometimes in value and sometimes in the way the ID is encoded (ordinal
//! levels in the 2016 NanoAOD, bitmasks of passed working points later on).
//!
//! This crate implements the eleven selections used by the analysis:
//! loose/tight electrons, loose/tight/soft muons, loose taus, loose/tight
//! photons, good AK4 and AK8 jets, and the HEM15/16 jet veto flag.
//!
//!
//! # Introduction (for the computer guy)
//!
//! Each selection is a pure, element-wise function of index-aligned candidate
//! columns, which may be flat or grouped per event (see `array`). The output
//! is a boolean mask of the same shape. Misaligned columns and unknown year
//! tags are errors, never silently accepted.
//!
//! The thresholds are plain data. They are collected into a `SelectorTable`
//! which maps each analysis name (`isLooseElectron`, ...) to its rule, and
//! which can be persisted once by the `physics-ids` binary so that downstream
//! code can load it back and evaluate rules by name.

#![warn(missing_docs)]

pub mod array;
pub mod cuts;
pub mod error;
pub mod inputs;
pub mod numeric;
mod scheduling;
pub mod selectors;
pub mod table;
pub mod year;

pub use crate::{
    array::{Column, Mask},
    error::{Error, Result},
    inputs::{InputKind, InputSpec, Inputs},
    numeric::{Float, IdValue},
    table::{Selector, SelectorTable, DEFAULT_TABLE_PATH},
    year::Year,
};
