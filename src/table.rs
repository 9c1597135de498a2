//! The selector table: every named selection rule, and its persisted form
//!
//! The table maps the selector names used by the analysis code to the
//! selection rules themselves. Rules are plain threshold data, so the table
//! can be written to disk and loaded back by downstream code, which then
//! evaluates a rule by name on named candidate columns.

use crate::{
    array::Mask,
    cuts::PerYear,
    error::{Error, Result},
    inputs::{InputSpec, Inputs},
    selectors::{
        electron::{self, ElectronCuts},
        jet::{self, FatJetCuts, HemRegion, JetCuts},
        muon::{self, MuonCuts},
        photon::{self, PhotonCuts, TightPhotonCuts},
        tau::{self, TauCuts},
        *,
    },
    year::Year,
};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::Path,
};

/// Where the selector table is persisted, relative to the working directory
pub const DEFAULT_TABLE_PATH: &str = "data/ids.json";

/// Version of the persisted table layout
const FORMAT_VERSION: u32 = 1;

/// A selection rule, which can be evaluated on named input columns
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "object", rename_all = "snake_case")]
pub enum Selector {
    /// Electron working point
    Electron {
        /// Thresholds of each year
        cuts: PerYear<ElectronCuts>,
    },

    /// Muon working point
    Muon {
        /// Thresholds of each year
        cuts: PerYear<MuonCuts>,
    },

    /// Tau working point
    Tau {
        /// Thresholds of each year
        cuts: PerYear<TauCuts>,
    },

    /// Loose photon working point
    Photon {
        /// Thresholds of each year
        cuts: PerYear<PhotonCuts>,
    },

    /// High-pT photon working point
    TightPhoton {
        /// Thresholds of each year
        cuts: PerYear<TightPhotonCuts>,
    },

    /// AK4 jet working point
    Jet {
        /// Thresholds of each year
        cuts: PerYear<JetCuts>,
    },

    /// AK8 jet working point
    FatJet {
        /// Thresholds, the same every year
        cuts: FatJetCuts,
    },

    /// Veto region flag
    HemJet {
        /// Affected region
        region: HemRegion,
    },
}

const ELECTRON_INPUTS: [InputSpec; 5] = [
    InputSpec::float("pt"),
    InputSpec::float("eta"),
    InputSpec::float("dxy"),
    InputSpec::float("dz"),
    InputSpec::int("id"),
];
const MUON_INPUTS: [InputSpec; 4] = [
    InputSpec::float("pt"),
    InputSpec::float("eta"),
    InputSpec::float("iso"),
    InputSpec::bool("id"),
];
const TAU_INPUTS: [InputSpec; 7] = [
    InputSpec::float("pt"),
    InputSpec::float("eta"),
    InputSpec::int("decay_mode"),
    InputSpec::bool("decay_mode_dms"),
    InputSpec::int("id_vs_electron"),
    InputSpec::int("id_vs_jet"),
    InputSpec::int("id_vs_muon"),
];
const PHOTON_INPUTS: [InputSpec; 3] = [
    InputSpec::float("pt"),
    InputSpec::float("eta"),
    InputSpec::int("id"),
];
const TIGHT_PHOTON_INPUTS: [InputSpec; 2] = [InputSpec::float("pt"), InputSpec::int("id")];
const JET_INPUTS: [InputSpec; 6] = [
    InputSpec::float("pt"),
    InputSpec::float("eta"),
    InputSpec::int("jet_id"),
    InputSpec::int("pu_id"),
    InputSpec::float("nhf"),
    InputSpec::float("chf"),
];
const FAT_JET_INPUTS: [InputSpec; 3] = [
    InputSpec::float("pt"),
    InputSpec::float("eta"),
    InputSpec::int("jet_id"),
];
const HEM_JET_INPUTS: [InputSpec; 3] = [
    InputSpec::float("pt"),
    InputSpec::float("eta"),
    InputSpec::float("phi"),
];

impl Selector {
    /// Kind of physics object this rule selects
    pub fn object(&self) -> &'static str {
        match self {
            Selector::Electron { .. } => "electron",
            Selector::Muon { .. } => "muon",
            Selector::Tau { .. } => "tau",
            Selector::Photon { .. } | Selector::TightPhoton { .. } => "photon",
            Selector::Jet { .. } | Selector::HemJet { .. } => "jet",
            Selector::FatJet { .. } => "fat jet",
        }
    }

    /// Truth that evaluating this rule requires a year tag
    pub fn is_year_dependent(&self) -> bool {
        !matches!(self, Selector::FatJet { .. } | Selector::HemJet { .. })
    }

    /// Named input columns which this rule reads
    pub fn inputs(&self) -> &'static [InputSpec] {
        match self {
            Selector::Electron { .. } => &ELECTRON_INPUTS,
            Selector::Muon { .. } => &MUON_INPUTS,
            Selector::Tau { .. } => &TAU_INPUTS,
            Selector::Photon { .. } => &PHOTON_INPUTS,
            Selector::TightPhoton { .. } => &TIGHT_PHOTON_INPUTS,
            Selector::Jet { .. } => &JET_INPUTS,
            Selector::FatJet { .. } => &FAT_JET_INPUTS,
            Selector::HemJet { .. } => &HEM_JET_INPUTS,
        }
    }

    /// Evaluate this rule on named input columns
    ///
    /// `year` is required by year-dependent rules and ignored by the others.
    ///
    pub fn evaluate(&self, inputs: &Inputs, year: Option<Year>) -> Result<Mask> {
        let required_year = || year.ok_or_else(|| Error::MissingYear(self.object().to_owned()));
        match self {
            Selector::Electron { cuts } => cuts.get(required_year()?).select(
                inputs.float("pt")?,
                inputs.float("eta")?,
                inputs.float("dxy")?,
                inputs.float("dz")?,
                inputs.int("id")?,
            ),
            Selector::Muon { cuts } => cuts.get(required_year()?).select(
                inputs.float("pt")?,
                inputs.float("eta")?,
                inputs.float("iso")?,
                inputs.bool("id")?,
            ),
            Selector::Tau { cuts } => cuts.get(required_year()?).select(
                inputs.float("pt")?,
                inputs.float("eta")?,
                inputs.int("decay_mode")?,
                inputs.bool("decay_mode_dms")?,
                inputs.int("id_vs_electron")?,
                inputs.int("id_vs_jet")?,
                inputs.int("id_vs_muon")?,
            ),
            Selector::Photon { cuts } => cuts.get(required_year()?).select(
                inputs.float("pt")?,
                inputs.float("eta")?,
                inputs.int("id")?,
            ),
            Selector::TightPhoton { cuts } => {
                cuts.get(required_year()?).select(inputs.float("pt")?, inputs.int("id")?)
            }
            Selector::Jet { cuts } => cuts.get(required_year()?).select(
                inputs.float("pt")?,
                inputs.float("eta")?,
                inputs.int("jet_id")?,
                inputs.int("pu_id")?,
                inputs.float("nhf")?,
                inputs.float("chf")?,
            ),
            Selector::FatJet { cuts } => cuts.select(
                inputs.float("pt")?,
                inputs.float("eta")?,
                inputs.int("jet_id")?,
            ),
            Selector::HemJet { region } => region.select(
                inputs.float("pt")?,
                inputs.float("eta")?,
                inputs.float("phi")?,
            ),
        }
    }
}

/// Named selection rules
#[derive(Clone, Debug, PartialEq)]
pub struct SelectorTable {
    selectors: BTreeMap<String, Selector>,
}

/// On-disk layout of the selector table
#[derive(Deserialize, Serialize)]
struct TableFile {
    format_version: u32,
    created: String,
    selectors: BTreeMap<String, Selector>,
}

impl SelectorTable {
    /// Register every selector under its analysis name
    pub fn standard() -> Self {
        let entries = [
            (IS_LOOSE_ELECTRON, Selector::Electron { cuts: electron::LOOSE }),
            (IS_TIGHT_ELECTRON, Selector::Electron { cuts: electron::TIGHT }),
            (IS_LOOSE_MUON, Selector::Muon { cuts: muon::LOOSE }),
            (IS_TIGHT_MUON, Selector::Muon { cuts: muon::TIGHT }),
            (IS_SOFT_MUON, Selector::Muon { cuts: muon::SOFT }),
            (IS_LOOSE_TAU, Selector::Tau { cuts: tau::LOOSE }),
            (IS_LOOSE_PHOTON, Selector::Photon { cuts: photon::LOOSE }),
            (IS_TIGHT_PHOTON, Selector::TightPhoton { cuts: photon::TIGHT }),
            (IS_GOOD_JET, Selector::Jet { cuts: jet::GOOD }),
            (IS_GOOD_FAT_JET, Selector::FatJet { cuts: jet::GOOD_FAT }),
            (IS_HEM_JET, Selector::HemJet { region: jet::HEM }),
        ];
        let selectors = entries
            .into_iter()
            .map(|(name, selector)| (name.to_owned(), selector))
            .collect::<BTreeMap<_, _>>();
        debug!("Registered {} selectors", selectors.len());
        Self { selectors }
    }

    /// Build the standard table and persist it, replacing any previous file
    ///
    /// This is meant to be called once by an offline entry point.
    ///
    pub fn build_and_persist(path: impl AsRef<Path>) -> Result<Self> {
        let table = Self::standard();
        table.save(path)?;
        Ok(table)
    }

    /// Number of selectors
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Truth that the table holds no selector
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Selector names, in lexicographic order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.selectors.keys().map(String::as_str)
    }

    /// Iterate over named selectors, in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Selector)> + '_ {
        self.selectors.iter().map(|(name, sel)| (name.as_str(), sel))
    }

    /// Look up a selector by name
    pub fn get(&self, name: &str) -> Result<&Selector> {
        self.selectors
            .get(name)
            .ok_or_else(|| Error::UnknownSelector(name.to_owned()))
    }

    /// Evaluate a selector by name
    ///
    /// The year tag is parsed (and rejected if unknown) even for selectors
    /// which do not depend on it.
    ///
    pub fn evaluate(&self, name: &str, inputs: &Inputs, year: Option<&str>) -> Result<Mask> {
        let selector = self.get(name)?;
        let year = year.map(str::parse::<Year>).transpose()?;
        selector.evaluate(inputs, year).map_err(|e| match e {
            Error::MissingYear(_) => Error::MissingYear(name.to_owned()),
            other => other,
        })
    }

    /// Write this table to a file, replacing any previous contents
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(Error::io(dir))?;
        }
        let contents = TableFile {
            format_version: FORMAT_VERSION,
            created: OffsetDateTime::now_utc().format(&Rfc3339)?,
            selectors: self.selectors.clone(),
        };
        let file = File::create(path).map_err(Error::io(path))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &contents)?;
        writeln!(writer).map_err(Error::io(path))?;
        writer.flush().map_err(Error::io(path))?;
        info!("Wrote {} selectors to {}", self.len(), path.display());
        Ok(())
    }

    /// Read back a table written by `save`
    ///
    /// The table must provide exactly the cataloged selector names.
    ///
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(Error::io(path))?;
        let contents: TableFile = serde_json::from_reader(BufReader::new(file))?;
        if contents.format_version != FORMAT_VERSION {
            return Err(Error::FormatVersion(contents.format_version));
        }
        if let Some(missing) = NAMES
            .into_iter()
            .find(|name| !contents.selectors.contains_key(*name))
        {
            return Err(Error::MissingSelector(missing));
        }
        if let Some(unknown) = contents
            .selectors
            .keys()
            .find(|name| !NAMES.contains(&name.as_str()))
        {
            return Err(Error::UnknownSelector(unknown.clone()));
        }
        debug!(
            "Loaded {} selectors from {} (created {})",
            contents.selectors.len(),
            path.display(),
            contents.created
        );
        Ok(Self {
            selectors: contents.selectors,
        })
    }
}
