//! Data-taking campaigns which the selection thresholds depend on

use crate::error::Error;

use serde::{Deserialize, Serialize};

use std::{fmt, str::FromStr};

/// Data-taking year
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub enum Year {
    /// Run 2, 2016 campaign
    #[serde(rename = "2016")]
    Y2016,
    /// Run 2, 2017 campaign
    #[serde(rename = "2017")]
    Y2017,
    /// Run 2, 2018 campaign
    #[serde(rename = "2018")]
    Y2018,
}
//
impl Year {
    /// Every supported year, in chronological order
    pub const ALL: [Year; 3] = [Year::Y2016, Year::Y2017, Year::Y2018];

    /// Year tag as used by the analysis code
    pub fn tag(self) -> &'static str {
        match self {
            Year::Y2016 => "2016",
            Year::Y2017 => "2017",
            Year::Y2018 => "2018",
        }
    }
}

impl FromStr for Year {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self, Error> {
        Year::ALL
            .into_iter()
            .find(|year| year.tag() == tag)
            .ok_or_else(|| Error::InvalidYearTag(tag.to_owned()))
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_tags() {
        for year in Year::ALL {
            assert_eq!(year.tag().parse::<Year>().unwrap(), year);
            assert_eq!(year.to_string(), year.tag());
        }
    }

    #[test]
    fn reject_unknown_tags() {
        for tag in ["2015", "", "17", "2018 ", "UL2017"] {
            match tag.parse::<Year>() {
                Err(Error::InvalidYearTag(bad)) => assert_eq!(bad, tag),
                other => panic!("{tag:?} parsed as {other:?}"),
            }
        }
    }

    #[test]
    fn serialized_as_tag() {
        assert_eq!(serde_json::to_string(&Year::Y2017).unwrap(), "\"2017\"");
        let year: Year = serde_json::from_str("\"2016\"").unwrap();
        assert_eq!(year, Year::Y2016);
    }
}
