//! Named photolysis rates extracted from a TUV report
//!
//! The TUV reaction-rate block is a flat list of (label, rate) pairs whose
//! order depends on how the binary was configured. Downstream chemistry code
//! only needs a handful of those rates, addressed by stable species keys.
//! [`PHOTOLYSIS_INDEX_TABLE`] binds each key to a pair position and is the one
//! place to change if the binary's reaction list changes.
//!
//! # Examples
//!
//! ```rust
//! use rtuv_core::rates::{PhotolysisKey, PhotolysisRates};
//!
//! let pair_rates: Vec<f64> = (0..56).map(|i| i as f64).collect();
//! let rates = PhotolysisRates::from_pair_rates(&pair_rates).unwrap();
//! assert_eq!(rates.get(PhotolysisKey::O1d), 1.0);
//! assert_eq!(rates.get(PhotolysisKey::Afg1), 0.0);
//! ```

use crate::errors::{TuvError, TuvResult};
use crate::parameters::FloatValue;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Stable chemical identifiers for the extracted photolysis rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PhotolysisKey {
    #[serde(rename = "o1d")]
    O1d,
    #[serde(rename = "hcho_r")]
    HchoR,
    #[serde(rename = "hcho_m")]
    HchoM,
    #[serde(rename = "h2o2")]
    H2o2,
    #[serde(rename = "hono")]
    Hono,
    #[serde(rename = "no2")]
    No2,
    #[serde(rename = "no3_r")]
    No3R,
    #[serde(rename = "no3_m")]
    No3M,
    #[serde(rename = "rooh")]
    Rooh,
    #[serde(rename = "hono2")]
    Hono2,
    #[serde(rename = "ho2no2")]
    Ho2no2,
    #[serde(rename = "n2o5")]
    N2o5,
    /// CH3CHO
    #[serde(rename = "acet_ro")]
    AcetRo,
    #[serde(rename = "pan")]
    Pan,
    #[serde(rename = "etcome")]
    Etcome,
    #[serde(rename = "meno3")]
    Meno3,
    #[serde(rename = "homecho")]
    Homecho,
    #[serde(rename = "glyxla")]
    Glyxla,
    #[serde(rename = "glyxlb")]
    Glyxlb,
    #[serde(rename = "mecocho")]
    Mecocho,
    #[serde(rename = "mecovi")]
    Mecovi,
    #[serde(rename = "macr")]
    Macr,
    #[serde(rename = "biace")]
    Biace,
    #[serde(rename = "afg1")]
    Afg1,
}

/// Where the value for a [`PhotolysisKey`] comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateSource {
    /// Rate of the reaction pair at this position in the reaction-rate block
    Reaction(usize),
    /// Fixed value, not read from the report
    Constant(FloatValue),
}

/// Number of output keys
pub const N_PHOTOLYSIS_KEYS: usize = 24;

/// Mapping from output key to its source in the reaction-rate block
///
/// This is part of the contract with the binary's `lmmech = T` configuration.
/// `mecovi` and `macr` both read position 42.
pub static PHOTOLYSIS_INDEX_TABLE: [(PhotolysisKey, RateSource); N_PHOTOLYSIS_KEYS] = [
    (PhotolysisKey::O1d, RateSource::Reaction(1)),
    (PhotolysisKey::HchoR, RateSource::Reaction(17)),
    (PhotolysisKey::HchoM, RateSource::Reaction(18)),
    (PhotolysisKey::H2o2, RateSource::Reaction(4)),
    (PhotolysisKey::Hono, RateSource::Reaction(11)),
    (PhotolysisKey::No2, RateSource::Reaction(5)),
    (PhotolysisKey::No3R, RateSource::Reaction(7)),
    (PhotolysisKey::No3M, RateSource::Reaction(6)),
    (PhotolysisKey::Rooh, RateSource::Reaction(23)),
    (PhotolysisKey::Hono2, RateSource::Reaction(12)),
    (PhotolysisKey::Ho2no2, RateSource::Reaction(13)),
    (PhotolysisKey::N2o5, RateSource::Reaction(10)),
    (PhotolysisKey::AcetRo, RateSource::Reaction(20)),
    (PhotolysisKey::Pan, RateSource::Reaction(37)),
    (PhotolysisKey::Etcome, RateSource::Reaction(47)),
    (PhotolysisKey::Meno3, RateSource::Reaction(25)),
    (PhotolysisKey::Homecho, RateSource::Reaction(45)),
    (PhotolysisKey::Glyxla, RateSource::Reaction(53)),
    (PhotolysisKey::Glyxlb, RateSource::Reaction(52)),
    (PhotolysisKey::Mecocho, RateSource::Reaction(54)),
    (PhotolysisKey::Mecovi, RateSource::Reaction(42)),
    (PhotolysisKey::Macr, RateSource::Reaction(42)),
    (PhotolysisKey::Biace, RateSource::Reaction(55)),
    (PhotolysisKey::Afg1, RateSource::Constant(0.0)),
];

/// Highest reaction pair position referenced by [`PHOTOLYSIS_INDEX_TABLE`]
pub fn max_reaction_index() -> usize {
    PHOTOLYSIS_INDEX_TABLE
        .iter()
        .filter_map(|(_, source)| match source {
            RateSource::Reaction(index) => Some(*index),
            RateSource::Constant(_) => None,
        })
        .max()
        .unwrap_or(0)
}

impl PhotolysisKey {
    /// All keys, in table order
    pub fn all() -> impl Iterator<Item = PhotolysisKey> {
        PHOTOLYSIS_INDEX_TABLE.iter().map(|(key, _)| *key)
    }

    /// Position of this key in [`PHOTOLYSIS_INDEX_TABLE`]
    fn ordinal(self) -> usize {
        self as usize
    }

    pub fn source(self) -> RateSource {
        PHOTOLYSIS_INDEX_TABLE[self.ordinal()].1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PhotolysisKey::O1d => "o1d",
            PhotolysisKey::HchoR => "hcho_r",
            PhotolysisKey::HchoM => "hcho_m",
            PhotolysisKey::H2o2 => "h2o2",
            PhotolysisKey::Hono => "hono",
            PhotolysisKey::No2 => "no2",
            PhotolysisKey::No3R => "no3_r",
            PhotolysisKey::No3M => "no3_m",
            PhotolysisKey::Rooh => "rooh",
            PhotolysisKey::Hono2 => "hono2",
            PhotolysisKey::Ho2no2 => "ho2no2",
            PhotolysisKey::N2o5 => "n2o5",
            PhotolysisKey::AcetRo => "acet_ro",
            PhotolysisKey::Pan => "pan",
            PhotolysisKey::Etcome => "etcome",
            PhotolysisKey::Meno3 => "meno3",
            PhotolysisKey::Homecho => "homecho",
            PhotolysisKey::Glyxla => "glyxla",
            PhotolysisKey::Glyxlb => "glyxlb",
            PhotolysisKey::Mecocho => "mecocho",
            PhotolysisKey::Mecovi => "mecovi",
            PhotolysisKey::Macr => "macr",
            PhotolysisKey::Biace => "biace",
            PhotolysisKey::Afg1 => "afg1",
        }
    }
}

impl fmt::Display for PhotolysisKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhotolysisKey {
    type Err = TuvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PhotolysisKey::all()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| TuvError::UnknownKey(s.to_string()))
    }
}

/// Photolysis rates keyed by [`PhotolysisKey`]
///
/// Serialises as a map from key name to rate, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotolysisRates {
    values: [FloatValue; N_PHOTOLYSIS_KEYS],
}

impl PhotolysisRates {
    /// Select rates from the reaction-rate block by pair position
    ///
    /// `pair_rates[i]` is the rate of the i-th (label, rate) pair. Fails if
    /// the block does not reach [`max_reaction_index`].
    pub fn from_pair_rates(pair_rates: &[FloatValue]) -> TuvResult<Self> {
        let required = max_reaction_index() + 1;
        if pair_rates.len() < required {
            return Err(TuvError::MalformedReport(format!(
                "reaction-rate block has {} pairs, at least {} required",
                pair_rates.len(),
                required
            )));
        }

        let mut values = [0.0; N_PHOTOLYSIS_KEYS];
        for (key, source) in PHOTOLYSIS_INDEX_TABLE.iter() {
            values[key.ordinal()] = match source {
                RateSource::Reaction(index) => pair_rates[*index],
                RateSource::Constant(value) => *value,
            };
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: PhotolysisKey) -> FloatValue {
        self.values[key.ordinal()]
    }

    /// Look up a rate by key name, e.g. `"no2"`
    pub fn get_by_name(&self, name: &str) -> Option<FloatValue> {
        name.parse::<PhotolysisKey>().ok().map(|key| self.get(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (PhotolysisKey, FloatValue)> + '_ {
        PhotolysisKey::all().map(move |key| (key, self.get(key)))
    }

    /// Converts the rates into an equivalent hashmap keyed by name
    pub fn to_hashmap(&self) -> HashMap<String, FloatValue> {
        self.iter()
            .map(|(key, value)| (key.as_str().to_string(), value))
            .collect()
    }
}

impl Serialize for PhotolysisRates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(N_PHOTOLYSIS_KEYS))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key.as_str(), &value)?;
        }
        map.end()
    }
}
