use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Coordinates;

/// Countries with a fitness center dataset. City names are not unique across
/// countries, so every query is scoped to exactly one of them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum Country {
    #[serde(rename = "DE")]
    Germany,
    #[serde(rename = "FR")]
    France,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown country: {0}")]
pub struct UnknownCountry(pub String);

impl Country {
    pub const ALL: [Country; 2] = [Country::Germany, Country::France];

    /// ISO 3166-1 alpha-2 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Germany => "DE",
            Self::France => "FR",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Germany => "Deutschland",
            Self::France => "Frankreich",
        }
    }

    /// Geographic center used before any city is selected.
    pub fn default_center(&self) -> Coordinates {
        match self {
            Self::Germany => Coordinates {
                latitude: 51.1657,
                longitude: 10.4515,
            },
            Self::France => Coordinates {
                latitude: 46.6034,
                longitude: 1.8883,
            },
        }
    }
}

impl Default for Country {
    fn default() -> Self {
        Self::Germany
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Country {
    type Err = UnknownCountry;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "de" | "deu" | "germany" | "deutschland" => Ok(Self::Germany),
            "fr" | "fra" | "france" | "frankreich" => Ok(Self::France),
            _ => Err(UnknownCountry(s.to_owned())),
        }
    }
}
