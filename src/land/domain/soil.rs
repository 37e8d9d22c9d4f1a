//! Soil classification.

use super::ParseSoilTypeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Soil type of a land.
///
/// The common classes are enumerated; anything else is kept verbatim as a
/// custom soil description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SoilType {
    /// Heavy soil that holds water well.
    Clay,
    /// Balanced soil suited to most crops.
    Loam,
    /// Light, well-draining soil.
    Sandy,
    /// Fine, fertile soil with good moisture retention.
    Silt,
    /// Dark, organic-rich soil.
    Peaty,
    /// Soil with high salt content.
    Saline,
    /// Alkaline soil with high calcium content.
    Chalky,
    /// Free-text soil description supplied by the grower.
    Custom(String),
}

impl SoilType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Clay => "clay",
            Self::Loam => "loam",
            Self::Sandy => "sandy",
            Self::Silt => "silt",
            Self::Peaty => "peaty",
            Self::Saline => "saline",
            Self::Chalky => "chalky",
            Self::Custom(description) => description,
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SoilType {
    type Error = ParseSoilTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        let normalized = trimmed.to_ascii_lowercase();
        match normalized.as_str() {
            "clay" => Ok(Self::Clay),
            "loam" | "loamy" => Ok(Self::Loam),
            "sandy" | "sand" => Ok(Self::Sandy),
            "silt" | "silty" => Ok(Self::Silt),
            "peaty" | "peat" => Ok(Self::Peaty),
            "saline" => Ok(Self::Saline),
            "chalky" | "chalk" => Ok(Self::Chalky),
            "" | "other" => Err(ParseSoilTypeError(value.to_owned())),
            _ => Ok(Self::Custom(trimmed.to_owned())),
        }
    }
}

impl TryFrom<String> for SoilType {
    type Error = ParseSoilTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<SoilType> for String {
    fn from(value: SoilType) -> Self {
        value.as_str().to_owned()
    }
}
