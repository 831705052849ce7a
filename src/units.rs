//! Length units accepted by the flight path importer. Imported points are always converted to
//! centimetres, which is the internal length unit of most CAD hosts.

use crate::ProfileError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[serde(rename = "mm")]
    Millimeter,

    #[default]
    #[serde(rename = "cm")]
    Centimeter,

    #[serde(rename = "m")]
    Meter,

    #[serde(rename = "in")]
    Inch,

    #[serde(rename = "ft")]
    Foot,
}

impl LengthUnit {
    /// Multiply a length in this unit by this factor to get centimetres
    pub fn to_cm(&self) -> f64 {
        match self {
            LengthUnit::Millimeter => 0.1,
            LengthUnit::Centimeter => 1.0,
            LengthUnit::Meter => 100.0,
            LengthUnit::Inch => 2.54,
            LengthUnit::Foot => 30.48,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::Millimeter => "mm",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Meter => "m",
            LengthUnit::Inch => "in",
            LengthUnit::Foot => "ft",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for LengthUnit {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mm" => Ok(LengthUnit::Millimeter),
            "cm" => Ok(LengthUnit::Centimeter),
            "m" => Ok(LengthUnit::Meter),
            "in" => Ok(LengthUnit::Inch),
            "ft" => Ok(LengthUnit::Foot),
            other => Err(ProfileError::InvalidParameter(format!(
                "Unknown length unit '{other}', expected one of mm, cm, m, in, ft."
            ))),
        }
    }
}
