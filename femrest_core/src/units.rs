//! # Unit Selection
//!
//! The external application interprets every number in the unit pair chosen
//! once per session with [`Session::set_units`](crate::Session::set_units).
//! The client never converts values; these enums only name the units the
//! application understands.
//!
//! ## Example
//!
//! ```rust
//! use femrest_core::units::{ForceUnit, LengthUnit};
//!
//! let length: LengthUnit = "m".parse().unwrap();
//! assert_eq!(length, LengthUnit::Meter);
//! assert_eq!(ForceUnit::Kilonewton.symbol(), "kN");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ClientError;

// ============================================================================
// Length Units
// ============================================================================

/// Length unit understood by the external application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    #[serde(rename = "mm")]
    Millimeter,
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
    pub const ALL: [LengthUnit; 5] = [
        LengthUnit::Millimeter,
        LengthUnit::Centimeter,
        LengthUnit::Meter,
        LengthUnit::Inch,
        LengthUnit::Foot,
    ];

    /// Symbol sent on the wire
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
        f.write_str(self.symbol())
    }
}

impl FromStr for LengthUnit {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LengthUnit::ALL
            .iter()
            .copied()
            .find(|unit| unit.symbol().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClientError::config("length_unit", format!("unknown length unit '{}'", s)))
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force unit understood by the external application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForceUnit {
    #[serde(rename = "N")]
    Newton,
    #[serde(rename = "kN")]
    Kilonewton,
    #[serde(rename = "MN")]
    Meganewton,
    /// Kilogram-force
    #[serde(rename = "kgf")]
    KilogramForce,
    /// Metric tonne-force
    #[serde(rename = "tf")]
    TonneForce,
    #[serde(rename = "lb")]
    Pound,
    #[serde(rename = "kip")]
    Kip,
}

impl ForceUnit {
    pub const ALL: [ForceUnit; 7] = [
        ForceUnit::Newton,
        ForceUnit::Kilonewton,
        ForceUnit::Meganewton,
        ForceUnit::KilogramForce,
        ForceUnit::TonneForce,
        ForceUnit::Pound,
        ForceUnit::Kip,
    ];

    /// Symbol sent on the wire
    pub fn symbol(&self) -> &'static str {
        match self {
            ForceUnit::Newton => "N",
            ForceUnit::Kilonewton => "kN",
            ForceUnit::Meganewton => "MN",
            ForceUnit::KilogramForce => "kgf",
            ForceUnit::TonneForce => "tf",
            ForceUnit::Pound => "lb",
            ForceUnit::Kip => "kip",
        }
    }
}

impl fmt::Display for ForceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for ForceUnit {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // "MN" and "mN" differ only by case, so match exactly first
        if let Some(unit) = ForceUnit::ALL.iter().copied().find(|unit| unit.symbol() == s) {
            return Ok(unit);
        }
        ForceUnit::ALL
            .iter()
            .copied()
            .find(|unit| unit.symbol().eq_ignore_ascii_case(s) && *unit != ForceUnit::Meganewton)
            .ok_or_else(|| ClientError::config("force_unit", format!("unknown force unit '{}'", s)))
    }
}

/// The unit pair last selected on a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSystem {
    pub length: LengthUnit,
    pub force: ForceUnit,
}

impl UnitSystem {
    pub fn new(length: LengthUnit, force: ForceUnit) -> Self {
        UnitSystem { length, force }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.length, self.force)
    }
}
