use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::LookupError;

/// A health measure that may be queried.
///
/// This is the fixed allow-list of measure names. Matching against it is
/// exact and case-sensitive; the database comparison is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    ViolentCrimeRate,
    Unemployment,
    ChildrenInPoverty,
    DiabeticScreening,
    MammographyScreening,
    PreventableHospitalStays,
    Uninsured,
    SexuallyTransmittedInfections,
    PhysicalInactivity,
    AdultObesity,
    PrematureDeath,
    DailyFineParticulateMatter,
}

impl Measure {
    /// Every allowed measure.
    pub const ALL: [Measure; 12] = [
        Measure::ViolentCrimeRate,
        Measure::Unemployment,
        Measure::ChildrenInPoverty,
        Measure::DiabeticScreening,
        Measure::MammographyScreening,
        Measure::PreventableHospitalStays,
        Measure::Uninsured,
        Measure::SexuallyTransmittedInfections,
        Measure::PhysicalInactivity,
        Measure::AdultObesity,
        Measure::PrematureDeath,
        Measure::DailyFineParticulateMatter,
    ];

    /// The measure name as stored in `county_health_rankings.Measure_name`.
    pub fn as_str(self) -> &'static str {
        match self {
            Measure::ViolentCrimeRate => "Violent crime rate",
            Measure::Unemployment => "Unemployment",
            Measure::ChildrenInPoverty => "Children in poverty",
            Measure::DiabeticScreening => "Diabetic screening",
            Measure::MammographyScreening => "Mammography screening",
            Measure::PreventableHospitalStays => "Preventable hospital stays",
            Measure::Uninsured => "Uninsured",
            Measure::SexuallyTransmittedInfections => "Sexually transmitted infections",
            Measure::PhysicalInactivity => "Physical inactivity",
            Measure::AdultObesity => "Adult obesity",
            Measure::PrematureDeath => "Premature Death",
            Measure::DailyFineParticulateMatter => "Daily fine particulate matter",
        }
    }

    /// Look up a measure by its exact name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }

    /// Strip everything except ASCII letters and whitespace, trim, and look
    /// the result up in the allow-list.
    ///
    /// Digits and punctuation are removed rather than rejected, so
    /// `"12Unemployment"` is accepted as [`Measure::Unemployment`].
    pub fn normalize(raw: &str) -> Result<Self, LookupError> {
        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
            .collect();
        Self::from_name(cleaned.trim()).ok_or(LookupError::InvalidMeasure)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
