//! Enumerated clinical codes
//!
//! Departments accepted for live admissions, case types and severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Departments a live admission may be filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Department {
    Emergency,
    Cardiology,
    Orthopaedics,
    InternalMedicine,
    GeneralSurgery,
    Nephrology,
    Gastroenterology,
    Pulmonology,
    FamilyMedicine,
    ObstetricsGynecology,
}

impl Department {
    /// Every department, in intake-form order
    pub const ALL: [Department; 10] = [
        Department::Emergency,
        Department::Cardiology,
        Department::Orthopaedics,
        Department::InternalMedicine,
        Department::GeneralSurgery,
        Department::Nephrology,
        Department::Gastroenterology,
        Department::Pulmonology,
        Department::FamilyMedicine,
        Department::ObstetricsGynecology,
    ];

    /// Display label, also the value stored by the admission store
    pub fn label(&self) -> &'static str {
        match self {
            Self::Emergency => "Emergency",
            Self::Cardiology => "Cardiology",
            Self::Orthopaedics => "Orthopaedics",
            Self::InternalMedicine => "Internal Medicine",
            Self::GeneralSurgery => "General Surgery",
            Self::Nephrology => "Nephrology",
            Self::Gastroenterology => "Gastroenterology",
            Self::Pulmonology => "Pulmonology",
            Self::FamilyMedicine => "Family Medicine",
            Self::ObstetricsGynecology => "Obstetrics & Gynecology",
        }
    }

    /// Comma-separated list of all labels, for error messages
    pub fn allowed_labels() -> String {
        Self::ALL
            .iter()
            .map(Department::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.label() == s)
            .ok_or_else(|| format!("Unknown department: {s}"))
    }
}

impl TryFrom<String> for Department {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Department> for String {
    fn from(d: Department) -> Self {
        d.label().to_string()
    }
}

/// Case type of an admission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseType {
    /// Inpatient
    #[serde(rename = "IP")]
    Inpatient,
    /// Outpatient
    #[serde(rename = "OP")]
    Outpatient,
    /// Day case
    #[serde(rename = "DC")]
    DayCase,
}

impl CaseType {
    pub const ALL: [CaseType; 3] = [CaseType::Inpatient, CaseType::Outpatient, CaseType::DayCase];

    /// Two-letter code used in the dataset and the store
    pub fn code(&self) -> &'static str {
        match self {
            Self::Inpatient => "IP",
            Self::Outpatient => "OP",
            Self::DayCase => "DC",
        }
    }

    /// Human label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Inpatient => "Inpatient",
            Self::Outpatient => "Outpatient",
            Self::DayCase => "Day Case",
        }
    }

    /// Inpatient and day-case stays count toward ALOS
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Inpatient | Self::DayCase)
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IP" => Ok(Self::Inpatient),
            "OP" => Ok(Self::Outpatient),
            "DC" => Ok(Self::DayCase),
            other => Err(format!("Unknown case type: {other}")),
        }
    }
}

/// Severity level, always 1..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Severity(u8);

impl Severity {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 3;

    /// Returns `None` outside 1..=3
    pub fn new(level: i64) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&level)
            .then_some(Self(level as u8))
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    /// `Level N`
    pub fn label(&self) -> String {
        format!("Level {}", self.0)
    }

    /// Level 3 cases need elevated monitoring
    pub fn is_high(&self) -> bool {
        self.0 >= 3
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Severity {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("Severity must be between 1 and 3, got {value}"))
    }
}

impl From<Severity> for u8 {
    fn from(s: Severity) -> Self {
        s.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_round_trip_labels() {
        for dept in Department::ALL {
            assert_eq!(dept.label().parse::<Department>().unwrap(), dept);
        }
    }

    #[test]
    fn test_department_rejects_unknown() {
        assert!("Dermatology".parse::<Department>().is_err());
        assert!("cardiology".parse::<Department>().is_err());
    }

    #[test]
    fn test_department_serde_uses_label() {
        let json = serde_json::to_string(&Department::ObstetricsGynecology).unwrap();
        assert_eq!(json, "\"Obstetrics & Gynecology\"");
        let dept: Department = serde_json::from_str("\"Internal Medicine\"").unwrap();
        assert_eq!(dept, Department::InternalMedicine);
    }

    #[test]
    fn test_case_type_codes() {
        assert_eq!("IP".parse::<CaseType>().unwrap(), CaseType::Inpatient);
        assert_eq!("DC".parse::<CaseType>().unwrap(), CaseType::DayCase);
        assert!("ip".parse::<CaseType>().is_err());
        assert!(CaseType::Inpatient.is_admitted());
        assert!(CaseType::DayCase.is_admitted());
        assert!(!CaseType::Outpatient.is_admitted());
    }

    #[test]
    fn test_severity_bounds() {
        assert!(Severity::new(0).is_none());
        assert!(Severity::new(4).is_none());
        assert_eq!(Severity::new(2).unwrap().label(), "Level 2");
        assert!(Severity::new(3).unwrap().is_high());
    }

    #[test]
    fn test_severity_serde() {
        assert_eq!(serde_json::to_string(&Severity::new(1).unwrap()).unwrap(), "1");
        assert!(serde_json::from_str::<Severity>("5").is_err());
    }
}
