//! Historical dataset decoder
//!
//! Turns the delimiter-separated export into [`HistoricalRecord`]s. Decoding
//! is best effort: malformed rows are skipped and counted, never reported as
//! errors.

use crate::domain::{CaseType, HistoricalRecord, MonthKey, Severity};

/// Column delimiter
pub const DELIMITER: char = ',';

/// Minimum number of columns in a data row; extra columns are ignored
pub const MIN_COLUMNS: usize = 21;

/// Row counters from a decode pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Rows turned into records
    pub accepted: usize,
    /// Rows with fewer than [`MIN_COLUMNS`] columns
    pub short_rows: usize,
    /// Rows whose case type or severity is not a known code
    pub invalid_codes: usize,
}

impl DecodeStats {
    pub fn skipped(&self) -> usize {
        self.short_rows + self.invalid_codes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowDefect {
    TooFewColumns,
    UnknownCaseType,
    InvalidSeverity,
}

/// Decodes the dataset text, skipping the header line
///
/// Never fails. Row order is preserved, including rows that share a case
/// number.
///
/// # Examples
///
/// ```
/// use wardlens::core::decode::decode;
///
/// let text = "header\n\
///     2024-01-01,C1,1980,UAE,F,L1,Dr. A,Consultant,Active,1.2,Cardiology,Payer,Plan,Insurance,IP,4,2,Med,10:00,Yes,1500\n\
///     broken,row";
/// let records = decode(text);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].specialty, "Cardiology");
/// ```
pub fn decode(text: &str) -> Vec<HistoricalRecord> {
    decode_with_stats(text).0
}

/// Same as [`decode`], also returning how many rows were kept and skipped
pub fn decode_with_stats(text: &str) -> (Vec<HistoricalRecord>, DecodeStats) {
    let mut stats = DecodeStats::default();
    let mut records = Vec::new();

    for line in text.trim().lines().skip(1) {
        match decode_row(line) {
            Ok(record) => {
                stats.accepted += 1;
                records.push(record);
            }
            Err(RowDefect::TooFewColumns) => stats.short_rows += 1,
            Err(defect) => {
                tracing::trace!(?defect, row = %line, "Skipping row with unknown code");
                stats.invalid_codes += 1;
            }
        }
    }

    (records, stats)
}

fn decode_row(line: &str) -> Result<HistoricalRecord, RowDefect> {
    let cols: Vec<&str> = line.split(DELIMITER).collect();
    if cols.len() < MIN_COLUMNS {
        return Err(RowDefect::TooFewColumns);
    }

    let case_type = cols[14]
        .trim()
        .parse::<CaseType>()
        .map_err(|_| RowDefect::UnknownCaseType)?;
    let severity = parse_severity(cols[16]).ok_or(RowDefect::InvalidSeverity)?;

    Ok(HistoricalRecord {
        month: MonthKey::new(cols[0]),
        case_no: cols[1].to_string(),
        dob: number(cols[2]),
        nationality: cols[3].to_string(),
        gender: cols[4].to_string(),
        doctor_license: cols[5].to_string(),
        doctor_name: cols[6].to_string(),
        doctor_type: cols[7].to_string(),
        doctor_status: cols[8].to_string(),
        cmi_value: non_negative(cols[9]),
        specialty: cols[10].to_string(),
        insurance_payer: cols[11].to_string(),
        insurance_plan: cols[12].to_string(),
        payer_mix: cols[13].to_string(),
        case_type,
        los: non_negative(cols[15]),
        severity,
        surgical_mix: cols[17].to_string(),
        discharge_time: cols[18].to_string(),
        discharge_before_noon: cols[19].to_string(),
        revenue: non_negative(cols[20]),
    })
}

/// Parses a numeric cell, defaulting to 0 on anything unparseable
fn number(field: &str) -> f64 {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn non_negative(field: &str) -> f64 {
    number(field).max(0.0)
}

// Severity is exported as a number ("2" or "2.0"); anything but a whole 1..=3 is a defect.
fn parse_severity(field: &str) -> Option<Severity> {
    let value = field.trim().parse::<f64>().ok()?;
    if value.fract() != 0.0 {
        return None;
    }
    Severity::new(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Month,Case No,DOB,Nationality,Gender,License,Doctor,Doctor Type,Doctor Status,CMI,Specialty,Payer,Plan,Payer Mix,Case Type,LOS,Severity,Surgical Mix,Discharge Time,Before 12PM,Revenue";

    fn row(specialty: &str, case_type: &str, los: &str, severity: &str, revenue: &str) -> String {
        format!(
            "2024-02-01,C-100,1975,UAE,M,LIC-9,Dr. Sofia Kim,Consultant,Active,1.35,{specialty},Daman,Gold,Insurance,{case_type},{los},{severity},Surgical,11:30,Yes,{revenue}"
        )
    }

    #[test]
    fn test_decode_empty_text() {
        assert!(decode("").is_empty());
        assert!(decode("   \n  ").is_empty());
    }

    #[test]
    fn test_decode_header_only() {
        assert!(decode(HEADER).is_empty());
    }

    #[test]
    fn test_decode_maps_columns() {
        let text = format!("{HEADER}\n{}", row("Cardiology", "IP", "4.5", "2", "1800.50"));
        let records = decode(&text);

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.month.as_str(), "2024-02-01");
        assert_eq!(r.case_no, "C-100");
        assert_eq!(r.dob, 1975.0);
        assert_eq!(r.doctor_name, "Dr. Sofia Kim");
        assert_eq!(r.doctor_status, "Active");
        assert_eq!(r.cmi_value, 1.35);
        assert_eq!(r.specialty, "Cardiology");
        assert_eq!(r.payer_mix, "Insurance");
        assert_eq!(r.case_type, CaseType::Inpatient);
        assert_eq!(r.los, 4.5);
        assert_eq!(r.severity.level(), 2);
        assert_eq!(r.discharge_before_noon, "Yes");
        assert_eq!(r.revenue, 1800.5);
    }

    #[test]
    fn test_decode_skips_short_rows() {
        let text = format!(
            "{HEADER}\n{}\na,b,c\n\n{}\n2024-03-01,C-2,1990",
            row("Cardiology", "IP", "3", "1", "100"),
            row("Nephrology", "OP", "0", "1", "50")
        );
        let (records, stats) = decode_with_stats(&text);

        assert_eq!(records.len(), 2);
        assert_eq!(stats.accepted, 2);
        assert_eq!(stats.short_rows, 3);
        assert_eq!(stats.skipped(), 3);
    }

    #[test]
    fn test_decode_all_rows_short_yields_empty() {
        let text = "h1,h2\n1,2,3\n4,5,6,7,8";
        assert!(decode(text).is_empty());
    }

    #[test]
    fn test_decode_numeric_defaults_to_zero() {
        let text = format!("{HEADER}\n{}", row("Cardiology", "IP", "n/a", "2", ""));
        let records = decode(&text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].los, 0.0);
        assert_eq!(records[0].revenue, 0.0);
    }

    #[test]
    fn test_decode_clamps_negative_amounts() {
        let text = format!("{HEADER}\n{}", row("Cardiology", "IP", "-2", "2", "-10"));
        let records = decode(&text);
        assert_eq!(records[0].los, 0.0);
        assert_eq!(records[0].revenue, 0.0);
    }

    #[test]
    fn test_decode_ignores_extra_columns() {
        let text = format!("{HEADER}\n{},extra,columns", row("Cardiology", "DC", "1", "3", "75"));
        let records = decode(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].revenue, 75.0);
    }

    #[test]
    fn test_decode_rejects_unknown_codes() {
        let text = format!(
            "{HEADER}\n{}\n{}\n{}",
            row("Cardiology", "XX", "1", "2", "10"),
            row("Cardiology", "IP", "1", "9", "10"),
            row("Cardiology", "IP", "1", "2.0", "10"),
        );
        let (records, stats) = decode_with_stats(&text);

        assert_eq!(records.len(), 1);
        assert_eq!(stats.invalid_codes, 2);
    }

    #[test]
    fn test_decode_handles_crlf() {
        let text = format!(
            "{HEADER}\r\n{}\r\n{}\r\n",
            row("Cardiology", "IP", "2", "1", "300"),
            row("Emergency", "OP", "0", "1", "40")
        );
        let records = decode(&text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].revenue, 40.0);
    }

    #[test]
    fn test_decode_is_idempotent() {
        let text = format!(
            "{HEADER}\n{}\n{}",
            row("Cardiology", "IP", "2", "1", "300"),
            row("Cardiology", "IP", "2", "1", "300")
        );
        assert_eq!(decode(&text), decode(&text));
    }

    #[test]
    fn test_decode_keeps_duplicate_case_numbers_in_order() {
        let text = format!(
            "{HEADER}\n{}\n{}",
            row("Cardiology", "IP", "2", "1", "300"),
            row("Emergency", "OP", "0", "1", "40")
        );
        let records = decode(&text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].case_no, records[1].case_no);
        assert_eq!(records[0].specialty, "Cardiology");
        assert_eq!(records[1].specialty, "Emergency");
    }
}
