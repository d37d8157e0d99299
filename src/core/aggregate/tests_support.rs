use crate::domain::{CaseType, MergedRecord, MonthKey, RecordOrigin, Severity};

pub(crate) fn record(
    department: &str,
    case_type: CaseType,
    los: f64,
    complexity: f64,
    revenue: f64,
) -> MergedRecord {
    MergedRecord {
        origin: RecordOrigin::Historical,
        department: department.to_string(),
        case_type,
        severity: Severity::new(1).unwrap(),
        doctor_name: "Dr. A".to_string(),
        doctor_license: "L1".to_string(),
        doctor_type: "Consultant".to_string(),
        doctor_status: "Active".to_string(),
        complexity,
        los,
        revenue,
        month: MonthKey::new("2024-01-01"),
        payer_mix: "Insurance".to_string(),
        discharged_before_noon: None,
    }
}

pub(crate) fn with_doctor(mut record: MergedRecord, doctor: &str) -> MergedRecord {
    record.doctor_name = doctor.to_string();
    record
}

pub(crate) fn in_month(mut record: MergedRecord, month: &str) -> MergedRecord {
    record.month = MonthKey::new(month);
    record
}

pub(crate) fn with_severity(mut record: MergedRecord, level: i64) -> MergedRecord {
    record.severity = Severity::new(level).unwrap();
    record
}

pub(crate) fn with_payer(mut record: MergedRecord, payer: &str) -> MergedRecord {
    record.payer_mix = payer.to_string();
    record
}
