//! Live admission field validation
//!
//! Runs before any write reaches the admission store. Every field is checked
//! so the caller sees all problems at once, not just the first.

use crate::domain::{
    AdmissionField, AdmissionPayload, CaseType, Department, FieldViolation, NormalizedAdmission,
    Severity, ValidationFailure,
};

/// Maximum length of patient and doctor names, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Validates and normalizes a submission
///
/// # Errors
///
/// Returns a [`ValidationFailure`] listing every violated constraint.
///
/// # Examples
///
/// ```
/// use wardlens::core::validate::validate;
/// use wardlens::domain::{AdmissionPayload, Department};
///
/// let payload = AdmissionPayload {
///     patient_name: "  Jane Doe ".to_string(),
///     department: "Cardiology".to_string(),
///     severity: 2.0,
///     doctor_name: "Dr. X".to_string(),
///     case_type: "IP".to_string(),
/// };
/// let admission = validate(&payload).unwrap();
/// assert_eq!(admission.patient_name, "Jane Doe");
/// assert_eq!(admission.department, Department::Cardiology);
/// ```
pub fn validate(payload: &AdmissionPayload) -> Result<NormalizedAdmission, ValidationFailure> {
    let mut violations = Vec::new();

    let patient_name = check_name(
        AdmissionField::PatientName,
        &payload.patient_name,
        &mut violations,
    );

    let department = payload
        .department
        .trim()
        .parse::<Department>()
        .map_err(|_| {
            violations.push(FieldViolation::NotAllowed {
                field: AdmissionField::Department,
                value: payload.department.clone(),
                allowed: Department::allowed_labels(),
            })
        })
        .ok();

    let severity = check_severity(payload.severity, &mut violations);

    let doctor_name = check_name(
        AdmissionField::DoctorName,
        &payload.doctor_name,
        &mut violations,
    );

    let case_type = payload
        .case_type
        .trim()
        .parse::<CaseType>()
        .map_err(|_| {
            violations.push(FieldViolation::NotAllowed {
                field: AdmissionField::CaseType,
                value: payload.case_type.clone(),
                allowed: "IP, OP, DC".to_string(),
            })
        })
        .ok();

    match (patient_name, department, severity, doctor_name, case_type) {
        (Some(patient_name), Some(department), Some(severity), Some(doctor_name), Some(case_type))
            if violations.is_empty() =>
        {
            Ok(NormalizedAdmission {
                patient_name,
                department,
                severity,
                doctor_name,
                case_type,
            })
        }
        _ => Err(ValidationFailure::new(violations)),
    }
}

fn check_severity(raw: f64, violations: &mut Vec<FieldViolation>) -> Option<Severity> {
    if !raw.is_finite() || raw.fract() != 0.0 {
        violations.push(FieldViolation::NotWholeNumber {
            field: AdmissionField::Severity,
            value: raw.to_string(),
        });
        return None;
    }
    // Saturating cast; anything that large is out of range anyway
    let level = raw as i64;
    Severity::new(level).or_else(|| {
        violations.push(FieldViolation::OutOfRange {
            field: AdmissionField::Severity,
            value: level,
            min: Severity::MIN,
            max: Severity::MAX,
        });
        None
    })
}

fn check_name(
    field: AdmissionField,
    raw: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        violations.push(FieldViolation::Missing { field });
        return None;
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        violations.push(FieldViolation::TooLong {
            field,
            max: MAX_NAME_LEN,
        });
        return None;
    }
    Some(trimmed.to_string())
}
