//! Admit command implementation
//!
//! Validates a new admission and writes it to the configured store.

use super::{report_failure, EXIT_OK, EXIT_VALIDATION};
use crate::adapters::store::create_admission_store;
use crate::config::{load_config, StoreConfig};
use crate::core::stream::{submit_admission, LiveCache, LiveFeed};
use crate::domain::{AdmissionPayload, LiveAdmission, Result, WardlensError};
use clap::Args;

/// Arguments for the admit command
#[derive(Args, Debug)]
pub struct AdmitArgs {
    /// Patient full name
    #[arg(long)]
    pub patient: String,

    /// Intake department, e.g. "Cardiology"
    #[arg(long)]
    pub department: String,

    /// Severity level, 1 to 3
    #[arg(long, allow_negative_numbers = true)]
    pub severity: f64,

    /// Attending doctor
    #[arg(long)]
    pub doctor: String,

    /// Case type: IP, OP or DC
    #[arg(long)]
    pub case_type: String,
}

impl AdmitArgs {
    fn payload(&self) -> AdmissionPayload {
        AdmissionPayload {
            patient_name: self.patient.clone(),
            department: self.department.clone(),
            severity: self.severity,
            doctor_name: self.doctor.clone(),
            case_type: self.case_type.clone(),
        }
    }

    /// Execute the admit command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => return Ok(report_failure("Failed to load configuration", &e)),
        };

        println!("📝 Recording admission for {}", self.patient.trim());

        match admit(&config.store, &self.payload()).await {
            Ok(admission) => {
                println!("✅ Admission recorded");
                println!("   ID: {}", admission.id);
                println!(
                    "   {} / {} / severity {}",
                    admission.department,
                    admission.case_type.label(),
                    admission.severity.level()
                );
                Ok(EXIT_OK)
            }
            Err(WardlensError::Validation(failure)) => {
                println!("❌ Admission is invalid");
                for violation in &failure.violations {
                    println!("   - {violation}");
                }
                Ok(EXIT_VALIDATION)
            }
            Err(e) => Ok(report_failure("Failed to record admission", &e)),
        }
    }
}

async fn admit(store_config: &StoreConfig, payload: &AdmissionPayload) -> Result<LiveAdmission> {
    let store = create_admission_store(store_config)?;
    let cache = LiveCache::spawn();
    let feed = LiveFeed::attach(store.clone(), cache.clone()).await?;

    let result = submit_admission(store.as_ref(), &cache, payload).await;
    feed.shutdown().await;
    result
}
