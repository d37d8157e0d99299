//! Report command implementation
//!
//! Prints the operational overview: headline metrics, departmental workload,
//! revenue by month, payer mix, severity mix and the busiest doctors.

use super::{open_session, print_json, scope_label, EXIT_OK};
use crate::cli::OutputFormat;
use crate::core::dashboard::DashboardView;
use clap::Args;

/// Arguments for the report command
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Limit the report to one department (within the configured access)
    #[arg(short, long)]
    pub department: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ReportArgs {
    /// Execute the report command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let session = match open_session(config_path, self.department.as_deref()).await {
            Ok(session) => session,
            Err(code) => return Ok(code),
        };
        let scope = scope_label(session.dashboard.scope());
        let view = session.view().await;
        session.close().await;
        let view = view?;

        match self.format {
            OutputFormat::Json => print_json(&view)?,
            OutputFormat::Text => print!("{}", render(&view, &scope)),
        }
        Ok(EXIT_OK)
    }
}

fn render(view: &DashboardView, scope: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("📊 Operational overview ({scope})\n\n"));
    out.push_str(&format!(
        "  Cases:   {} ({} live)\n",
        view.total_cases, view.live_cases
    ));
    out.push_str(&format!("  ALOS:    {:.2} days\n", view.alos));
    out.push_str(&format!("  CMI:     {:.3}\n", view.cmi));
    out.push_str(&format!("  Revenue: {:.2}\n", view.total_revenue));

    if view.total_cases == 0 {
        out.push_str("\n  No cases visible.\n");
        return out;
    }

    out.push_str("\nWorkload by department:\n");
    for row in &view.workload {
        out.push_str(&format!(
            "  {:<16} {:>6} patients {:>4} doctors\n",
            row.department, row.patients, row.doctors
        ));
    }

    out.push_str("\nRevenue by month:\n");
    for row in &view.revenue_by_month {
        out.push_str(&format!("  {:<6} {:>14.2}\n", row.month, row.revenue));
    }

    out.push_str("\nPayer mix:\n");
    for share in &view.payer_mix {
        out.push_str(&format!("  {:<16} {:>6}\n", share.name, share.value));
    }

    out.push_str("\nSeverity:\n");
    for level in &view.severity {
        out.push_str(&format!("  {:<16} {:>6}\n", level.severity, level.count));
    }

    out.push_str("\nTop doctors:\n");
    for doctor in &view.top_doctors {
        out.push_str(&format!("  {:<24} {:>6} cases\n", doctor.doctor, doctor.cases));
    }
    out
}
