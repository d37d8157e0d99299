//! Departments command implementation

use super::{open_session, print_json, EXIT_OK};
use crate::cli::OutputFormat;
use crate::core::aggregate::{department_names, department_summary, DepartmentSummary};
use crate::domain::MergedRecord;
use clap::Args;

/// Arguments for the departments command
#[derive(Args, Debug)]
pub struct DepartmentsArgs {
    /// Show only this department
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl DepartmentsArgs {
    /// Execute the departments command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let session = match open_session(config_path, None).await {
            Ok(session) => session,
            Err(code) => return Ok(code),
        };
        let records = session.merged().await;
        session.close().await;

        let summaries = summaries(&records?, self.name.as_deref());

        match self.format {
            OutputFormat::Json => print_json(&summaries)?,
            OutputFormat::Text => {
                if summaries.is_empty() {
                    match &self.name {
                        Some(name) => println!("No visible cases for department '{name}'"),
                        None => println!("No visible cases"),
                    }
                }
                for summary in &summaries {
                    print!("{}", render(summary));
                }
            }
        }
        Ok(EXIT_OK)
    }
}

fn summaries(records: &[MergedRecord], only: Option<&str>) -> Vec<DepartmentSummary> {
    department_names(records)
        .iter()
        .filter(|name| only.map_or(true, |only| only == name.as_str()))
        .filter_map(|name| department_summary(records, name))
        .collect()
}

fn render(summary: &DepartmentSummary) -> String {
    let mut out = format!("🏥 {}\n", summary.department);
    out.push_str(&format!(
        "  Cases: {}  ALOS: {:.2}  CMI: {:.3}  Revenue: {:.2}\n",
        summary.total_cases, summary.alos, summary.cmi, summary.total_revenue
    ));
    out.push_str(&format!("  Doctors: {}\n", summary.doctors.join(", ")));
    for point in &summary.trend {
        out.push_str(&format!(
            "    {:<6} {:>5} cases {:>12.0} revenue {:>6.2} ALOS\n",
            point.month, point.cases, point.revenue, point.alos
        ));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::decode::decode;
    use crate::core::merge::merge;

    fn records() -> Vec<MergedRecord> {
        merge(
            &decode(
                "header\n\
                 2024-01-01,C1,1980,UAE,F,L1,Dr. A,Consultant,Active,1.4,Cardiology,P,Plan,Cash,IP,5,3,Med,09:00,No,2500\n\
                 2024-01-01,C2,1975,UAE,M,L2,Dr. B,Consultant,Active,1.0,Emergency,P,Plan,Insurance,OP,0,1,None,10:00,Yes,300",
            ),
            &[],
        )
    }

    #[test]
    fn test_summaries_cover_every_department() {
        let all = summaries(&records(), None);
        let names: Vec<&str> = all.iter().map(|s| s.department.as_str()).collect();
        assert_eq!(names, vec!["Cardiology", "Emergency"]);
    }

    #[test]
    fn test_summaries_filtered_by_name() {
        let only = summaries(&records(), Some("Emergency"));
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].total_cases, 1);
        assert!(summaries(&records(), Some("Oncology")).is_empty());
    }

    #[test]
    fn test_render_lists_trend() {
        let text = render(&summaries(&records(), Some("Cardiology"))[0]);
        assert!(text.contains("🏥 Cardiology"));
        assert!(text.contains("Dr. A"));
        assert!(text.contains("01/24"));
    }
}
