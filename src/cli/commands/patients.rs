//! Patients command implementation
//!
//! Lists live admissions one page at a time.

use super::{open_session, print_json, EXIT_OK, EXIT_VALIDATION};
use crate::cli::OutputFormat;
use crate::core::roster::{RosterPage, RosterQuery, SortDirection, SortKey};
use crate::domain::CaseType;
use clap::{Args, ValueEnum};

/// Column to sort the roster by
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortColumn {
    Name,
    Department,
    Severity,
    Created,
}

impl From<SortColumn> for SortKey {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Name => SortKey::PatientName,
            SortColumn::Department => SortKey::Department,
            SortColumn::Severity => SortKey::Severity,
            SortColumn::Created => SortKey::CreatedAt,
        }
    }
}

/// Arguments for the patients command
#[derive(Args, Debug)]
pub struct PatientsArgs {
    /// Case-insensitive patient name search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only this case type (IP, OP, DC)
    #[arg(long)]
    pub case_type: Option<String>,

    /// Sort column
    #[arg(long, value_enum, default_value_t = SortColumn::Created)]
    pub sort: SortColumn,

    /// Sort ascending instead of descending
    #[arg(long)]
    pub asc: bool,

    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl PatientsArgs {
    fn query(&self) -> Result<RosterQuery, String> {
        let case_type = self
            .case_type
            .as_deref()
            .map(str::parse::<CaseType>)
            .transpose()?;

        Ok(RosterQuery {
            search: self.search.clone(),
            case_type,
            sort_key: self.sort.into(),
            sort_dir: if self.asc {
                SortDirection::Asc
            } else {
                SortDirection::Desc
            },
            page: self.page.saturating_sub(1),
        })
    }

    /// Execute the patients command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let query = match self.query() {
            Ok(query) => query,
            Err(e) => {
                println!("❌ Invalid roster query");
                println!("   Error: {e}");
                return Ok(EXIT_VALIDATION);
            }
        };

        let session = match open_session(config_path, None).await {
            Ok(session) => session,
            Err(code) => return Ok(code),
        };
        let admissions = session.live_admissions().await;
        session.close().await;

        let page = query.run(&admissions?);
        match self.format {
            OutputFormat::Json => print_json(&page)?,
            OutputFormat::Text => print!("{}", render(&page)),
        }
        Ok(EXIT_OK)
    }
}

fn render(page: &RosterPage) -> String {
    let mut out = format!(
        "👥 {} admissions (page {} of {})\n",
        page.total,
        page.page + 1,
        page.total_pages
    );
    for row in &page.rows {
        out.push_str(&format!(
            "  {:<24} {:<16} {:<2} sev {} {:<24} {}\n",
            row.patient_name,
            row.department.label(),
            row.case_type.code(),
            row.severity.level(),
            row.doctor_name,
            row.created_at.format("%Y-%m-%d %H:%M"),
        ));
    }
    out
}
