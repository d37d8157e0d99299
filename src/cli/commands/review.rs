//! Review command implementation

use super::{open_session, print_json, EXIT_OK};
use crate::cli::OutputFormat;
use crate::core::review::{review, ReviewItem, ReviewLevel};
use clap::Args;

/// Arguments for the review command
#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Limit the review to one department (within the configured access)
    #[arg(short, long)]
    pub department: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ReviewArgs {
    /// Execute the review command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let session = match open_session(config_path, self.department.as_deref()).await {
            Ok(session) => session,
            Err(code) => return Ok(code),
        };
        let records = session.merged().await;
        session.close().await;

        let items = review(&records?);
        match self.format {
            OutputFormat::Json => print_json(&items)?,
            OutputFormat::Text => {
                if items.is_empty() {
                    println!("No cases to review");
                }
                for item in &items {
                    println!("{}", render(item));
                }
            }
        }
        Ok(EXIT_OK)
    }
}

fn render(item: &ReviewItem) -> String {
    let marker = match item.level {
        ReviewLevel::Critical => "🚨",
        ReviewLevel::Warning => "⚠️ ",
        ReviewLevel::Info => "ℹ️ ",
    };
    format!(
        "{marker} [{}] {}\n   {}",
        item.level, item.title, item.description
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_item() {
        let item = ReviewItem {
            level: ReviewLevel::Critical,
            title: "1 Inactive Doctor(s) with Assigned Cases".to_string(),
            description: "Dr. A".to_string(),
        };
        let text = render(&item);
        assert!(text.starts_with("🚨 [critical] 1 Inactive Doctor(s)"));
        assert!(text.ends_with("Dr. A"));
    }
}
