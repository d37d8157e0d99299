//! Historical dataset sources
//!
//! A source yields the raw delimiter-separated text; decoding happens in
//! [`crate::core::decode`].

use crate::config::HistoricalConfig;
use crate::core::decode::decode_with_stats;
use crate::domain::{HistoricalRecord, Result, SourceError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[async_trait]
pub trait HistoricalSource: Send + Sync {
    /// Where the text comes from, for logs
    fn describe(&self) -> String;

    /// Reads the whole dataset as text
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the text cannot be read.
    async fn fetch_text(&self) -> std::result::Result<String, SourceError>;
}

/// Dataset in a local file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl HistoricalSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_text(&self) -> std::result::Result<String, SourceError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => SourceError::NotFound(self.describe()),
                _ => SourceError::ReadFailed(format!("{}: {}", self.describe(), e)),
            })
    }
}

/// Dataset served over HTTP
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> std::result::Result<Self, SourceError> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::ConnectionFailed(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl HistoricalSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch_text(&self) -> std::result::Result<String, SourceError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(e.to_string())
            } else {
                SourceError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::ReadFailed(e.to_string()))
    }
}

/// Create the source named by `config.source`: a URL or a file path
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built
pub fn create_historical_source(config: &HistoricalConfig) -> Result<Arc<dyn HistoricalSource>> {
    if config.is_remote() {
        let source = HttpSource::new(
            config.source.clone(),
            Duration::from_secs(config.timeout_seconds),
        )?;
        Ok(Arc::new(source))
    } else {
        Ok(Arc::new(FileSource::new(&config.source)))
    }
}

/// Fetches and decodes the dataset, logging how many rows were skipped
///
/// # Errors
///
/// Returns an error if the source cannot be read. Malformed rows are not
/// errors.
pub async fn load_historical(source: &dyn HistoricalSource) -> Result<Vec<HistoricalRecord>> {
    let started = Instant::now();
    let text = source.fetch_text().await?;
    let (records, stats) = decode_with_stats(&text);

    if stats.skipped() > 0 {
        tracing::warn!(
            source = %source.describe(),
            short_rows = stats.short_rows,
            invalid_codes = stats.invalid_codes,
            "Skipped malformed historical rows"
        );
    }
    crate::log_load_complete!("historical", records.len(), started.elapsed());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_file_source_reads_text() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "header\nrow").unwrap();

        let source = FileSource::new(file.path());
        assert_eq!(source.fetch_text().await.unwrap(), "header\nrow");
    }

    #[tokio::test]
    async fn test_file_source_missing() {
        let source = FileSource::new("/definitely/not/here.csv");
        let err = source.fetch_text().await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_load_historical_decodes_rows() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "header\n\
             2024-01-01,C1,1980,UAE,F,L1,Dr. A,Consultant,Active,1.4,Cardiology,P,Plan,Cash,IP,5,3,Med,09:00,No,2500\n\
             too,short"
        )
        .unwrap();

        let records = load_historical(&FileSource::new(file.path())).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].specialty, "Cardiology");
    }

    #[test]
    fn test_factory_picks_by_scheme() {
        let file = create_historical_source(&HistoricalConfig {
            source: "data/hospital_data.csv".to_string(),
            timeout_seconds: 5,
        })
        .unwrap();
        assert_eq!(file.describe(), "data/hospital_data.csv");

        let http = create_historical_source(&HistoricalConfig {
            source: "https://data.example.com/h.csv".to_string(),
            timeout_seconds: 5,
        })
        .unwrap();
        assert_eq!(http.describe(), "https://data.example.com/h.csv");
    }
}
