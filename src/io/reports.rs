//! Rename report rendering and persistence.

use std::fs;
use std::path::Path;

use crate::core::errors::{RelumeError, Result};
use crate::core::pipeline::RenameReport;

/// Supported report file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Renders and writes pass reports.
#[derive(Debug, Default)]
pub struct ReportWriter;

impl ReportWriter {
    /// Create a report writer.
    pub fn new() -> Self {
        Self
    }

    /// Render a report to a string in the requested format.
    pub fn render(&self, report: &RenameReport, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            ReportFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        }
    }

    /// Render a report and write it to disk.
    pub fn write_report<P: AsRef<Path>>(
        &self,
        report: &RenameReport,
        output_path: P,
        format: ReportFormat,
    ) -> Result<()> {
        let content = self.render(report, format)?;
        fs::write(output_path.as_ref(), content).map_err(|e| {
            RelumeError::io(
                format!("Failed to write report to {}", output_path.as_ref().display()),
                e,
            )
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use crate::core::pipeline::{RenameMode, RenameResult};

    use super::*;

    fn sample_report() -> RenameReport {
        RenameReport {
            pass_id: Uuid::new_v4(),
            mode: RenameMode::Basic,
            throughput: None,
            timestamp: Utc::now(),
            duration_ms: 3,
            variables_found: 1,
            renamed_count: 1,
            failed_count: 0,
            results: vec![RenameResult {
                original: "v1".to_string(),
                renamed: Some("Players".to_string()),
                success: true,
            }],
        }
    }

    #[test]
    fn test_render_json() {
        let rendered = ReportWriter::new()
            .render(&sample_report(), ReportFormat::Json)
            .unwrap();

        assert!(rendered.contains("\"mode\": \"basic\""));
        assert!(rendered.contains("\"original\": \"v1\""));
        assert!(rendered.contains("\"renamed\": \"Players\""));
    }

    #[test]
    fn test_render_yaml() {
        let rendered = ReportWriter::new()
            .render(&sample_report(), ReportFormat::Yaml)
            .unwrap();

        assert!(rendered.contains("mode: basic"));
        assert!(rendered.contains("original: v1"));
    }

    #[test]
    fn test_write_report_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        ReportWriter::new()
            .write_report(&sample_report(), &path, ReportFormat::Json)
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"variables_found\": 1"));
    }

    #[test]
    fn test_write_report_bad_path_is_io_error() {
        let result = ReportWriter::new().write_report(
            &sample_report(),
            "/nonexistent-dir/report.json",
            ReportFormat::Json,
        );
        assert!(matches!(result, Err(RelumeError::Io { .. })));
    }
}
