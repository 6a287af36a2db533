use crate::shared::infrastructure::report_store::{ReportKind, ReportWriter, report_path};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone)]
pub struct FileSystemReportWriter;

impl FileSystemReportWriter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReportWriter for FileSystemReportWriter {
    async fn remove_reports(&self, source: &Path) -> anyhow::Result<()> {
        for kind in ReportKind::ALL {
            match tokio::fs::remove_file(report_path(source, kind)).await {
                Ok(()) => {}
                Err(error) if error.kind() == ErrorKind::NotFound => {}
                Err(error) => return Err(error.into()),
            }
        }
        Ok(())
    }

    async fn write(&self, source: &Path, kind: ReportKind, text: &str) -> anyhow::Result<PathBuf> {
        let path = report_path(source, kind);
        tokio::fs::write(&path, text).await?;
        tracing::debug!(report = %path.display(), "report written");
        Ok(path)
    }
}
