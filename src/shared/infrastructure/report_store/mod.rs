// Processing reports written next to an imported file.
//
// Purpose
// - Leave a plain-text trace of every import attempt beside its source file.
//
// Responsibilities
// - Name reports `<source>_processing_successful_report.txt` or `<source>_failure_report.txt`.
// - Keep at most one report per source: prior reports are removed before a new one is written.

pub mod file_system;
pub mod in_memory;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Success,
    Failure,
}

impl ReportKind {
    pub const ALL: [ReportKind; 2] = [ReportKind::Success, ReportKind::Failure];

    fn suffix(&self) -> &'static str {
        match self {
            ReportKind::Success => "_processing_successful_report.txt",
            ReportKind::Failure => "_failure_report.txt",
        }
    }
}

pub fn report_path(source: &Path, kind: ReportKind) -> PathBuf {
    let mut path = source.as_os_str().to_owned();
    path.push(kind.suffix());
    PathBuf::from(path)
}

#[async_trait]
pub trait ReportWriter: Send + Sync {
    async fn remove_reports(&self, source: &Path) -> anyhow::Result<()>;
    async fn write(&self, source: &Path, kind: ReportKind, text: &str) -> anyhow::Result<PathBuf>;

    /// Replaces whatever report exists for `source`.
    async fn replace(&self, source: &Path, kind: ReportKind, text: &str) -> anyhow::Result<PathBuf> {
        self.remove_reports(source).await?;
        self.write(source, kind, text).await
    }
}

#[cfg(test)]
mod report_store_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ReportKind::Success, "/data/2024-03.xlsx_processing_successful_report.txt")]
    #[case(ReportKind::Failure, "/data/2024-03.xlsx_failure_report.txt")]
    fn it_should_name_reports_after_the_source(#[case] kind: ReportKind, #[case] expected: &str) {
        assert_eq!(
            report_path(Path::new("/data/2024-03.xlsx"), kind),
            PathBuf::from(expected)
        );
    }
}
