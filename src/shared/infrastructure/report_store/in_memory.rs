use crate::shared::infrastructure::report_store::{ReportKind, ReportWriter, report_path};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryReportWriter {
    reports: RwLock<HashMap<PathBuf, String>>,
    is_offline: bool,
}

impl InMemoryReportWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn get(&self, source: &Path, kind: ReportKind) -> Option<String> {
        self.reports.read().await.get(&report_path(source, kind)).cloned()
    }

    pub async fn count(&self) -> usize {
        self.reports.read().await.len()
    }
}

#[async_trait]
impl ReportWriter for InMemoryReportWriter {
    async fn remove_reports(&self, source: &Path) -> anyhow::Result<()> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Report store offline"));
        }
        let mut guard = self.reports.write().await;
        for kind in ReportKind::ALL {
            guard.remove(&report_path(source, kind));
        }
        Ok(())
    }

    async fn write(&self, source: &Path, kind: ReportKind, text: &str) -> anyhow::Result<PathBuf> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Report store offline"));
        }
        let path = report_path(source, kind);
        self.reports.write().await.insert(path.clone(), text.to_string());
        Ok(path)
    }
}
