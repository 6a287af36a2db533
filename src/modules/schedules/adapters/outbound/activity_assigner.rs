use async_trait::async_trait;

/// Downstream step that attaches activities to freshly imported schedules.
#[async_trait]
pub trait ActivityAssigner: Send + Sync {
    /// Returns the number of schedules that received an activity.
    async fn assign_activities(&self) -> anyhow::Result<usize>;
}
