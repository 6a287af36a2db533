use crate::modules::schedules::adapters::outbound::activity_assigner::ActivityAssigner;
use crate::shared::infrastructure::job_queue::{JobQueue, JobQueueError};
use std::sync::Arc;

/// Puts the activity assignment on the job queue so runs never overlap.
pub struct AssignActivitiesHandler {
    queue: JobQueue,
    assigner: Arc<dyn ActivityAssigner>,
}

impl AssignActivitiesHandler {
    pub fn new(queue: JobQueue, assigner: Arc<dyn ActivityAssigner>) -> Self {
        Self { queue, assigner }
    }

    pub fn trigger(&self) -> Result<(), JobQueueError> {
        let assigner = self.assigner.clone();
        self.queue.enqueue("assign_activities", async move {
            let assigned = assigner.assign_activities().await?;
            tracing::info!(assigned, "activities assigned");
            Ok(())
        })
    }
}
