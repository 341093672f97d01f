use prometheus::{IntCounter, Registry};

pub struct Metrics {
    pub submissions_received: IntCounter,
    pub submissions_completed: IntCounter,
    pub submissions_failed: IntCounter,
}

impl Metrics {
    pub fn new(registry: &Registry) -> Self {
        let submissions_received =
            IntCounter::new("submissions_received", "Submissions accepted for processing").unwrap();
        let submissions_completed =
            IntCounter::new("submissions_completed", "Submissions stored and completed").unwrap();
        let submissions_failed =
            IntCounter::new("submissions_failed", "Submissions that ended in failure").unwrap();
        registry.register(Box::new(submissions_received.clone())).unwrap();
        registry.register(Box::new(submissions_completed.clone())).unwrap();
        registry.register(Box::new(submissions_failed.clone())).unwrap();
        Self {
            submissions_received,
            submissions_completed,
            submissions_failed,
        }
    }
}
