use crate::rolling_average::CycleComplete;
use serde_derive::Serialize;
use tokio::sync::mpsc::UnboundedSender;

/// Everything the pipeline reports to the outside world.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineEvent {
    Sample { value: i32 },
    CycleComplete(CycleComplete),
    WindowResized { from: usize, to: usize },
    ResizeRejected { requested: usize, reason: String },
}

/// Destination for pipeline events.
pub trait EventSink {
    fn publish(&mut self, event: PipelineEvent);
}

impl EventSink for UnboundedSender<PipelineEvent> {
    fn publish(&mut self, event: PipelineEvent) {
        if let Err(e) = self.send(event) {
            tracing::warn!("Dropping pipeline event, reporter has gone away: {:?}", e.0);
        }
    }
}

impl EventSink for Vec<PipelineEvent> {
    fn publish(&mut self, event: PipelineEvent) {
        self.push(event);
    }
}
