//! Commands queued from the hosting surface to the backend worker.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    InvokeAction,
    ComputeSum { num1: String, num2: String },
    Cancel,
}
