use std::fmt;

/// Service lifecycle phases. The only legal forward path is
/// `Uninitialized -> Loading -> Ready -> ShuttingDown -> Stopped`;
/// `LoadFailed` is a terminal branch out of `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Uninitialized,
    Loading,
    Ready,
    LoadFailed,
    ShuttingDown,
    Stopped,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Uninitialized => "UNINITIALIZED",
            LifecycleState::Loading => "LOADING",
            LifecycleState::Ready => "READY",
            LifecycleState::LoadFailed => "LOAD_FAILED",
            LifecycleState::ShuttingDown => "SHUTTING_DOWN",
            LifecycleState::Stopped => "STOPPED",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
