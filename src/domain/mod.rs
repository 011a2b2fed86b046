mod lifecycle_state;
mod task_mode;
mod transcript;

pub use lifecycle_state::LifecycleState;
pub use task_mode::TaskMode;
pub use transcript::{RawSegment, RawTranscription, TranscriptSegment};
