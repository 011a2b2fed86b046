use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What the model should do with the audio: write it down in its original
/// language, or translate it to English while transcribing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskMode {
    #[default]
    Transcribe,
    Translate,
}

impl TaskMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskMode::Transcribe => "transcribe",
            TaskMode::Translate => "translate",
        }
    }
}

impl FromStr for TaskMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transcribe" => Ok(TaskMode::Transcribe),
            "translate" => Ok(TaskMode::Translate),
            _ => Err(format!(
                "Invalid task: {}. Expected: transcribe or translate",
                s
            )),
        }
    }
}

impl fmt::Display for TaskMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
