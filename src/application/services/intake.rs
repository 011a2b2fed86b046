//! Upload checks applied before any engine work is spent.
//!
//! All checks are pure and synchronous. The media-type check is advisory: it
//! rejects only a declared type outside the allow-list and never sniffs the
//! actual content, so an absent declared type passes.

/// Upload ceiling: 50 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

pub const ALLOWED_AUDIO_TYPES: [&str; 11] = [
    "audio/wav",
    "audio/wave",
    "audio/x-wav",
    "audio/mpeg",
    "audio/mp3",
    "audio/mp4",
    "audio/m4a",
    "audio/flac",
    "audio/x-flac",
    "audio/ogg",
    "audio/webm",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("audio file is too large, the maximum size is {limit_mib} MB")]
    PayloadTooLarge { limit_mib: u64 },
    #[error("unsupported audio format '{media_type}', supported formats: {supported}")]
    UnsupportedMediaType {
        media_type: String,
        supported: String,
    },
    #[error("audio file is empty")]
    EmptyPayload,
}

/// Checks run in order: size, declared type, emptiness. The first failure
/// short-circuits.
pub fn validate_upload(declared_type: Option<&str>, data: &[u8]) -> Result<(), IntakeError> {
    if data.len() as u64 > MAX_UPLOAD_BYTES {
        return Err(IntakeError::PayloadTooLarge {
            limit_mib: MAX_UPLOAD_BYTES / (1024 * 1024),
        });
    }

    if let Some(media_type) = declared_type {
        if !ALLOWED_AUDIO_TYPES.contains(&media_type) {
            return Err(IntakeError::UnsupportedMediaType {
                media_type: media_type.to_string(),
                supported: ALLOWED_AUDIO_TYPES.join(", "),
            });
        }
    }

    if data.is_empty() {
        return Err(IntakeError::EmptyPayload);
    }

    Ok(())
}
