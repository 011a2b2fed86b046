mod conversion_service;
pub mod intake;
mod lifecycle;

pub use conversion_service::{ConversionError, ConversionRequest, ConversionResponse, ConversionService};
pub use intake::{ALLOWED_AUDIO_TYPES, IntakeError, MAX_UPLOAD_BYTES, validate_upload};
pub use lifecycle::{LifecycleError, ServiceLifecycle};
