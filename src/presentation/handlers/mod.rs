mod convert;
mod error;
mod health;
mod languages;
mod model_info;
mod root;

pub use convert::convert_handler;
pub use error::ErrorResponse;
pub use health::health_handler;
pub use languages::supported_languages_handler;
pub use model_info::model_info_handler;
pub use root::root_handler;
