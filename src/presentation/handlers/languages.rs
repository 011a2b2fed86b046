use std::collections::BTreeMap;

use axum::Json;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::supported_languages;

#[derive(Serialize)]
pub struct SupportedLanguagesResponse {
    pub success: bool,
    pub languages: BTreeMap<&'static str, &'static str>,
    pub total_count: usize,
}

pub async fn supported_languages_handler() -> impl IntoResponse {
    let languages = supported_languages();

    Json(SupportedLanguagesResponse {
        success: true,
        total_count: languages.len(),
        languages,
    })
}
