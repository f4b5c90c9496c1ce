use axum::{extract::State, Json};
use service_core::error::AppError;

use crate::{
    dtos::{GenerateResponse, ImageRequest},
    services::{ImageInput, StudyTask},
    utils::ValidatedJson,
    AppState,
};

/// Summarise the uploaded study material for exam preparation.
pub async fn generate_summary(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ImageRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    run_study_task(&state, StudyTask::Summary, &req.images).await
}

/// Produce a 100-mark question paper from the uploaded study material.
pub async fn generate_questions(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ImageRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    run_study_task(&state, StudyTask::QuestionPaper, &req.images).await
}

async fn run_study_task(
    state: &AppState,
    task: StudyTask,
    images: &[String],
) -> Result<Json<GenerateResponse>, AppError> {
    let images: Vec<ImageInput> = images.iter().map(|raw| ImageInput::parse(raw)).collect();

    tracing::info!(
        task = task.as_str(),
        image_count = images.len(),
        provider = state.provider.name(),
        "Generating study material"
    );

    let result = state.provider.generate(task.prompt(), &images).await?;

    Ok(Json(GenerateResponse { result }))
}
