use crate::error::AppError;
use crate::models::form_types::FormSnapshot;
use crate::services::form::AnalysisForm;
use tauri::{AppHandle, Emitter, State};

/// Handle a file chosen in the native dialog. The preview read runs in
/// the background; the webview gets a "preview-updated" event once the
/// data URI is ready (stale reads are dropped and emit nothing).
#[tauri::command]
pub async fn select_image(
    app: AppHandle,
    form: State<'_, AnalysisForm>,
    path: String,
) -> Result<FormSnapshot, AppError> {
    if let Some(generation) = form.select_file(&path).await {
        let form = form.inner().clone();
        tauri::async_runtime::spawn(async move {
            if form.load_preview(generation).await {
                let _ = app.emit("preview-updated", form.snapshot().await);
            }
        });
    }
    Ok(form.snapshot().await)
}

#[tauri::command]
pub async fn submit_analysis(form: State<'_, AnalysisForm>) -> Result<FormSnapshot, AppError> {
    form.submit().await
}

#[tauri::command]
pub async fn form_snapshot(form: State<'_, AnalysisForm>) -> Result<FormSnapshot, AppError> {
    Ok(form.snapshot().await)
}
