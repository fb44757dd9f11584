use crate::error::AppError;
use crate::models::form_types::{FormSnapshot, PredictionResult};
use crate::models::predict_types::PredictResponse;
use crate::services::predict_client::PredictClient;
use crate::services::preview_service;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:8000/predict/";

const MSG_NOT_AN_IMAGE: &str = "Please select an image file";
const MSG_NO_FILE: &str = "Please select an image to analyze";
const MSG_REQUEST_FAILED: &str = "Failed to analyze image. Please try again.";

// A label like "No Cancer Detected" contains the positive phrase as a
// substring; the negated form has to win.
const POSITIVE_PHRASE: &str = "cancer detected";
const NEGATED_PHRASE: &str = "no cancer detected";

#[derive(Clone)]
pub struct FormConfig {
    pub endpoint_url: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct SelectedFile {
    path: PathBuf,
    name: String,
    mime: &'static str,
}

/// Outcome of the form. Holding the result and the error in one sum
/// keeps them mutually exclusive; the serialized snapshot derives its
/// loading/error/result fields from here.
#[derive(Debug)]
enum Phase {
    Idle,
    Submitting,
    Succeeded(PredictionResult),
    Failed(String),
}

struct FormState {
    file: Option<SelectedFile>,
    preview: Option<String>,
    preview_generation: u64,
    phase: Phase,
}

/// Owns all upload-and-predict state. Cloneable handle, shared state
/// behind one async lock; the lock is never held across the wire call.
#[derive(Clone)]
pub struct AnalysisForm {
    client: Arc<PredictClient>,
    state: Arc<Mutex<FormState>>,
}

impl AnalysisForm {
    pub fn new(config: FormConfig) -> Self {
        Self {
            client: Arc::new(PredictClient::new(config.endpoint_url)),
            state: Arc::new(Mutex::new(FormState {
                file: None,
                preview: None,
                preview_generation: 0,
                phase: Phase::Idle,
            })),
        }
    }

    pub async fn snapshot(&self) -> FormSnapshot {
        render(&*self.state.lock().await)
    }

    /// Handle a new selection from the file dialog. Returns the preview
    /// generation the caller should load when the file was accepted.
    ///
    /// An empty path (dismissed dialog) is a no-op. A non-image path
    /// sets the validation message but leaves the previous file and
    /// preview untouched.
    pub async fn select_file(&self, path: &str) -> Option<u64> {
        if path.is_empty() {
            return None;
        }

        let mut state = self.state.lock().await;

        // A new selection always discards the previous outcome, even
        // when the file itself is then rejected.
        state.phase = Phase::Idle;

        let path = PathBuf::from(path);
        let Some(mime) = preview_service::declared_mime(&path) else {
            state.phase = Phase::Failed(MSG_NOT_AN_IMAGE.to_string());
            return None;
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        state.file = Some(SelectedFile { path, name, mime });
        state.preview_generation += 1;
        Some(state.preview_generation)
    }

    /// Read the selected file and install its preview. A completion
    /// whose generation is stale (a newer file was chosen meanwhile)
    /// is discarded. Returns whether the preview was installed.
    pub async fn load_preview(&self, generation: u64) -> bool {
        let (path, mime) = {
            let state = self.state.lock().await;
            if state.preview_generation != generation {
                return false;
            }
            match &state.file {
                Some(file) => (file.path.clone(), file.mime),
                None => return false,
            }
        };

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Failed to read {} for preview: {}", path.display(), e);
                return false;
            }
        };

        let uri = preview_service::preview_data_uri(&bytes, mime);

        let mut state = self.state.lock().await;
        if state.preview_generation != generation {
            return false;
        }
        state.preview = Some(uri);
        true
    }

    /// Run one submission: exactly one POST, settled into either a
    /// result or the generic failure message before returning.
    pub async fn submit(&self) -> Result<FormSnapshot, AppError> {
        let file = {
            let mut state = self.state.lock().await;

            // The frontend disables the button while loading, but that
            // is best effort only; a second call just reports state.
            if matches!(state.phase, Phase::Submitting) {
                return Ok(render(&state));
            }

            let Some(file) = state.file.clone() else {
                state.phase = Phase::Failed(MSG_NO_FILE.to_string());
                return Ok(render(&state));
            };

            state.phase = Phase::Submitting;
            file
        };

        let outcome = self.request_prediction(&file).await;

        let mut state = self.state.lock().await;
        state.phase = match outcome {
            Ok(result) => Phase::Succeeded(result),
            Err(e) => {
                eprintln!("Prediction request failed: {}", e);
                Phase::Failed(MSG_REQUEST_FAILED.to_string())
            }
        };
        Ok(render(&state))
    }

    async fn request_prediction(&self, file: &SelectedFile) -> Result<PredictionResult, AppError> {
        let bytes = tokio::fs::read(&file.path).await?;
        let response = self.client.predict(&file.name, file.mime, bytes).await?;
        Ok(to_result(response))
    }
}

fn to_result(response: PredictResponse) -> PredictionResult {
    let lower = response.prediction.to_lowercase();
    let is_positive = lower.contains(POSITIVE_PHRASE) && !lower.contains(NEGATED_PHRASE);
    PredictionResult {
        label: response.prediction,
        confidence: response.confidence * 100.0,
        is_positive,
    }
}

fn render(state: &FormState) -> FormSnapshot {
    let loading = matches!(state.phase, Phase::Submitting);
    FormSnapshot {
        file_name: state.file.as_ref().map(|f| f.name.clone()),
        preview: state.preview.clone(),
        loading,
        error: match &state.phase {
            Phase::Failed(message) => Some(message.clone()),
            _ => None,
        },
        result: match &state.phase {
            Phase::Succeeded(result) => Some(result.clone()),
            _ => None,
        },
        can_submit: state.file.is_some() && !loading,
    }
}
