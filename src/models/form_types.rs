use serde::Serialize;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PredictionResult {
    pub label: String,
    /// Confidence as a display percentage, 0.0 to 100.0.
    pub confidence: f64,
    pub is_positive: bool,
}

/// Everything the frontend needs to render the form. Produced from the
/// internal state on every command return, never mutated by the webview.
#[derive(Debug, Serialize, Clone)]
pub struct FormSnapshot {
    pub file_name: Option<String>,
    pub preview: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub result: Option<PredictionResult>,
    pub can_submit: bool,
}
