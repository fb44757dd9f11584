use serde::Deserialize;

/// Wire format of the prediction endpoint. All fields are required;
/// a body missing any of them is treated as a failed request.
#[derive(Debug, Deserialize, Clone)]
pub struct PredictResponse {
    pub prediction: String,
    /// Model probability in 0.0 to 1.0.
    pub confidence: f64,
    #[allow(dead_code)]
    pub status: String,
}
