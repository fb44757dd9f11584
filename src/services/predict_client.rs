use crate::error::AppError;
use crate::models::predict_types::PredictResponse;

/// Client for the remote prediction endpoint. One POST per call, no
/// timeout, no retry; failed attempts are resubmitted by the user.
pub struct PredictClient {
    endpoint_url: String,
    client: reqwest::Client,
}

impl PredictClient {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Send the image as a single multipart field named "file" and
    /// decode the response. Any non-2xx status is an error regardless
    /// of what the body says.
    pub async fn predict(
        &self,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<PredictResponse, AppError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.endpoint_url)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(format!(
                "prediction endpoint returned HTTP {}",
                response.status()
            )
            .into());
        }

        Ok(response.json::<PredictResponse>().await?)
    }
}
