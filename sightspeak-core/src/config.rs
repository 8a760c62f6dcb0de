use anyhow::{Context, Result};

/// Google Cloud configuration shared by the vision and speech clients.
///
/// Project/region selection and the OAuth access token are supplied by the
/// caller; nothing here is read from process-global state at use time.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub project_id: String,
    pub location: String,
    pub access_token: String,
}

impl GoogleConfig {
    pub fn new(
        project_id: impl Into<String>,
        location: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            location: location.into(),
            access_token: access_token.into(),
        }
    }

    /// Load configuration from the standard environment variables.
    ///
    /// `GOOGLE_ACCESS_TOKEN` is the output of
    /// `gcloud auth print-access-token`.
    pub fn from_env() -> Result<Self> {
        let project_id = std::env::var("GOOGLE_CLOUD_PROJECT")
            .context("GOOGLE_CLOUD_PROJECT is not set")?;
        let location = std::env::var("GOOGLE_CLOUD_LOCATION")
            .context("GOOGLE_CLOUD_LOCATION is not set")?;
        let access_token = std::env::var("GOOGLE_ACCESS_TOKEN")
            .context("GOOGLE_ACCESS_TOKEN is not set")?;

        Ok(Self {
            project_id,
            location,
            access_token,
        })
    }

    /// Regional endpoint for a published Vertex AI model, e.g.
    /// `.../publishers/google/models/imagetext@001:predict`.
    pub(crate) fn vertex_model_url(&self, model: &str, verb: &str) -> String {
        format!(
            "https://{location}-aiplatform.googleapis.com/v1/projects/{project}/locations/{location}/publishers/google/models/{model}:{verb}",
            location = self.location,
            project = self.project_id,
            model = model,
            verb = verb,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_model_url_is_regional() {
        let config = GoogleConfig::new("my-project", "europe-west4", "token");
        assert_eq!(
            config.vertex_model_url("imagetext@001", "predict"),
            "https://europe-west4-aiplatform.googleapis.com/v1/projects/my-project/locations/europe-west4/publishers/google/models/imagetext@001:predict"
        );
    }
}
