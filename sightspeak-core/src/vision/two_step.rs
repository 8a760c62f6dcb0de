//! Two-call analysis: visual question answering followed by a rewrite pass

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use super::analyzer::ImageAnalyzer;
use super::provider::{GenerativeModel, VisionQa};
use super::types::{GenerateRequest, ImageData};

pub struct VisionQaAnalyzer {
    image: PathBuf,
    qa: Arc<dyn VisionQa>,
    model: Arc<dyn GenerativeModel>,
}

impl VisionQaAnalyzer {
    pub fn new(
        image: impl Into<PathBuf>,
        qa: Arc<dyn VisionQa>,
        model: Arc<dyn GenerativeModel>,
    ) -> Self {
        Self {
            image: image.into(),
            qa,
            model,
        }
    }

    /// The rewrite prompt always names the target language, including the
    /// default one. The one-step analyzer behaves differently there.
    fn rewrite_prompt(question: &str, raw_answer: &str, language: &str) -> String {
        format!(
            "Based on the following question and answer, create an answer with a full sentence.\n\
             Make sure this answer is in {language}.\n\
             QUESTION: {question}\n\
             ANSWER: {raw_answer}"
        )
    }
}

#[async_trait]
impl ImageAnalyzer for VisionQaAnalyzer {
    async fn analyze(&self, question: &str, language: &str) -> Result<String> {
        let image = ImageData::from_file(&self.image)?;

        let answers = self.qa.ask(&image.bytes, question).await?;
        let raw_answer = answers
            .into_iter()
            .next()
            .context("Vision model returned no answers")?;
        info!("{raw_answer}");

        let prompt = Self::rewrite_prompt(question, &raw_answer, language);
        let response = self.model.generate(GenerateRequest::text(prompt)).await?;
        info!("{}", response.text);

        Ok(response.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::mock::{MockGenerativeModel, MockVisionQa};
    use crate::vision::types::Part;
    use std::io::Write;

    fn temp_image(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn rewrite_embeds_question_answer_and_language() {
        let image = temp_image(b"jpegbytes");
        let qa = Arc::new(MockVisionQa::new(vec![vec!["ABC 123".into()]]));
        let model = Arc::new(MockGenerativeModel::new(vec![
            "The plate number is ABC 123.".into(),
        ]));
        let analyzer = VisionQaAnalyzer::new(image.path(), qa.clone(), model.clone());

        let answer = analyzer
            .analyze("What is the plate number?", "French")
            .await
            .unwrap();
        assert_eq!(answer, "The plate number is ABC 123.");

        // First call gets the unmodified question and the image bytes.
        let (asked_image, asked_question) = qa.last_question().unwrap();
        assert_eq!(asked_image, b"jpegbytes");
        assert_eq!(asked_question, "What is the plate number?");

        // Second call's prompt embeds question, raw answer, and language.
        let request = model.last_request().unwrap();
        assert_eq!(request.parts.len(), 1);
        let Part::Text(prompt) = &request.parts[0] else {
            panic!("rewrite call must be text-only");
        };
        assert!(prompt.contains("QUESTION: What is the plate number?"));
        assert!(prompt.contains("ANSWER: ABC 123"));
        assert!(prompt.contains("Make sure this answer is in French."));
    }

    #[test]
    fn language_is_named_even_for_english() {
        let prompt = VisionQaAnalyzer::rewrite_prompt("Q", "A", "English");
        assert!(prompt.contains("Make sure this answer is in English."));
    }

    #[tokio::test]
    async fn empty_answer_list_is_an_error() {
        let image = temp_image(b"jpegbytes");
        let qa = Arc::new(MockVisionQa::new(vec![vec![]]));
        let model = Arc::new(MockGenerativeModel::new(vec!["unused".into()]));
        let analyzer = VisionQaAnalyzer::new(image.path(), qa, model.clone());

        assert!(analyzer.analyze("Q", "English").await.is_err());
        // The rewrite call must not happen without a raw answer.
        assert_eq!(model.call_count(), 0);
    }
}
