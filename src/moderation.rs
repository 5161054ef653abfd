//! Content moderation seam
//!
//! [`ImageModerator`] abstracts the moderation call the same way
//! [`crate::store::ObjectStore`] abstracts storage. The production
//! implementation calls Rekognition `DetectModerationLabels` against
//! the just-written S3 object, referencing it by bucket, key and
//! version token.

use crate::config::GateConfig;
use async_trait::async_trait;
use aws_sdk_rekognition::types::{Image, S3Object};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    #[error("detect moderation labels failed: {0}")]
    Detect(String),
}

/// One moderation label with its confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationLabel {
    pub name: String,
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
}

/// Full moderation response
///
/// Mirror of the service output; stored verbatim as the `result` field
/// of the persisted result document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModerationResponse {
    pub moderation_labels: Vec<ModerationLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moderation_model_version: Option<String>,
}

#[async_trait]
pub trait ImageModerator: Send + Sync {
    async fn detect(
        &self,
        bucket: &str,
        key: &str,
        version: Option<&str>,
    ) -> Result<ModerationResponse, ModerationError>;
}

/// Rekognition-backed moderator
pub struct RekognitionModerator {
    client: aws_sdk_rekognition::Client,
}

impl RekognitionModerator {
    pub fn new(aws: &aws_config::SdkConfig, config: &GateConfig) -> Self {
        let mut builder = aws_sdk_rekognition::config::Builder::from(aws);
        if let Some(endpoint) = &config.rekognition_endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self {
            client: aws_sdk_rekognition::Client::from_conf(builder.build()),
        }
    }
}

#[async_trait]
impl ImageModerator for RekognitionModerator {
    async fn detect(
        &self,
        bucket: &str,
        key: &str,
        version: Option<&str>,
    ) -> Result<ModerationResponse, ModerationError> {
        let mut s3_object = S3Object::builder().bucket(bucket).name(key);
        if let Some(version) = version {
            s3_object = s3_object.version(version);
        }

        let output = self
            .client
            .detect_moderation_labels()
            .image(Image::builder().s3_object(s3_object.build()).build())
            .send()
            .await
            .map_err(|e| ModerationError::Detect(e.to_string()))?;

        let moderation_labels = output
            .moderation_labels()
            .iter()
            .map(|label| ModerationLabel {
                name: label.name().unwrap_or_default().to_string(),
                confidence: label.confidence().unwrap_or_default(),
                parent_name: label.parent_name().map(|p| p.to_string()),
            })
            .collect();

        Ok(ModerationResponse {
            moderation_labels,
            moderation_model_version: output
                .moderation_model_version()
                .map(|v| v.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_serializes_labels() {
        let response = ModerationResponse {
            moderation_labels: vec![ModerationLabel {
                name: "Alcohol".to_string(),
                confidence: 93.4,
                parent_name: None,
            }],
            moderation_model_version: Some("7.0".to_string()),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["moderation_labels"][0]["name"], "Alcohol");
        assert_eq!(value["moderation_model_version"], "7.0");
        // parent_name is omitted when absent
        assert!(value["moderation_labels"][0].get("parent_name").is_none());
    }
}
