//! LibreTranslate API Data Transfer Objects
//!
//! API Reference: https://libretranslate.com/docs
//!
//! Both endpoints answer either with their payload or with `{"error": "..."}`,
//! on success and failure statuses alike, so responses are untagged enums.

use serde::{Deserialize, Serialize};

/// Response from `POST /translate`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TranslateResponse {
    Translated {
        #[serde(rename = "translatedText")]
        translated_text: String,
    },
    Error {
        error: String,
    },
}

/// Response from `POST /detect`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DetectResponse {
    /// Candidates, most confident first
    Detections(Vec<Detection>),
    Error { error: String },
}

/// One detection candidate
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Detection {
    /// ISO 639-1 code ("en")
    pub language: String,
    /// 0-100
    #[serde(default)]
    pub confidence: f64,
}

// ============================================================================
// CONTRACT TESTS
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_translation() {
        let json = r#"{"translatedText": "Olá mundo"}"#;

        let response: TranslateResponse = serde_json::from_str(json).expect("Should parse");

        assert!(matches!(
            response,
            TranslateResponse::Translated { ref translated_text } if translated_text == "Olá mundo"
        ));
    }

    #[test]
    fn test_parse_translation_error() {
        let json = r#"{"error": "pt is not supported"}"#;

        let response: TranslateResponse = serde_json::from_str(json).expect("Should parse");

        assert!(matches!(response, TranslateResponse::Error { .. }));
    }

    #[test]
    fn test_parse_detections() {
        let json = r#"[{"confidence": 90.0, "language": "fr"}, {"confidence": 8.5, "language": "it"}]"#;

        let response: DetectResponse = serde_json::from_str(json).expect("Should parse");

        let DetectResponse::Detections(detections) = response else {
            panic!("expected detections");
        };
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].language, "fr");
        assert_eq!(detections[0].confidence, 90.0);
    }

    #[test]
    fn test_parse_detect_error() {
        let json = r#"{"error": "Invalid request: missing q parameter"}"#;

        let response: DetectResponse = serde_json::from_str(json).expect("Should parse");

        assert!(matches!(response, DetectResponse::Error { ref error } if error.contains("missing q")));
    }
}
