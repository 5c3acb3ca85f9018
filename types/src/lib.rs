use serde::{Deserialize, Serialize};

/// Language recorded for a transcription before any recognition has run.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Metadata for one uploaded audio file.
///
/// `text` and `language` start out empty / [`UNKNOWN_LANGUAGE`] and are filled
/// in later by whatever performs the actual speech recognition. The columns
/// behind them are nullable, so a row written by another process may leave
/// any of them out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    pub id: i64,

    pub filename: Option<String>,

    pub text: Option<String>,

    pub language: Option<String>,
}

/// One time-bounded span of recognised speech within a transcription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: i64,

    /// Offset from the start of the audio, in seconds.
    pub start: Option<f64>,

    /// Offset from the start of the audio, in seconds.
    pub end: Option<f64>,

    pub text: Option<String>,

    /// Token ids as the recogniser stored them. Only the array shape is
    /// checked; the elements are returned as they were written.
    pub tokens: Vec<serde_json::Value>,

    pub temperature: Option<f64>,

    pub avg_logprob: Option<f64>,

    pub compression_ratio: Option<f64>,

    pub no_speech_prob: Option<f64>,

    pub confidence: Option<f64>,

    /// Word-level timing data. The shape belongs to the recogniser, so it is
    /// passed through untouched.
    pub words: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,

    pub transcription_id: i64,
}

impl UploadResponse {
    #[must_use]
    pub fn uploaded(transcription_id: i64) -> Self {
        Self {
            message: "File uploaded successfully".to_string(),
            transcription_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upload_response_shape() {
        let value = serde_json::to_value(UploadResponse::uploaded(7)).unwrap();

        assert_eq!(
            value,
            json!({
                "message": "File uploaded successfully",
                "transcription_id": 7,
            })
        );
    }

    #[test]
    fn test_segment_serializes_missing_metrics_as_null() {
        let segment = Segment {
            id: 1,
            start: Some(0.0),
            end: Some(2.5),
            text: Some(" hello".to_string()),
            tokens: vec![json!(50364), json!(2425)],
            temperature: Some(0.0),
            avg_logprob: None,
            compression_ratio: None,
            no_speech_prob: None,
            confidence: Some(0.9),
            words: json!([{ "word": "hello", "start": 0.0, "end": 0.4 }]),
        };

        let value = serde_json::to_value(&segment).unwrap();

        assert_eq!(value["tokens"], json!([50364, 2425]));
        assert_eq!(value["avg_logprob"], serde_json::Value::Null);
        assert_eq!(value["words"][0]["word"], "hello");
    }

    #[test]
    fn test_transcription_without_text_serializes_null() {
        let transcription = Transcription {
            id: 2,
            filename: Some("b.wav".to_string()),
            text: None,
            language: Some("en".to_string()),
        };

        assert_eq!(
            serde_json::to_value(&transcription).unwrap(),
            json!({
                "id": 2,
                "filename": "b.wav",
                "text": null,
                "language": "en",
            })
        );
    }
}
