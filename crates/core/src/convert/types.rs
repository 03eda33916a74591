//! Conversion engine response types and outcome classification.

use serde::Deserialize;
use serde_json::Value;

/// Structured response from the conversion engine.
///
/// The engine may return 200 and still embed an error; classification is
/// driven by the fields, never by the HTTP status alone.
#[derive(Debug, Clone, Deserialize)]
pub struct ConverterResponse {
    /// Converted XForm XML on success.
    #[serde(default)]
    pub result: String,
    /// Opaque error payload; non-null means the form was rejected.
    #[serde(default)]
    pub error: Option<Value>,
    /// Itemset CSV data; unused by this service.
    #[serde(default)]
    pub itemsets: Option<Value>,
}

/// Outcome of a conversion attempt that reached the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// Converted XForm XML.
    Success(String),
    /// Engine rejected the form; detail is human-readable.
    Failure(String),
}

/// Classify an engine response into an outcome.
///
/// A non-null `error` forces failure regardless of everything else; an empty
/// `result` with no error is a degenerate response and also a failure.
#[must_use]
pub fn classify(response: &ConverterResponse) -> ConversionOutcome {
    if let Some(error) = &response.error {
        return ConversionOutcome::Failure(stringify_error(error));
    }

    if response.result.is_empty() {
        return ConversionOutcome::Failure("empty result from converter".to_string());
    }

    ConversionOutcome::Success(response.result.clone())
}

/// Render the opaque error payload as a plain string.
fn stringify_error(error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(result: &str, error: Option<Value>) -> ConverterResponse {
        ConverterResponse {
            result: result.to_string(),
            error,
            itemsets: None,
        }
    }

    #[test]
    fn test_classify_success() {
        let outcome = classify(&response("<h:html/>", None));
        assert_eq!(outcome, ConversionOutcome::Success("<h:html/>".to_string()));
    }

    #[test]
    fn test_classify_error_wins_over_result() {
        let outcome = classify(&response("<h:html/>", Some(json!("bad sheet"))));
        assert_eq!(outcome, ConversionOutcome::Failure("bad sheet".to_string()));
    }

    #[test]
    fn test_classify_empty_result_is_failure() {
        let outcome = classify(&response("", None));
        assert_eq!(
            outcome,
            ConversionOutcome::Failure("empty result from converter".to_string())
        );
    }

    #[test]
    fn test_classify_structured_error_is_stringified() {
        let outcome = classify(&response("", Some(json!({"row": 3, "message": "missing type"}))));
        let ConversionOutcome::Failure(detail) = outcome else {
            panic!("expected failure");
        };
        assert!(detail.contains("missing type"));
    }

    #[test]
    fn test_response_deserializes_with_absent_fields() {
        let response: ConverterResponse =
            serde_json::from_str(r#"{"result":"<x/>"}"#).expect("should parse");
        assert_eq!(response.result, "<x/>");
        assert!(response.error.is_none());
        assert!(response.itemsets.is_none());
    }

    #[test]
    fn test_response_null_error_is_none() {
        let response: ConverterResponse =
            serde_json::from_str(r#"{"result":"<x/>","error":null,"itemsets":null}"#)
                .expect("should parse");
        assert!(response.error.is_none());
        assert_eq!(classify(&response), ConversionOutcome::Success("<x/>".to_string()));
    }
}
