// src/health/classifier.rs
use super::status::CheckFailure;
use serde::Deserialize;

/// Judges the body of a response that already came back with 200.
pub trait ResponseClassifier: Send + Sync {
    fn classify(&self, body: &[u8]) -> Result<(), CheckFailure>;
}

/// Any 200 is healthy; the body is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusClassifier;

impl ResponseClassifier for StatusClassifier {
    fn classify(&self, _body: &[u8]) -> Result<(), CheckFailure> {
        Ok(())
    }
}

/// Health payload returned by the monitored API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthPayload {
    pub status: String,
    pub message: String,
}

pub const HEALTHY_STATUS: &str = "OK";

/// Requires a `{"status": "OK", "message": ...}` body.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadClassifier;

impl ResponseClassifier for PayloadClassifier {
    fn classify(&self, body: &[u8]) -> Result<(), CheckFailure> {
        let payload: HealthPayload = serde_json::from_slice(body)
            .map_err(|e| CheckFailure::MalformedPayload(e.to_string()))?;

        if payload.status != HEALTHY_STATUS {
            return Err(CheckFailure::UnhealthyPayload {
                status: payload.status,
                message: payload.message,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classifier_ignores_body() {
        assert!(StatusClassifier.classify(b"not json at all").is_ok());
        assert!(StatusClassifier.classify(b"").is_ok());
    }

    #[test]
    fn test_payload_ok() {
        let body = br#"{"status":"OK","message":"fine"}"#;
        assert!(PayloadClassifier.classify(body).is_ok());
    }

    #[test]
    fn test_payload_not_json() {
        let err = PayloadClassifier.classify(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, CheckFailure::MalformedPayload(_)));
    }

    #[test]
    fn test_payload_wrong_shape() {
        let err = PayloadClassifier.classify(br#"{"state":"OK"}"#).unwrap_err();
        assert!(matches!(err, CheckFailure::MalformedPayload(_)));
    }

    #[test]
    fn test_payload_status_is_case_sensitive() {
        let body = br#"{"status":"ok","message":"lowercase"}"#;
        let err = PayloadClassifier.classify(body).unwrap_err();

        assert_eq!(
            err,
            CheckFailure::UnhealthyPayload {
                status: "ok".to_string(),
                message: "lowercase".to_string(),
            }
        );
    }

    #[test]
    fn test_payload_degraded() {
        let body = br#"{"status":"DEGRADED","message":"db lagging"}"#;
        match PayloadClassifier.classify(body) {
            Err(CheckFailure::UnhealthyPayload { status, .. }) => assert_eq!(status, "DEGRADED"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
