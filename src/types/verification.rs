use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{KycError, Result};

use super::payload::{BvnPayload, NinPayload, PayloadSource, VninPayload};

/// Identity documents the client can verify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationKind {
    /// National Identification Number
    Nin,
    /// Virtual NIN
    Vnin,
    /// Bank Verification Number
    Bvn,
}

impl VerificationKind {
    /// Name used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            VerificationKind::Nin => "NIN",
            VerificationKind::Vnin => "vNIN",
            VerificationKind::Bvn => "BVN",
        }
    }

    /// Endpoint, relative to the API base URL
    pub fn default_path(&self) -> &'static str {
        match self {
            VerificationKind::Nin => "identity/ng/nin",
            VerificationKind::Vnin => "identity/ng/vnin",
            VerificationKind::Bvn => "identity/ng/bvn",
        }
    }

    pub fn default_payload(&self, id: &str) -> Result<Value> {
        let value = match self {
            VerificationKind::Nin => serde_json::to_value(NinPayload::new(id))?,
            VerificationKind::Vnin => serde_json::to_value(VninPayload::new(id))?,
            VerificationKind::Bvn => serde_json::to_value(BvnPayload::new(id))?,
        };
        Ok(value)
    }

    /// Turn a payload source into the body that goes on the wire.
    ///
    /// An explicit payload wins outright; the default body is only built when
    /// no explicit payload was given.
    pub fn resolve_payload(&self, source: PayloadSource) -> Result<Value> {
        if source.is_empty() {
            return Err(KycError::validation(format!("{} is required", self.label())));
        }

        match source {
            PayloadSource::Explicit(payload) => Ok(payload),
            PayloadSource::Identifier(id) => self.default_payload(&id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_labels_and_paths() {
        assert_eq!(VerificationKind::Nin.label(), "NIN");
        assert_eq!(VerificationKind::Vnin.label(), "vNIN");
        assert_eq!(VerificationKind::Bvn.label(), "BVN");
        assert_eq!(VerificationKind::Nin.default_path(), "identity/ng/nin");
        assert_eq!(VerificationKind::Vnin.default_path(), "identity/ng/vnin");
        assert_eq!(VerificationKind::Bvn.default_path(), "identity/ng/bvn");
    }

    #[test]
    fn test_explicit_payload_is_not_merged() {
        let custom = json!({"id": "X9", "premiumNin": false});
        let resolved = VerificationKind::Nin
            .resolve_payload(PayloadSource::Explicit(custom.clone()))
            .unwrap();
        assert_eq!(resolved, custom);
    }

    #[test]
    fn test_missing_input_is_rejected() {
        for kind in [VerificationKind::Nin, VerificationKind::Vnin, VerificationKind::Bvn] {
            let err = kind
                .resolve_payload(PayloadSource::Identifier(String::new()))
                .unwrap_err();
            assert_eq!(err.to_string(), format!("Validation error: {} is required", kind.label()));

            for empty in [json!({}), json!(false), json!(0), json!("0")] {
                let err = kind
                    .resolve_payload(PayloadSource::Explicit(empty))
                    .unwrap_err();
                assert!(err.is_validation());
            }
        }
    }

    #[test]
    fn test_wire_key_order_is_kept() {
        let nin = VerificationKind::Nin
            .resolve_payload(PayloadSource::Identifier("A1234567".into()))
            .unwrap();
        assert_eq!(
            serde_json::to_string(&nin).unwrap(),
            r#"{"id":"A1234567","premiumNin":true,"isSubjectConsent":true}"#
        );

        let bvn = VerificationKind::Bvn
            .resolve_payload(PayloadSource::Identifier("12345678901".into()))
            .unwrap();
        let keys: Vec<_> = bvn.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["id", "metadata", "isSubjectConsent", "premiumBVN"]);

        let custom: Value = serde_json::from_str(r#"{"zeta":1,"alpha":2,"mid":{"b":1,"a":2}}"#).unwrap();
        let resolved = VerificationKind::Vnin
            .resolve_payload(PayloadSource::Explicit(custom))
            .unwrap();
        assert_eq!(
            serde_json::to_string(&resolved).unwrap(),
            r#"{"zeta":1,"alpha":2,"mid":{"b":1,"a":2}}"#
        );
    }

    #[test]
    fn test_default_payload_from_identifier() {
        let resolved = VerificationKind::Vnin
            .resolve_payload(PayloadSource::Identifier("V1234567".into()))
            .unwrap();
        assert_eq!(resolved, json!({"id": "V1234567", "isSubjectConsent": true}));
    }
}
