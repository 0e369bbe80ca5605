use ising_core::errors::{ErrorInfo, IsingError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("label", "a")
        .with_context("reason", "example")
}

#[test]
fn configuration_error_surface() {
    let err = IsingError::Configuration(sample_info("unknown-algorithm", "no such tag"));
    assert_eq!(err.info().code, "unknown-algorithm");
    assert!(err.info().context.contains_key("label"));
}

#[test]
fn invalid_input_error_surface() {
    let err = IsingError::InvalidInput(sample_info("conflicting-coupling", "mismatch"));
    assert_eq!(err.info().code, "conflicting-coupling");
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn numeric_degeneracy_error_surface() {
    let err = IsingError::NumericDegeneracy(sample_info("sign-of-nan", "undefined sign"));
    assert_eq!(err.info().code, "sign-of-nan");
}

#[test]
fn serde_error_surface() {
    let err = IsingError::Serde(sample_info("manifest-write", "disk full"));
    assert_eq!(err.info().code, "manifest-write");
}

#[test]
fn display_includes_context_and_hint() {
    let err = IsingError::InvalidInput(
        ErrorInfo::new("E001", "problem")
            .with_context("u", "1")
            .with_hint("drop one ordering"),
    );
    let rendered = err.to_string();
    assert!(rendered.starts_with("invalid input: problem (code: E001)"));
    assert!(rendered.contains("u=1"));
    assert!(rendered.contains("hint: drop one ordering"));
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = IsingError::Configuration(ErrorInfo::new("C001", "bad"));
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["family"], "Configuration");
    assert_eq!(json["detail"]["code"], "C001");
    let decoded: IsingError = serde_json::from_value(json).expect("deserialize");
    assert_eq!(decoded, err);
}
