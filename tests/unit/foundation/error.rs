use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        QuadblitError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        QuadblitError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = QuadblitError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let err = serde_json::from_str::<u32>("nope").unwrap_err();
    let err = QuadblitError::from(err);
    assert!(matches!(err, QuadblitError::Serde(_)));
}
