use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DrawingError::invalid_dimensions("x")
            .to_string()
            .contains("invalid dimensions:")
    );
    assert!(
        DrawingError::invalid_buffer("x")
            .to_string()
            .contains("invalid buffer:")
    );
    assert!(
        DrawingError::out_of_range("x")
            .to_string()
            .contains("out of range:")
    );
    assert!(
        DrawingError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        DrawingError::partition("x")
            .to_string()
            .contains("parallel partition failed:")
    );
    assert_eq!(DrawingError::Disposed.to_string(), "image has been disposed");
}

#[test]
fn disposed_predicate_only_matches_disposed() {
    assert!(DrawingError::Disposed.is_disposed());
    assert!(!DrawingError::validation("x").is_disposed());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DrawingError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
