use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FramefitError::manifest_invalid("x")
            .to_string()
            .contains("invalid template manifest:")
    );
    assert!(
        FramefitError::artwork_invalid("x")
            .to_string()
            .contains("invalid artwork:")
    );
    assert!(
        FramefitError::degenerate_geometry("x")
            .to_string()
            .contains("degenerate geometry:")
    );
    assert!(
        FramefitError::encoding("x")
            .to_string()
            .contains("encoding error:")
    );
}

#[test]
fn codes_are_stable() {
    assert_eq!(FramefitError::manifest_invalid("x").code(), "manifest_invalid");
    assert_eq!(FramefitError::artwork_invalid("x").code(), "artwork_invalid");
    assert_eq!(
        FramefitError::degenerate_geometry("x").code(),
        "degenerate_geometry"
    );
    assert_eq!(FramefitError::encoding("x").code(), "encoding_error");
    assert_eq!(
        FramefitError::Other(anyhow::anyhow!("boom")).code(),
        "internal"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FramefitError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
