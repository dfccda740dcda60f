use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(PixbleedError::config("x").to_string().contains("config error:"));
    assert!(
        PixbleedError::out_of_range("x")
            .to_string()
            .contains("out of range:")
    );
    assert!(PixbleedError::decode("x").to_string().contains("decode error:"));
    assert!(PixbleedError::encode("x").to_string().contains("encode error:"));
    assert!(PixbleedError::sink("x").to_string().contains("sink error:"));
    assert!(
        PixbleedError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PixbleedError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
