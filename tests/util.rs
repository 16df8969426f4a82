use std::path::PathBuf;

/// Reads a file from the crate's `resources/` directory.
pub fn resource(name: &str) -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("resources")
        .join(name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

/// Reads a UTF-8 resource.
#[allow(dead_code)]
pub fn resource_string(name: &str) -> String {
    String::from_utf8(resource(name)).expect("resource is not UTF-8")
}
