use std::path::PathBuf;

#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join(name)
}

/// Write `contents` to a fresh temp file and return its path.
#[allow(dead_code)]
pub fn temp_json(tag: &str, contents: &str) -> PathBuf {
    use std::time::{SystemTime, UNIX_EPOCH};

    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("carousel_{tag}_{pid}_{nanos}.json"));
    std::fs::write(&path, contents).unwrap();
    path
}
