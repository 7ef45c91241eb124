use std::path::{Path, PathBuf};

use carousel_core::CarouselModel;
use serde_json::Value;

#[allow(dead_code)]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

#[allow(dead_code)]
pub fn read_fixture(name: &str) -> String {
    let path = workspace_root().join("fixtures").join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!("failed to read fixture {} at {}: {e}", name, path.display())
    })
}

#[allow(dead_code)]
pub fn fixture_model() -> CarouselModel {
    let v: Value = serde_json::from_str(&read_fixture("carousel.json")).unwrap();
    CarouselModel::from_records(v.as_array().cloned().unwrap())
}
