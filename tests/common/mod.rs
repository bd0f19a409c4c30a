use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A unit quad split into two triangles
#[allow(dead_code)]
pub const QUAD_OBJ: &str = "\
o quad
v 0 0 0
v 4 0 0
v 4 2 0
v 0 2 0
f 1 2 3 4
";

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Config file whose model store lives in the same temp dir
#[allow(dead_code)]
pub fn temp_config_with_storage() -> (TempDir, PathBuf) {
    let (temp_dir, config_path) = temp_config_file("");
    let store = temp_dir.path().join("models.db");
    fs::write(
        &config_path,
        format!("storage:\n  path: {}\n", store.display()),
    )
    .expect("failed to write config file");
    (temp_dir, config_path)
}

#[allow(dead_code)]
pub fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("failed to write file");
    path
}
