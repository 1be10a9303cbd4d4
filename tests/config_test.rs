// tests/config_test.rs
use msgtm::config::{load_config, Config, CONFIG_FILE_NAME};
use msgtm::domain::StateFormat;
use msgtm::ops::TagAnnotation;
use serial_test::serial;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

/// Runs `f` with the working directory set to `dir`, restoring it afterwards.
fn in_dir<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir).unwrap();
    let result = f();
    std::env::set_current_dir(previous).unwrap();
    result
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
remote = "mirror"

[state]
file = "tags.json"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    assert_eq!(config.remote, "mirror");
    assert_eq!(config.state_file(), PathBuf::from("tags.json"));
    assert!(config.tags.annotated);
}

#[test]
fn test_load_fixture() {
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/msgtm.toml");
    let config = load_config(Some(&fixture))
        .expect("Failed to load test config");
    assert_eq!(config.remote, "upstream");
    assert_eq!(
        config.annotation(),
        TagAnnotation::Annotated("Release {tag} at {commit}".to_string())
    );
    assert_eq!(config.state.file, "deploy/state.json");
    assert_eq!(config.state.format, None);
}

#[test]
fn test_invalid_file_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[tags]\nannotated = \"maybe\"\n").unwrap();
    temp_file.flush().unwrap();

    assert!(load_config(Some(temp_file.path())).is_err());
}

#[test]
#[serial]
fn test_working_directory_config_is_found() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "remote = \"local\"\n[state]\nformat = \"json\"\n",
    )
    .unwrap();

    let config = in_dir(dir.path(), || load_config(None)).unwrap();
    assert_eq!(config.remote, "local");
    assert_eq!(config.state.format, Some(StateFormat::Json));
}

#[test]
#[serial]
fn test_explicit_path_wins_over_working_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "remote = \"local\"\n").unwrap();
    let explicit = dir.path().join("other.toml");
    std::fs::write(&explicit, "remote = \"explicit\"\n").unwrap();

    let config = in_dir(dir.path(), || load_config(Some(&explicit))).unwrap();
    assert_eq!(config.remote, "explicit");
}

#[test]
#[serial]
fn test_defaults_without_local_file() {
    let dir = TempDir::new().unwrap();
    let config = in_dir(dir.path(), || load_config(None)).unwrap();
    // a user-level config may exist on the machine running the tests
    if dirs::config_dir()
        .map(|d| d.join("msgtm").join(CONFIG_FILE_NAME).exists())
        .unwrap_or(false)
    {
        return;
    }
    assert_eq!(config, Config::default());
}
