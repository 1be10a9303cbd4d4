// tests/cli_test.rs
use clap::Parser;
use msgtm::cli::{orchestration, Cli};
use msgtm::config::Config;
use msgtm::domain::{ServiceName, TrackedState};
use msgtm::git::MockBackend;
use msgtm::MsgtmError;
use std::path::Path;
use tempfile::TempDir;

fn run(args: &[&str], backend: &MockBackend) -> anyhow::Result<()> {
    run_with_config(args, backend, &Config::default())
}

fn run_with_config(args: &[&str], backend: &MockBackend, config: &Config) -> anyhow::Result<()> {
    let cli = Cli::try_parse_from(std::iter::once("msgtm").chain(args.iter().copied()))?;
    orchestration::run(&cli, config, || Ok(backend))
}

fn repo() -> MockBackend {
    MockBackend::new()
        .with_commit("c1", &["cart-v1.0.0", "search-v0.3.0", "docs"])
        .with_commit("c2", &[])
        .with_remote("origin", &[])
        .with_remote("upstream", &[])
}

#[test]
fn test_add_tags_services() {
    let backend = repo();
    run(&["add", "v2.0.0", "--services", "cart,search", "--commit-id", "c1"], &backend).unwrap();

    assert_eq!(backend.tag("cart-v2.0.0").unwrap().commit, "c1");
    assert_eq!(
        backend.tag("search-v2.0.0").unwrap().message.as_deref(),
        Some("Add search-v2.0.0 tags to c1")
    );
}

#[test]
fn test_add_uses_lightweight_tags_from_config() {
    let backend = repo();
    let mut config = Config::default();
    config.tags.annotated = false;
    run_with_config(&["add", "0.0.1", "-s", "cart"], &backend, &config).unwrap();

    let tag = backend.tag("cart-v0.0.1").unwrap();
    assert_eq!(tag.commit, "c2");
    assert_eq!(tag.message, None);
}

#[test]
fn test_add_requires_services() {
    let backend = repo();
    assert!(run(&["add", "v1.0.0"], &backend).is_err());
    assert!(backend.calls().is_empty());
}

#[test]
fn test_add_services_from_file() {
    let backend = repo();
    let services = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/services.yaml");
    run(
        &["add", "v3.0.0", "--from-config-file", services.to_str().unwrap()],
        &backend,
    )
    .unwrap();

    for tag in ["checkout-v3.0.0", "payment-gateway-v3.0.0", "inventory-v3.0.0"] {
        assert!(backend.tag(tag).is_some(), "missing {}", tag);
    }
}

#[test]
fn test_add_dry_run_creates_nothing() {
    let backend = repo();
    run(&["--dry-run", "add", "v2.0.0", "-s", "cart"], &backend).unwrap();
    assert!(backend.tag("cart-v2.0.0").is_none());
}

#[test]
fn test_upgrade_excludes_services() {
    let backend = repo();
    run(&["upgrade", "--major", "--services", "search"], &backend).unwrap();

    assert!(backend.tag("cart-v2.0.0").is_some());
    assert!(backend.tag("search-v1.0.0").is_none());
}

#[test]
fn test_upgrade_all_overrides_services() {
    let backend = repo();
    run(&["upgrade", "--minor", "--all", "--services", "search"], &backend).unwrap();

    assert!(backend.tag("cart-v1.1.0").is_some());
    assert!(backend.tag("search-v0.4.0").is_some());
}

#[test]
fn test_upgrade_defaults_to_patch() {
    let backend = repo();
    run(&["upgrade"], &backend).unwrap();
    assert_eq!(backend.tag("cart-v1.0.1").unwrap().commit, "c2");
}

#[test]
fn test_reset_local_and_origin() {
    let backend = repo();
    run(&["push", "--commit-id", "c1"], &backend).unwrap();
    assert_eq!(backend.remote_tags("origin").len(), 2);

    run(&["reset", "c1", "--origin", "--force"], &backend).unwrap();

    assert!(backend.remote_tags("origin").is_empty());
    assert_eq!(backend.tag_names(), vec!["docs".to_string()]);
}

#[test]
fn test_reset_exclude_local_needs_origin() {
    let backend = repo();
    assert!(run(&["reset", "c1", "--exclude-local", "--force"], &backend).is_err());
    assert_eq!(backend.tag_names().len(), 3);
}

#[test]
fn test_reset_dry_run_skips_prompt() {
    let backend = repo();
    run(&["reset", "c1", "--dry-run"], &backend).unwrap();
    assert_eq!(backend.tag_names().len(), 3);
}

#[test]
fn test_push_to_configured_remote() {
    let backend = repo();
    let mut config = Config::default();
    config.remote = "upstream".to_string();
    run_with_config(&["push", "--commit-id", "c1"], &backend, &config).unwrap();

    assert!(backend.remote_tags("origin").is_empty());
    assert_eq!(
        backend.remote_tags("upstream"),
        vec!["cart-v1.0.0".to_string(), "search-v0.3.0".to_string()]
    );
}

#[test]
fn test_push_remote_flag_wins() {
    let backend = repo();
    let mut config = Config::default();
    config.remote = "upstream".to_string();
    run_with_config(&["push", "--commit-id", "c1", "--remote", "origin"], &backend, &config)
        .unwrap();
    assert_eq!(backend.remote_tags("origin").len(), 2);
}

#[test]
fn test_backend_errors_surface() {
    let backend = repo().failing_on("push_tags");
    let err = run(&["push", "--commit-id", "c1"], &backend).unwrap_err();
    assert!(err.downcast_ref::<MsgtmError>().is_some());
}

#[test]
fn test_sync_after_add() {
    let backend = repo();
    let dir = TempDir::new().unwrap();
    let state_path = dir.path().join("state.yaml");
    run(
        &[
            "add",
            "v1.1.0",
            "-s",
            "cart",
            "--sync",
            "--state-file",
            state_path.to_str().unwrap(),
        ],
        &backend,
    )
    .unwrap();

    let state = TrackedState::load(&state_path, None).unwrap();
    let cart = state.get(&ServiceName::from("cart")).unwrap();
    assert_eq!(cart.latest.as_ref().unwrap().commit_id.as_str(), "c2");
    assert_eq!(cart.prev.as_ref().unwrap().commit_id.as_str(), "c1");
}

#[test]
fn test_sync_skipped_when_command_fails() {
    let backend = repo().failing_on("create_tag");
    let dir = TempDir::new().unwrap();
    let state_path = dir.path().join("state.yaml");
    let result = run(
        &[
            "add",
            "v1.1.0",
            "-s",
            "cart",
            "--sync",
            "--state-file",
            state_path.to_str().unwrap(),
        ],
        &backend,
    );
    assert!(result.is_err());
    assert!(!state_path.exists());
}

#[test]
fn test_sync_command() {
    let backend = repo();
    let dir = TempDir::new().unwrap();
    let state_path = dir.path().join("state.json");
    run(&["sync", "--state-file", state_path.to_str().unwrap()], &backend).unwrap();

    let state = TrackedState::load(&state_path, None).unwrap();
    assert_eq!(
        state.service_names(),
        vec![ServiceName::from("cart"), ServiceName::from("search")]
    );
}

#[test]
fn test_init_does_not_open_repository() {
    let dir = TempDir::new().unwrap();
    let state_path = dir.path().join("state.yaml");
    let cli = Cli::try_parse_from([
        "msgtm",
        "init",
        "--filename",
        state_path.to_str().unwrap(),
        "--services",
        "cart,search",
    ])
    .unwrap();

    orchestration::run(&cli, &Config::default(), || -> msgtm::Result<&MockBackend> {
        Err(MsgtmError::backend("not in a repository"))
    })
    .unwrap();

    let state = TrackedState::load(&state_path, None).unwrap();
    assert_eq!(state.len(), 2);
}

#[test]
fn test_list_runs() {
    let backend = repo();
    run(&["list", "--services", "cart"], &backend).unwrap();
    assert_eq!(
        backend.calls(),
        vec!["list_all_tags".to_string(), "find_commit_for_tag".to_string()]
    );
}
