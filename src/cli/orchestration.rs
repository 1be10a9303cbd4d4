//! Command dispatch
//!
//! Turns parsed CLI arguments and the loaded configuration into calls to
//! [crate::ops], resolving defaults (`HEAD`, the configured remote, the
//! configured state file) at this boundary. The backend is opened lazily
//! so `init` works outside a repository.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::cli::{Cli, Commands, SyncArgs};
use crate::config::Config;
use crate::domain::{CommitId, RemoteAddr, ServiceFilter, ServiceName, VersionBump};
use crate::git::TagBackend;
use crate::ops::{self, CompositeDestroyer, LocalDestroyer, RemoteDestroyer};
use crate::ui;

/// Run one parsed command.
///
/// # Arguments
///
/// * `cli` - Parsed command line
/// * `config` - Loaded configuration
/// * `open_backend` - Opens the repository; only called by commands that need one
pub fn run<B, F>(cli: &Cli, config: &Config, open_backend: F) -> Result<()>
where
    B: TagBackend,
    F: FnOnce() -> crate::Result<B>,
{
    if let Commands::Init {
        filename,
        services,
        force,
    } = &cli.command
    {
        return init_command(config, filename.as_ref(), services, *force, cli.dry_run);
    }

    let backend = open_backend().context("Failed to open git repository")?;
    run_with_backend(&cli.command, config, &backend, cli.dry_run)
}

fn init_command(
    config: &Config,
    filename: Option<&PathBuf>,
    services: &[ServiceName],
    force: bool,
    dry_run: bool,
) -> Result<()> {
    let path = filename.cloned().unwrap_or_else(|| config.state_file());
    if dry_run {
        ui::display_status(&format!(
            "[dry run] would write {} with {} service(s)",
            path.display(),
            services.len()
        ));
        return Ok(());
    }
    let state = ops::init_state_file(&path, services, config.state.format, force)
        .with_context(|| format!("Failed to initialize '{}'", path.display()))?;
    ui::display_success(&format!("Initialized {}", path.display()));
    ui::display_state(&path, &state);
    Ok(())
}

fn run_with_backend<B: TagBackend>(
    command: &Commands,
    config: &Config,
    backend: &B,
    dry_run: bool,
) -> Result<()> {
    match command {
        Commands::Add {
            version,
            services,
            commit_id,
            from_config_file,
            sync,
        } => {
            let mut names = services.clone();
            if let Some(path) = from_config_file {
                let listed = ops::load_service_names(path)
                    .with_context(|| format!("Failed to read services from '{}'", path.display()))?;
                names.extend(listed);
            }
            if names.is_empty() {
                bail!("No services given, use --services or --from-config-file");
            }

            let commit_id = CommitId::or_head(commit_id.as_deref());
            let created = ops::create_service_tags(
                backend,
                &commit_id,
                &names,
                *version,
                &config.annotation(),
                dry_run,
            )
            .context("Failed to create service tags")?;
            ui::display_tags("Created tags:", &created, dry_run);

            sync_after(backend, config, sync, dry_run)
        }
        Commands::Upgrade {
            minor,
            major,
            all,
            services,
            commit_id,
            sync,
        } => {
            let bump = if *major {
                VersionBump::Major
            } else if *minor {
                VersionBump::Minor
            } else {
                VersionBump::Patch
            };
            let excluded: &[ServiceName] = if *all { &[] } else { services };

            let commit_id = CommitId::or_head(commit_id.as_deref());
            let created = ops::version_up_all_service_tags(
                backend,
                &commit_id,
                bump,
                excluded,
                &config.annotation(),
                dry_run,
            )
            .with_context(|| format!("Failed to apply {} version up", bump))?;
            if created.is_empty() {
                ui::display_warning("No service tags to upgrade");
                return Ok(());
            }
            ui::display_tags("Created tags:", &created, dry_run);

            sync_after(backend, config, sync, dry_run)
        }
        Commands::Reset {
            commit_id,
            origin,
            exclude_local,
            remote,
            force,
            sync,
        } => {
            if *exclude_local && !*origin {
                bail!("Nothing to reset: --exclude-local without --origin");
            }
            let commit_id = CommitId::or_head(commit_id.as_deref());
            let remote = resolve_remote(remote.as_deref(), config);

            let mut destroyer = CompositeDestroyer::new();
            let mut places = Vec::new();
            if *origin {
                destroyer.push(RemoteDestroyer::new(backend, remote.clone()));
                places.push(format!("on '{}'", remote));
            }
            if !*exclude_local {
                destroyer.push(LocalDestroyer::new(backend, *force));
                places.push("locally".to_string());
            }

            if !*force && !dry_run {
                let tags_on_commit = backend.show_tags_at_commit(&commit_id)?;
                let planned: Vec<_> = ops::plan_reset(&tags_on_commit)
                    .into_iter()
                    .map(|(_, tag)| tag)
                    .collect();
                if planned.is_empty() {
                    ui::display_status(&format!("No service tags on {}", commit_id));
                    return Ok(());
                }
                if !ui::confirm_reset(&planned, &places.join(" and "))? {
                    println!("Operation cancelled by user.");
                    return Ok(());
                }
            }

            let removed = ops::reset_service_tags(backend, &destroyer, &commit_id, dry_run)
                .with_context(|| format!("Failed to reset tags on {}", commit_id))?;
            ui::display_tags("Deleted tags:", &removed, dry_run);

            sync_after(backend, config, sync, dry_run)
        }
        Commands::Push { commit_id, remote } => {
            let commit_id = CommitId::or_head(commit_id.as_deref());
            let remote = resolve_remote(remote.as_deref(), config);

            let pushed = ops::push_all(backend, &remote, &commit_id, dry_run)
                .with_context(|| format!("Failed to push tags to '{}'", remote))?;
            if pushed.is_empty() {
                ui::display_warning(&format!("No service tags on {}", commit_id));
                return Ok(());
            }
            ui::display_tags(&format!("Pushed to {}:", remote), &pushed, dry_run);
            Ok(())
        }
        Commands::List { services, all } => {
            let filter = if *all || services.is_empty() {
                ServiceFilter::All
            } else {
                ServiceFilter::Only(services.clone())
            };
            let infos = ops::list_service_tags(backend, &filter).context("Failed to list tags")?;
            ui::display_tag_infos(&infos);
            Ok(())
        }
        Commands::Sync { state_file } => {
            let path = state_file.clone().unwrap_or_else(|| config.state_file());
            if dry_run {
                ui::display_status(&format!("[dry run] would sync {}", path.display()));
                return Ok(());
            }
            sync_file(backend, config, path)
        }
        Commands::Init {
            filename,
            services,
            force,
        } => init_command(config, filename.as_ref(), services, *force, dry_run),
    }
}

fn resolve_remote(flag: Option<&str>, config: &Config) -> RemoteAddr {
    RemoteAddr::new(flag.unwrap_or(&config.remote))
}

fn sync_after<B: TagBackend>(backend: &B, config: &Config, args: &SyncArgs, dry_run: bool) -> Result<()> {
    if !args.sync {
        return Ok(());
    }
    if dry_run {
        warn!("dry run, state file not synced");
        return Ok(());
    }
    let path = args.state_file.clone().unwrap_or_else(|| config.state_file());
    sync_file(backend, config, path)
}

fn sync_file<B: TagBackend>(backend: &B, config: &Config, path: PathBuf) -> Result<()> {
    info!(path = %path.display(), "syncing state file");
    let state = ops::sync_state_file(backend, &path, config.state.format)
        .with_context(|| format!("Failed to sync state file '{}'", path.display()))?;
    ui::display_success(&format!("Synced {}", path.display()));
    ui::display_state(&path, &state);
    Ok(())
}
