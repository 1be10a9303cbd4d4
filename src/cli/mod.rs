//! Command line surface of the `msgtm` binary.

pub mod orchestration;

use crate::domain::{SemVer, ServiceName};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Manage SERVICE-vX.Y.Z tags for many services in one repository.
#[derive(Parser, Debug)]
#[command(name = "msgtm")]
#[command(about = "Multi-service git tag manager")]
#[command(version)]
pub struct Cli {
    /// Custom configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Preview what would happen without making changes
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Refresh the state file once the command succeeded
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct SyncArgs {
    /// Sync the state file after the command
    #[arg(long)]
    pub sync: bool,

    /// State file to sync (defaults to the configured one)
    #[arg(long)]
    pub state_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Tag services with a fixed version
    Add {
        /// Version to tag, e.g. v0.1.0
        version: SemVer,

        /// Services to tag
        #[arg(short, long, value_delimiter = ',', value_parser = parse_service_name)]
        services: Vec<ServiceName>,

        /// Commit to tag
        #[arg(long)]
        commit_id: Option<String>,

        /// Read service names from a state file
        #[arg(long)]
        from_config_file: Option<PathBuf>,

        #[command(flatten)]
        sync: SyncArgs,
    },

    /// Bump every service's latest tag (patch unless --minor or --major)
    Upgrade {
        #[arg(long, conflicts_with = "major")]
        minor: bool,

        #[arg(long)]
        major: bool,

        /// Upgrade every service, ignoring --services
        #[arg(long)]
        all: bool,

        /// Services to leave out
        #[arg(short, long, value_delimiter = ',', value_parser = parse_service_name)]
        services: Vec<ServiceName>,

        /// Commit to tag
        #[arg(long)]
        commit_id: Option<String>,

        #[command(flatten)]
        sync: SyncArgs,
    },

    /// Delete the service tags on a commit
    Reset {
        /// Commit whose tags are deleted (defaults to HEAD)
        commit_id: Option<String>,

        /// Also delete the tags on the remote
        #[arg(long)]
        origin: bool,

        /// Keep the local tags
        #[arg(long)]
        exclude_local: bool,

        /// Remote to delete from (defaults to the configured one)
        #[arg(long)]
        remote: Option<String>,

        /// Skip confirmation and ignore tags that are already gone
        #[arg(short, long)]
        force: bool,

        #[command(flatten)]
        sync: SyncArgs,
    },

    /// Push the service tags on a commit
    Push {
        /// Commit whose tags are pushed
        #[arg(long)]
        commit_id: Option<String>,

        /// Remote to push to (defaults to the configured one)
        #[arg(long)]
        remote: Option<String>,
    },

    /// List service tags with their commits
    List {
        /// Only these services
        #[arg(short, long, value_delimiter = ',', value_parser = parse_service_name)]
        services: Vec<ServiceName>,

        /// Every service, ignoring --services
        #[arg(long)]
        all: bool,
    },

    /// Record each service's latest and previous tag in the state file
    Sync {
        #[arg(long)]
        state_file: Option<PathBuf>,
    },

    /// Create a state file listing services
    Init {
        /// State file to create (defaults to the configured one)
        #[arg(long)]
        filename: Option<PathBuf>,

        #[arg(short, long, value_delimiter = ',', value_parser = parse_service_name)]
        services: Vec<ServiceName>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_service_name(name: &str) -> Result<ServiceName, String> {
    ServiceName::parse(name).map_err(|e| e.to_string())
}
