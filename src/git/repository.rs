use crate::domain::{CommitId, RawTag, RemoteAddr};
use crate::error::{MsgtmError, Result};
use crate::git::TagBackend;
use git2::{Cred, CredentialType, ErrorCode, ObjectType, PushOptions, RemoteCallbacks, Repository};
use std::path::Path;

/// Tag backend over a libgit2 repository
pub struct Git2Backend {
    repo: Repository,
}

impl Git2Backend {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)
            .map_err(|e| MsgtmError::backend(format!("Not in a git repository: {}", e)))?;

        Ok(Git2Backend { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Repository) -> Self {
        Git2Backend { repo }
    }

    fn resolve_commit(&self, commit_id: &CommitId) -> Result<git2::Commit<'_>> {
        let object = self.repo.revparse_single(commit_id.as_str()).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                MsgtmError::not_found(format!("commit '{}'", commit_id))
            } else {
                MsgtmError::Git(e)
            }
        })?;
        Ok(object.peel_to_commit()?)
    }

    fn push_refspecs(&self, remote: &RemoteAddr, refspecs: &[String]) -> Result<()> {
        let mut git_remote = self
            .repo
            .find_remote(remote.as_str())
            .map_err(|e| MsgtmError::remote(format!("Cannot find remote '{}': {}", remote, e)))?;

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(remote_callbacks());

        let refspecs: Vec<&str> = refspecs.iter().map(|s| s.as_str()).collect();
        git_remote
            .push(&refspecs, Some(&mut push_options))
            .map_err(|e| match e.class() {
                git2::ErrorClass::Net => {
                    MsgtmError::remote(format!("Network error during push: {}", e))
                }
                _ => MsgtmError::remote(format!("Push to '{}' failed: {}", remote, e)),
            })
    }
}

/// SSH keys from ~/.ssh, then the agent, then default credentials.
fn remote_callbacks<'a>() -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");
        if allowed_types.contains(CredentialType::SSH_KEY) {
            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }
            if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }
        Cred::default()
    });

    // a rejected ref does not fail `push` itself
    callbacks.push_update_reference(|refname, status| match status {
        Some(status) => Err(git2::Error::from_str(&format!(
            "Could not update {}: {}",
            refname, status
        ))),
        None => Ok(()),
    });

    callbacks
}

impl TagBackend for Git2Backend {
    fn list_all_tags(&self) -> Result<Vec<RawTag>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(RawTag::from).collect())
    }

    fn show_tags_at_commit(&self, commit_id: &CommitId) -> Result<Vec<RawTag>> {
        let target = self.resolve_commit(commit_id)?.id();

        let mut tags = Vec::new();
        for reference in self.repo.references_glob("refs/tags/*")? {
            let reference = reference?;
            let Some(name) = reference.name().and_then(|n| n.strip_prefix("refs/tags/")) else {
                continue;
            };
            // tags on trees or blobs cannot match a commit
            match reference.peel_to_commit() {
                Ok(commit) if commit.id() == target => tags.push(RawTag::from(name)),
                _ => {}
            }
        }
        tags.sort();
        Ok(tags)
    }

    fn find_commit_for_tag(&self, tag: &RawTag) -> Result<CommitId> {
        let reference_name = format!("refs/tags/{}", tag);

        match self.repo.find_reference(&reference_name) {
            Ok(reference) => {
                let commit = reference.peel_to_commit()?;
                Ok(CommitId::new(commit.id().to_string()))
            }
            Err(e) if e.code() == ErrorCode::NotFound => {
                Err(MsgtmError::not_found(format!("tag '{}'", tag)))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn create_tag(&self, commit_id: &CommitId, tag: &str, message: Option<&str>) -> Result<()> {
        let commit = self.resolve_commit(commit_id)?;
        let object = commit.as_object();

        let created = match message {
            Some(message) => {
                let tagger = self.repo.signature()?;
                self.repo.tag(tag, object, &tagger, message, false)
            }
            None => self.repo.tag_lightweight(tag, object, false),
        };
        created.map_err(|e| {
            if e.code() == ErrorCode::Exists {
                MsgtmError::backend(format!("tag '{}' already exists", tag))
            } else {
                MsgtmError::backend(format!("Cannot create tag '{}': {}", tag, e))
            }
        })?;

        Ok(())
    }

    fn delete_local_tag(&self, tag: &str, force: bool) -> Result<()> {
        match self.repo.tag_delete(tag) {
            Ok(()) => Ok(()),
            Err(e) if e.code() == ErrorCode::NotFound => {
                if force {
                    Ok(())
                } else {
                    Err(MsgtmError::not_found(format!("tag '{}'", tag)))
                }
            }
            Err(e) => Err(MsgtmError::backend(format!("Cannot delete tag '{}': {}", tag, e))),
        }
    }

    fn delete_remote_tag(&self, remote: &RemoteAddr, tags: &[&str]) -> Result<()> {
        if tags.is_empty() {
            return Ok(());
        }
        let refspecs: Vec<String> = tags.iter().map(|tag| format!(":refs/tags/{}", tag)).collect();
        self.push_refspecs(remote, &refspecs)
    }

    fn push_tags(&self, remote: &RemoteAddr, tags: &[&str]) -> Result<()> {
        if tags.is_empty() {
            return Ok(());
        }
        let refspecs: Vec<String> = tags
            .iter()
            .map(|tag| format!("refs/tags/{}:refs/tags/{}", tag, tag))
            .collect();
        self.push_refspecs(remote, &refspecs)
    }
}
