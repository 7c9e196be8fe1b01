// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository access for linting existing commits.

use crate::error::{ClintError, GitError, Result};
use git2::{Oid, Repository as Git2Repo, Sort};
use std::path::Path;

/// Wrapper around git2::Repository exposing commit messages.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            ClintError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open the repository containing `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                ClintError::Git(GitError::NotARepository)
            } else {
                ClintError::Git(GitError::OpenFailed {
                    message: e.message().to_string(),
                })
            }
        })?;

        Ok(Self { inner: repo })
    }

    /// Get the git directory path (.git).
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Get a commit by reference (SHA, branch name, etc.).
    pub fn get_commit(&self, reference: &str) -> Result<git2::Commit<'_>> {
        let invalid = |e: git2::Error| {
            ClintError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        };

        let obj = self.inner.revparse_single(reference).map_err(invalid)?;
        obj.peel_to_commit().map_err(invalid)
    }

    /// Get the id and message of the commit a reference points at.
    pub fn get_commit_message(&self, reference: &str) -> Result<(Oid, String)> {
        let commit = self.get_commit(reference)?;
        let message = commit.message().ok_or_else(|| {
            ClintError::Git(GitError::InvalidReference {
                reference: format!("{}: Invalid message encoding", reference),
            })
        })?;
        Ok((commit.id(), message.to_string()))
    }

    /// Get commits in a range, oldest first.
    ///
    /// `from..to` walks commits reachable from `to` but not from `from`.
    /// A single reference yields just that commit.
    pub fn get_commits_in_range(&self, range: &str) -> Result<Vec<(Oid, String)>> {
        let Some((from, to)) = range.split_once("..") else {
            return Ok(vec![self.get_commit_message(range)?]);
        };

        let walk_failed = |command: &str, e: git2::Error| {
            ClintError::Git(GitError::CommandFailed {
                command: command.to_string(),
                message: e.message().to_string(),
            })
        };

        let to = if to.is_empty() { "HEAD" } else { to };
        let mut revwalk = self.inner.revwalk().map_err(|e| walk_failed("revwalk", e))?;
        revwalk
            .set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)
            .map_err(|e| walk_failed("revwalk.set_sorting", e))?;
        revwalk
            .push(self.get_commit(to)?.id())
            .map_err(|e| walk_failed("revwalk.push", e))?;
        if !from.is_empty() {
            revwalk
                .hide(self.get_commit(from)?.id())
                .map_err(|e| walk_failed("revwalk.hide", e))?;
        }

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result.map_err(|e| walk_failed("revwalk", e))?;
            let commit = self.inner.find_commit(oid).map_err(|e| {
                ClintError::Git(GitError::InvalidReference {
                    reference: format!("{}: {}", oid, e.message()),
                })
            })?;
            let message = commit.message().unwrap_or("").to_string();
            commits.push((oid, message));
        }

        tracing::debug!("Range '{}' holds {} commits", range, commits.len());
        Ok(commits)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use git2::Signature;
    use tempfile::TempDir;

    fn commit(repo: &Git2Repo, message: &str) -> Oid {
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    pub(crate) fn create_test_repo(messages: &[&str]) -> (TempDir, Vec<Oid>) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        let oids = messages.iter().map(|m| commit(&repo, m)).collect();
        (dir, oids)
    }

    #[test]
    fn test_open_repo() {
        let (dir, _) = create_test_repo(&["chore: init"]);
        assert!(Repository::open(dir.path()).is_ok());
    }

    #[test]
    fn test_not_a_repo() {
        let dir = TempDir::new().unwrap();
        let result = Repository::open(dir.path());
        assert!(matches!(
            result,
            Err(ClintError::Git(GitError::NotARepository))
        ));
    }

    #[test]
    fn test_get_commit_message() {
        let (dir, oids) = create_test_repo(&["chore: init", "feat: add login\n\nbody"]);
        let repo = Repository::open(dir.path()).unwrap();

        let (oid, message) = repo.get_commit_message("HEAD").unwrap();
        assert_eq!(oid, oids[1]);
        assert_eq!(message, "feat: add login\n\nbody");

        let (oid, message) = repo.get_commit_message(&oids[0].to_string()).unwrap();
        assert_eq!(oid, oids[0]);
        assert_eq!(message, "chore: init");
    }

    #[test]
    fn test_invalid_reference() {
        let (dir, _) = create_test_repo(&["chore: init"]);
        let repo = Repository::open(dir.path()).unwrap();
        assert!(matches!(
            repo.get_commit_message("does-not-exist"),
            Err(ClintError::Git(GitError::InvalidReference { .. }))
        ));
    }

    #[test]
    fn test_range_is_oldest_first() {
        let (dir, oids) = create_test_repo(&["chore: init", "feat: a", "fix: b"]);
        let repo = Repository::open(dir.path()).unwrap();

        let range = format!("{}..HEAD", oids[0]);
        let commits = repo.get_commits_in_range(&range).unwrap();
        let messages: Vec<_> = commits.iter().map(|(_, m)| m.as_str()).collect();
        assert_eq!(messages, vec!["feat: a", "fix: b"]);
        assert_eq!(commits[1].0, oids[2]);
    }

    #[test]
    fn test_range_single_reference() {
        let (dir, _) = create_test_repo(&["chore: init", "feat: a"]);
        let repo = Repository::open(dir.path()).unwrap();
        let commits = repo.get_commits_in_range("HEAD").unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].1, "feat: a");
    }

    #[test]
    fn test_range_open_end_defaults_to_head() {
        let (dir, oids) = create_test_repo(&["chore: init", "feat: a"]);
        let repo = Repository::open(dir.path()).unwrap();
        let commits = repo.get_commits_in_range(&format!("{}..", oids[0])).unwrap();
        assert_eq!(commits.len(), 1);
    }
}
