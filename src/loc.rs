//! Lines-of-code accumulation across a user's repositories.
//!
//! Commit history is only walked for repositories whose default-branch commit
//! count moved since the last run; every other repository is answered from
//! the [`LocCache`].

use crate::cache::{CacheEntry, LocCache};
use crate::github::ApiError;
use tracing::{debug, warn};

/// One repository as listed for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSummary {
    pub name_with_owner: String,
    pub is_fork: bool,
    /// Commits on the default branch; 0 when there is none.
    pub commit_count: u64,
}

/// Line changes authored by the user in one repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepoLoc {
    pub additions: u64,
    pub deletions: u64,
    pub my_commits: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocTotals {
    pub additions: u64,
    pub deletions: u64,
    pub hits: usize,
    pub misses: usize,
}

/// Where repository listings and commit histories come from.
#[allow(async_fn_in_trait)]
pub trait LocSource {
    /// Opaque node id used to recognise the user's commits.
    async fn user_id(&self, username: &str) -> Result<String, ApiError>;

    /// Every repository the user owns, collaborates on, or reaches through an
    /// organization, following pagination to the end.
    async fn list_repos(&self, username: &str) -> Result<Vec<RepoSummary>, ApiError>;

    /// Sum of additions/deletions over the default-branch commits authored by
    /// `user_id`.
    async fn repo_loc(&self, owner: &str, repo: &str, user_id: &str) -> Result<RepoLoc, ApiError>;
}

/// Total additions/deletions over all non-fork repositories, refreshing stale
/// cache entries in place.
///
/// Fails only when the user or the repository list cannot be resolved; in that
/// case `cache` has not been touched. A repository whose history cannot be
/// fetched counts as zero for this run and keeps its old entry.
pub async fn total_loc<S: LocSource>(
    source: &S,
    username: &str,
    cache: &mut LocCache,
) -> Result<LocTotals, ApiError> {
    let user_id = source.user_id(username).await?;
    let repos = source.list_repos(username).await?;
    debug!(count = repos.len(), "found repositories");

    let mut totals = LocTotals::default();

    for repo in repos.iter().filter(|r| !r.is_fork) {
        let name = repo.name_with_owner.as_str();

        if let Some(entry) = cache.fresh(name, repo.commit_count) {
            totals.additions = totals.additions.saturating_add(entry.additions);
            totals.deletions = totals.deletions.saturating_add(entry.deletions);
            totals.hits += 1;
            continue;
        }

        let Some((owner, repo_name)) = name.split_once('/') else {
            warn!("skipping repository with unexpected name `{name}`");
            continue;
        };

        totals.misses += 1;
        match source.repo_loc(owner, repo_name, &user_id).await {
            Ok(loc) => {
                debug!(
                    repo = name,
                    additions = loc.additions,
                    deletions = loc.deletions,
                    "counted"
                );
                cache.insert(
                    name,
                    CacheEntry {
                        commit_count: Some(repo.commit_count),
                        additions: loc.additions,
                        deletions: loc.deletions,
                        my_commits: loc.my_commits,
                    },
                );
                totals.additions = totals.additions.saturating_add(loc.additions);
                totals.deletions = totals.deletions.saturating_add(loc.deletions);
            }
            Err(e) => warn!("failed to count lines for {name}: {e}"),
        }
    }

    Ok(totals)
}
