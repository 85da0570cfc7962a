use crate::cache::CacheStore;
use crate::github::GithubClient;
use crate::loc;
use tracing::{debug, info, warn};

/// Account statistics shown in the "GitHub Stats" section.
///
/// Every field stays at zero when the call that fills it fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub repos: u64,
    pub stars: u64,
    pub followers: u64,
    pub commits: u64,
    pub prs: u64,
    pub additions: u64,
    pub deletions: u64,
}

impl Stats {
    pub fn loc_total(&self) -> u64 {
        self.additions.saturating_add(self.deletions)
    }
}

/// Run every statistics call in turn; a failed call only zeroes its own field.
pub async fn fetch_stats(
    client: &GithubClient,
    username: &str,
    cache_store: &CacheStore,
) -> Stats {
    let mut stats = Stats::default();

    match client.user_profile(username).await {
        Ok(profile) => {
            stats.repos = profile.public_repos;
            stats.followers = profile.followers;
        }
        Err(e) => warn!("user profile request failed: {e}"),
    }

    match client.star_count(username).await {
        Ok(stars) => stats.stars = stars,
        Err(e) => warn!("repository list request failed: {e}"),
    }

    match client.commit_count(username).await {
        Ok(commits) => stats.commits = commits,
        Err(e) => warn!("commit search failed: {e}"),
    }

    match client.pr_count(username).await {
        Ok(prs) => stats.prs = prs,
        Err(e) => warn!("pull request search failed: {e}"),
    }

    if !client.has_token() {
        debug!("no token provided, skipping lines-of-code count");
        return stats;
    }

    let mut cache = cache_store.load();
    match loc::total_loc(client, username, &mut cache).await {
        Ok(totals) => {
            info!(hits = totals.hits, misses = totals.misses, "lines-of-code cache");
            stats.additions = totals.additions;
            stats.deletions = totals.deletions;
            if let Err(e) = cache_store.save(&cache) {
                warn!("failed to write lines-of-code cache: {e:#}");
            }
        }
        Err(e) => warn!("lines-of-code count failed: {e}"),
    }

    stats
}
