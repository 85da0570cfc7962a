use crate::loc::{LocSource, RepoLoc, RepoSummary};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = "profilefetch";
const ACCEPT_V3: &str = "application/vnd.github.v3+json";
const ACCEPT_COMMIT_SEARCH: &str = "application/vnd.github.cloak-preview+json";

const USER_ID_QUERY: &str = r#"
query ($login: String!) {
    user(login: $login) {
        id
    }
}
"#;

const REPO_LIST_QUERY: &str = r#"
query ($login: String!, $cursor: String) {
    user(login: $login) {
        repositories(first: 100, after: $cursor, ownerAffiliations: [OWNER, COLLABORATOR, ORGANIZATION_MEMBER]) {
            nodes {
                nameWithOwner
                isFork
                defaultBranchRef {
                    target {
                        ... on Commit {
                            history {
                                totalCount
                            }
                        }
                    }
                }
            }
            pageInfo {
                endCursor
                hasNextPage
            }
        }
    }
}
"#;

const HISTORY_QUERY: &str = r#"
query ($owner: String!, $repo: String!, $cursor: String) {
    repository(name: $repo, owner: $owner) {
        defaultBranchRef {
            target {
                ... on Commit {
                    history(first: 100, after: $cursor) {
                        nodes {
                            additions
                            deletions
                            author {
                                user {
                                    id
                                }
                            }
                        }
                        pageInfo {
                            endCursor
                            hasNextPage
                        }
                    }
                }
            }
        }
    }
}
"#;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("GitHub API returned HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("GraphQL reported errors: {0}")]
    GraphQl(String),
    #[error("GraphQL requests need an access token")]
    MissingToken,
    #[error("unknown GitHub user `{0}`")]
    UnknownUser(String),
}

#[derive(Deserialize)]
struct CountObj {
    #[serde(rename = "totalCount")]
    total_count: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
}

#[derive(Deserialize)]
struct RepoStars {
    #[serde(default)]
    stargazers_count: u64,
}

#[derive(Deserialize)]
struct SearchCount {
    #[serde(default)]
    total_count: u64,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

impl PageInfo {
    /// Cursor for the following page, or `None` once the provider says there
    /// is nothing more. A "more pages" flag without a cursor also ends the walk.
    fn next_cursor(self) -> Option<String> {
        if !self.has_next_page {
            return None;
        }
        if self.end_cursor.is_none() {
            warn!("page reported more results but no cursor; stopping pagination");
        }
        self.end_cursor
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Connection<N> {
    #[serde(default = "Vec::new")]
    nodes: Vec<Option<N>>,
    page_info: PageInfo,
}

#[derive(Deserialize)]
struct UserIdData {
    user: Option<UserId>,
}

#[derive(Deserialize)]
struct UserId {
    id: String,
}

#[derive(Deserialize)]
struct RepoListData {
    user: Option<RepoListUser>,
}

#[derive(Deserialize)]
struct RepoListUser {
    repositories: Connection<RepoNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepoNode {
    name_with_owner: String,
    #[serde(default)]
    is_fork: bool,
    default_branch_ref: Option<BranchRef<CountObj>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BranchRef<H> {
    target: Option<CommitTarget<H>>,
}

#[derive(Deserialize)]
struct CommitTarget<H> {
    history: Option<H>,
}

impl RepoNode {
    fn into_summary(self) -> RepoSummary {
        let commit_count = self
            .default_branch_ref
            .and_then(|r| r.target)
            .and_then(|t| t.history)
            .map(|h| h.total_count)
            .unwrap_or(0);

        RepoSummary {
            name_with_owner: self.name_with_owner,
            is_fork: self.is_fork,
            commit_count,
        }
    }
}

#[derive(Deserialize)]
struct HistoryData {
    repository: Option<HistoryRepo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryRepo {
    default_branch_ref: Option<BranchRef<Connection<HistoryNode>>>,
}

#[derive(Deserialize)]
struct HistoryNode {
    #[serde(default)]
    additions: u64,
    #[serde(default)]
    deletions: u64,
    author: Option<CommitAuthor>,
}

#[derive(Deserialize)]
struct CommitAuthor {
    user: Option<UserId>,
}

impl HistoryNode {
    fn authored_by(&self, user_id: &str) -> bool {
        self.author
            .as_ref()
            .and_then(|a| a.user.as_ref())
            .is_some_and(|u| u.id == user_id)
    }
}

#[derive(Clone)]
pub struct GithubClient {
    token: Option<Arc<String>>,
    http: Arc<Client>,
    api_url: Arc<String>,
}

impl GithubClient {
    /// Create a client for `api_url`. An empty token counts as no token.
    pub fn new(api_url: &str, token: Option<String>) -> Result<Self, ApiError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            token: token.filter(|t| !t.is_empty()).map(Arc::new),
            http: Arc::new(http),
            api_url: Arc::new(api_url.trim_end_matches('/').to_string()),
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// REST GET; anything but a 200 is an error.
    async fn rest<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        accept: &str,
    ) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.api_url);
        let mut req = self.http.get(&url).query(query).header(ACCEPT, accept);
        if let Some(token) = &self.token {
            req = req.header(AUTHORIZATION, format!("token {token}"));
        }

        debug!(%url, "GET");
        let resp = req.send().await?;
        let status = resp.status();
        if status != StatusCode::OK {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        Ok(resp.json().await?)
    }

    /// GraphQL POST. `errors` alongside `data` (e.g. SAML-protected org
    /// repositories coming back as `null` nodes) are logged and the data kept;
    /// only a response without `data` is an error.
    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, ApiError> {
        let token = self.token.as_ref().ok_or(ApiError::MissingToken)?;
        let url = format!("{}/graphql", self.api_url);

        let resp = self
            .http
            .post(&url)
            .bearer_auth(token.as_str())
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body: GraphQlResponse<T> = resp.json().await?;
        let messages = body
            .errors
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");

        match body.data {
            Some(data) => {
                if !messages.is_empty() {
                    warn!("GraphQL returned partial data: {messages}");
                }
                Ok(data)
            }
            None if messages.is_empty() => {
                Err(ApiError::GraphQl("response carried no data".to_string()))
            }
            None => Err(ApiError::GraphQl(messages)),
        }
    }

    /// Public repository and follower counts.
    pub async fn user_profile(&self, username: &str) -> Result<UserProfile, ApiError> {
        self.rest(&format!("/users/{username}"), &[], ACCEPT_V3).await
    }

    /// Sum stargazers over the first 100 public repositories.
    pub async fn star_count(&self, username: &str) -> Result<u64, ApiError> {
        let repos: Vec<RepoStars> = self
            .rest(
                &format!("/users/{username}/repos"),
                &[("per_page", "100")],
                ACCEPT_V3,
            )
            .await?;
        Ok(repos.iter().map(|r| r.stargazers_count).sum())
    }

    /// Commits authored by `username`, according to the search API.
    pub async fn commit_count(&self, username: &str) -> Result<u64, ApiError> {
        let q = format!("author:{username}");
        let found: SearchCount = self
            .rest("/search/commits", &[("q", q.as_str())], ACCEPT_COMMIT_SEARCH)
            .await?;
        Ok(found.total_count)
    }

    /// Pull requests opened by `username`, according to the search API.
    pub async fn pr_count(&self, username: &str) -> Result<u64, ApiError> {
        let q = format!("author:{username} type:pr");
        let found: SearchCount = self
            .rest("/search/issues", &[("q", q.as_str())], ACCEPT_V3)
            .await?;
        Ok(found.total_count)
    }
}

impl LocSource for GithubClient {
    async fn user_id(&self, username: &str) -> Result<String, ApiError> {
        let data: UserIdData = self
            .graphql(USER_ID_QUERY, json!({ "login": username }))
            .await?;
        data.user
            .map(|u| u.id)
            .ok_or_else(|| ApiError::UnknownUser(username.to_string()))
    }

    async fn list_repos(&self, username: &str) -> Result<Vec<RepoSummary>, ApiError> {
        let mut repos = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let data: RepoListData = self
                .graphql(
                    REPO_LIST_QUERY,
                    json!({ "login": username, "cursor": cursor }),
                )
                .await?;
            let page = data
                .user
                .ok_or_else(|| ApiError::UnknownUser(username.to_string()))?
                .repositories;

            repos.extend(page.nodes.into_iter().flatten().map(RepoNode::into_summary));

            match page.page_info.next_cursor() {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(repos)
    }

    async fn repo_loc(
        &self,
        owner: &str,
        repo: &str,
        user_id: &str,
    ) -> Result<RepoLoc, ApiError> {
        let mut loc = RepoLoc::default();
        let mut cursor: Option<String> = None;

        loop {
            let data: HistoryData = self
                .graphql(
                    HISTORY_QUERY,
                    json!({ "owner": owner, "repo": repo, "cursor": cursor }),
                )
                .await?;

            // No default branch or an empty repository: nothing to count.
            let Some(history) = data
                .repository
                .and_then(|r| r.default_branch_ref)
                .and_then(|b| b.target)
                .and_then(|t| t.history)
            else {
                break;
            };

            for node in history.nodes.into_iter().flatten() {
                if node.authored_by(user_id) {
                    loc.my_commits = loc.my_commits.saturating_add(1);
                    loc.additions = loc.additions.saturating_add(node.additions);
                    loc.deletions = loc.deletions.saturating_add(node.deletions);
                }
            }

            match history.page_info.next_cursor() {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(loc)
    }
}
