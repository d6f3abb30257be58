//! GitHub REST implementation of [`GraphApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, HeaderMap, HeaderValue};
use tracing::{debug, instrument};

use crate::api::GraphApi;
use crate::error::{GraphError, Result};
use crate::types::{FollowAction, ListKind, ListedUser, MutationStatus, Username};

/// Public GitHub API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the GitHub followers/following endpoints.
///
/// Holds one pooled `reqwest::Client` with the token baked into its default
/// headers, so every request is authenticated as the acting account.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    account: Username,
}

impl GitHubClient {
    /// Build a client for `account`, authenticating with `token`.
    ///
    /// # Arguments
    /// * `base_url` - API root, e.g. [`DEFAULT_API_URL`] or a mock server
    /// * `account` - username whose lists are read
    /// * `token` - personal access token sent as `Authorization: token ...`
    pub fn new(base_url: &str, account: &str, token: &str) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("token {}", token))
            .map_err(|e| GraphError::InvalidToken(e.to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(format!("fu/{}", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            account: account.to_string(),
        })
    }

    /// The account this client acts for.
    pub fn account(&self) -> &str {
        &self.account
    }

    fn list_url(&self, kind: ListKind) -> String {
        format!("{}/users/{}/{}", self.base_url, self.account, kind.as_path())
    }

    fn mutation_url(&self, username: &str) -> String {
        format!("{}/user/following/{}", self.base_url, username)
    }
}

#[async_trait]
impl GraphApi for GitHubClient {
    #[instrument(skip(self))]
    async fn list_page(&self, kind: ListKind, page: u32, per_page: u32) -> Result<Vec<Username>> {
        let url = self.list_url(kind);
        let response = self
            .client
            .get(&url)
            .query(&[("per_page", per_page), ("page", page)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GraphError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        let users: Vec<ListedUser> = serde_json::from_slice(&body)?;
        debug!("Fetched {} {} on page {}", users.len(), kind, page);

        Ok(users.into_iter().map(|user| user.login).collect())
    }

    #[instrument(skip(self))]
    async fn send_mutation(&self, username: &str, action: FollowAction) -> Result<MutationStatus> {
        let url = self.mutation_url(username);
        let request = match action {
            FollowAction::Follow => self.client.put(&url),
            FollowAction::Unfollow => self.client.delete(&url),
        };

        let response = request.header(CONTENT_LENGTH, 0).send().await?;
        let code = response.status().as_u16();
        debug!("{} {} answered {}", action, username, code);

        Ok(MutationStatus::from_code(code))
    }
}
