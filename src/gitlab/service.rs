// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitLab REST service: group lookup, sub-group resolution, project listing.

use futures_util::future;
use futures_util::stream::{self, BoxStream, StreamExt};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};

use super::types::{GitlabGroup, GitlabProject, GroupSearchMode};
use super::version::GitlabVersion;
use crate::api::{ApiClient, ClientOptions, PageResponse, paginate, x_next_page};
use crate::error::{GitlabError, NetworkError};

/// First GitLab version serving `/groups/{id}/descendant_groups`.
pub const GROUP_DESCENDANTS_VERSION: &str = "13.5";

/// Header carrying a GitLab personal access token.
const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

const DEFAULT_PAGE_SIZE: u32 = 10;
const DEFAULT_CONCURRENCY: usize = 16;

/// Client for one GitLab instance.
#[derive(Debug, Clone)]
pub struct GitlabService {
    client: ApiClient,
    page_size: u32,
    concurrency: usize,
}

impl GitlabService {
    /// Creates a service for `{url}/api/v4`, authenticating when `token` is non-empty.
    ///
    /// # Errors
    ///
    /// Returns a [`NetworkError`] if the URL or the token is not usable.
    pub fn new(url: &str, token: Option<&str>, options: ClientOptions) -> Result<Self, NetworkError> {
        let mut client = ApiClient::new(&format!("{}/api/v4", url.trim_end_matches('/')), options)?;
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            client = client.with_header(PRIVATE_TOKEN_HEADER, token)?;
        }
        Ok(Self {
            client,
            page_size: DEFAULT_PAGE_SIZE,
            concurrency: DEFAULT_CONCURRENCY,
        })
    }

    /// Sets how many elements each listing page requests.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Sets how many project listings run at once; values below 2 are raised to 2.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(2);
        self
    }

    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Resolves the root group designated by `search`.
    ///
    /// # Errors
    ///
    /// Returns [`GitlabError::GroupNotFound`] when nothing matches, or a lookup
    /// error when an id lookup gets an unexpected answer.
    pub async fn find_group_by(
        &self,
        search: &str,
        mode: GroupSearchMode,
    ) -> Result<GitlabGroup, GitlabError> {
        debug!(mode = mode.textual_qualifier(), search, "Looking for group");
        if mode == GroupSearchMode::Id {
            return self.group(search).await;
        }

        let client = self.client.clone();
        let page_size = self.page_size.to_string();
        let search_term = search.to_string();
        let groups = paginate(
            move |page| {
                let client = client.clone();
                let query = [
                    ("search", search_term.clone()),
                    ("all_available", "true".to_string()),
                    ("per_page", page_size.clone()),
                    ("page", page.to_string()),
                ];
                async move {
                    let url = client.endpoint("/groups", &as_pairs(&query))?;
                    client.get_json::<Vec<GitlabGroup>>(url).await
                }
            },
            x_next_page,
        );

        let mut matching = std::pin::pin!(groups.filter(|group| future::ready(mode.matches(group, search))));
        matching.next().await.ok_or(GitlabError::GroupNotFound)
    }

    /// `GET /groups/{id}`.
    async fn group(&self, id: &str) -> Result<GitlabGroup, GitlabError> {
        let unreachable = |e: NetworkError| GitlabError::Unreachable {
            id: id.to_string(),
            message: e.to_string(),
        };
        let mut url = self.client.endpoint("/groups", &[]).map_err(unreachable)?;
        url.path_segments_mut()
            .map_err(|()| unreachable(NetworkError::InvalidUrl(self.client.base_url().to_string())))?
            .push(id);

        let response = self
            .client
            .get_json::<GitlabGroup>(url)
            .await
            .map_err(unreachable)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GitlabError::GroupNotFound);
        }
        if !status.is_success() {
            warn!(status = status.as_u16(), group = id, "Unexpected status fetching GitLab group");
            return Err(GitlabError::GroupLookupFailed {
                id: id.to_string(),
                status: status.as_u16(),
            });
        }
        response.into_body().ok_or(GitlabError::GroupNotFound)
    }

    /// Probes `/version`. Never fails: any problem yields `None`.
    pub async fn probe_version(&self) -> Option<GitlabVersion> {
        let url = self.client.endpoint("/version", &[]).ok()?;
        match self.client.get_json::<GitlabVersion>(url).await {
            Ok(response) if response.status().is_success() => {
                let version = response.into_body()?;
                debug!(url = self.client.base_url(), version = %version, "GitLab server version");
                Some(version)
            }
            Ok(response) if response.status() == StatusCode::UNAUTHORIZED => {
                debug!("Could not detect GitLab server version without a valid token.");
                None
            }
            Ok(response) => {
                warn!(status = response.status().as_u16(), "Unexpected status checking GitLab version");
                None
            }
            Err(e) => {
                warn!(error = %e, "Could not check GitLab version");
                None
            }
        }
    }

    /// Every descendant of `group_id`, using the strategy the server supports.
    pub async fn sub_groups(&self, group_id: &str) -> BoxStream<'static, GitlabGroup> {
        trace!(group = group_id, "Retrieving sub-groups");
        match self.probe_version().await {
            Some(version) if version.is_before(GROUP_DESCENDANTS_VERSION) => {
                trace!(version = %version.version, "Retrieving sub-groups recursively");
                self.sub_groups_recursively(group_id)
            }
            Some(_) => self.descendant_groups(group_id),
            None => {
                trace!("Unknown GitLab version, retrieving sub-groups with descendant API");
                self.descendant_groups(group_id)
            }
        }
    }

    /// Flat listing through `/groups/{id}/descendant_groups`.
    #[must_use]
    pub fn descendant_groups(&self, group_id: &str) -> BoxStream<'static, GitlabGroup> {
        self.listing(format!("/groups/{group_id}/descendant_groups"))
    }

    /// Depth-first walk over `/groups/{id}/subgroups`, emitting each group
    /// before its children.
    #[must_use]
    pub fn sub_groups_recursively(&self, group_id: &str) -> BoxStream<'static, GitlabGroup> {
        let service = self.clone();
        let stack = vec![self.direct_sub_groups(group_id)];
        stream::unfold((service, stack), |(service, mut stack)| async move {
            loop {
                let next = stack.last_mut()?.next().await;
                match next {
                    Some(group) => {
                        stack.push(service.direct_sub_groups(&group.id));
                        return Some((group, (service, stack)));
                    }
                    None => {
                        stack.pop();
                    }
                }
            }
        })
        .boxed()
    }

    fn direct_sub_groups(&self, group_id: &str) -> BoxStream<'static, GitlabGroup> {
        self.listing(format!("/groups/{group_id}/subgroups"))
    }

    /// Projects directly inside one group.
    #[must_use]
    pub fn projects(&self, group_id: &str) -> BoxStream<'static, GitlabProject> {
        trace!(group = group_id, "Retrieving group projects");
        self.listing(format!("/groups/{group_id}/projects"))
    }

    /// Projects of `group` and of all its descendants, merged without ordering.
    ///
    /// A failing listing only ends its own branch.
    pub async fn group_projects(&self, group: &GitlabGroup) -> BoxStream<'static, GitlabProject> {
        debug!(group = %group.full_path, "Searching for projects in group");
        let groups = stream::once(future::ready(group.clone())).chain(self.sub_groups(&group.id).await);
        let service = self.clone();
        groups
            .map(move |group| service.projects(&group.id))
            .flatten_unordered(self.concurrency)
            .boxed()
    }

    fn listing<T>(&self, path: String) -> BoxStream<'static, T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let client = self.client.clone();
        let page_size = self.page_size.to_string();
        paginate(
            move |page| {
                let client = client.clone();
                let path = path.clone();
                let query = [
                    ("all_available", "true".to_string()),
                    ("per_page", page_size.clone()),
                    ("page", page.to_string()),
                ];
                async move {
                    let url = client.endpoint(&path, &as_pairs(&query))?;
                    let response: PageResponse<T> = client.get_json(url).await?;
                    Ok(response)
                }
            },
            x_next_page,
        )
        .boxed()
    }
}

fn as_pairs<'a>(query: &'a [(&'a str, String)]) -> Vec<(&'a str, &'a str)> {
    query.iter().map(|(k, v)| (*k, v.as_str())).collect()
}
