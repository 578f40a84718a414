// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use futures_util::stream::{BoxStream, StreamExt};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::{ApiClient, ClientOptions, link_next_page, paginate};
use crate::error::{GithubError, NetworkError};
use crate::git::GitRepository;

const DEFAULT_PAGE_SIZE: u32 = 30;

/// A GitHub organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubOrganization {
    #[serde(rename = "login")]
    pub name: String,
    pub id: u64,
    #[serde(default)]
    pub repos_url: String,
}

/// A repository listed under an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubRepository {
    pub name: String,
    pub full_name: String,
    pub ssh_url: String,
    /// HTTPS clone URL.
    pub clone_url: String,
}

impl From<GithubRepository> for GitRepository {
    fn from(repository: GithubRepository) -> Self {
        Self {
            name: repository.full_name.clone(),
            path: repository.full_name,
            clone_url_ssh: repository.ssh_url,
            clone_url_https: repository.clone_url,
        }
    }
}

/// Client for the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubService {
    client: ApiClient,
    page_size: u32,
}

impl GithubService {
    /// Creates a service for `url`; an empty token sends no `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns a [`NetworkError`] if the URL or the token is not usable.
    pub fn new(url: &str, token: Option<&str>, options: ClientOptions) -> Result<Self, NetworkError> {
        let mut client = ApiClient::new(url, options)?;
        if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
            client = client.with_header("Authorization", &format!("token {token}"))?;
        }
        Ok(Self {
            client,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Sets how many repositories each listing page requests.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// `GET /orgs/{organization}`.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::OrganizationNotFound`] on 404, otherwise a lookup error.
    pub async fn organization(&self, organization: &str) -> Result<GithubOrganization, GithubError> {
        debug!(organization, "Getting organization");
        let unreachable = |e: NetworkError| GithubError::Unreachable {
            organization: organization.to_string(),
            message: e.to_string(),
        };
        let mut url = self.client.endpoint("/orgs", &[]).map_err(unreachable)?;
        url.path_segments_mut()
            .map_err(|()| unreachable(NetworkError::InvalidUrl(self.client.base_url().to_string())))?
            .push(organization);

        let response = self
            .client
            .get_json::<GithubOrganization>(url)
            .await
            .map_err(unreachable)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GithubError::OrganizationNotFound);
        }
        if !status.is_success() {
            warn!(status = status.as_u16(), organization, "Unexpected status fetching GitHub organization");
            return Err(GithubError::OrganizationLookupFailed {
                organization: organization.to_string(),
                status: status.as_u16(),
            });
        }
        response.into_body().ok_or(GithubError::OrganizationNotFound)
    }

    /// Every repository of `organization`, page by page.
    #[must_use]
    pub fn organization_repositories(&self, organization: &str) -> BoxStream<'static, GithubRepository> {
        debug!(organization, "Getting repositories of organization");
        let client = self.client.clone();
        let path = format!("/orgs/{organization}/repos");
        let page_size = self.page_size.to_string();
        paginate(
            move |page| {
                let client = client.clone();
                let path = path.clone();
                let page_size = page_size.clone();
                async move {
                    let page = page.to_string();
                    let url = client.endpoint(&path, &[("per_page", page_size.as_str()), ("page", page.as_str())])?;
                    client.get_json::<Vec<GithubRepository>>(url).await
                }
            },
            link_next_page,
        )
        .boxed()
    }
}
