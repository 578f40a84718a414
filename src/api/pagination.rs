// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Lazy page-by-page iteration of listing endpoints.
//!
//! ```text
//! page = 1
//!   fetch(page) --Err--> error! ------------------------> end
//!        |
//!        +-- non-2xx --> warn!, no items ----------------> end
//!        |
//!        +-- 2xx --> emit body items (if any)
//!                      |
//!                      v
//!              next_page(headers) -> "N"
//!                absent / blank / junk / N <= page --> end
//!                otherwise page = N, loop
//! ```
//!
//! Pages are only requested once the consumer has drained the previous one.

use futures_util::stream::{self, Stream, StreamExt};
use regex::Regex;
use reqwest::Url;
use reqwest::header::HeaderMap;
use std::future::Future;
use std::sync::OnceLock;
use tracing::{error, trace, warn};

use super::client::PageResponse;
use crate::error::NetworkError;

/// Extracts the raw next-page value from a page's response headers.
pub type NextPage = fn(&HeaderMap) -> Option<String>;

/// GitLab: the `X-Next-Page` header.
#[must_use]
pub fn x_next_page(headers: &HeaderMap) -> Option<String> {
    headers
        .get("X-Next-Page")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn link_next_regex() -> Option<&'static Regex> {
    static REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    REGEX
        .get_or_init(|| Regex::new(r#"<([^>]+)>\s*;\s*rel="next""#).ok())
        .as_ref()
}

/// GitHub: the `page` query parameter of the `Link` header's `rel="next"` URL.
#[must_use]
pub fn link_next_page(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(reqwest::header::LINK)?.to_str().ok()?;
    let next = link_next_regex()?.captures(link)?.get(1)?.as_str();
    let url = Url::parse(next).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .map(|(_, value)| value.into_owned())
}

/// Interprets a raw next-page value.
///
/// Absent, blank, non-numeric and values `<= 1` all mean "no further page".
#[must_use]
pub fn parse_next_page(raw: Option<&str>) -> Option<u32> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|page| *page > 1)
}

/// Drives a paged listing call from page 1 and flattens the pages into one stream.
///
/// A transport error ends the stream (items already yielded stay yielded); a
/// non-success status counts as an empty last page; a page without a body
/// yields nothing but still follows the next-page signal. A next page that
/// does not advance past the current one ends the stream, so no page is
/// fetched twice.
pub fn paginate<T, F, Fut>(fetch: F, next_page: NextPage) -> impl Stream<Item = T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<PageResponse<T>, NetworkError>>,
{
    stream::unfold((Some(1_u32), fetch), move |(page, mut fetch)| async move {
        let page = page?;
        match fetch(page).await {
            Ok(response) => {
                if !response.status().is_success() {
                    warn!(page, status = response.status().as_u16(), "page request failed");
                    return Some((Vec::new(), (None, fetch)));
                }
                let next = parse_next_page(next_page(response.headers()).as_deref())
                    .filter(|next| *next > page);
                let items = response.into_body().unwrap_or_default();
                trace!(page, items = items.len(), next = ?next, "page fetched");
                Some((items, (next, fetch)))
            }
            Err(e) => {
                error!(page, error = %e, "page request failed, stopping pagination");
                None
            }
        }
    })
    .flat_map(stream::iter)
}
