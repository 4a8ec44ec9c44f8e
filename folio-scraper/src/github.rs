use std::collections::{HashMap, HashSet};

use futures::future::join_all;

use folio_core::model::{GithubData, GithubRepo, GithubUser};

use crate::client::get_json;
use crate::config::GithubConfig;
use crate::error::FetchError;

const API_BASE: &str = "https://api.github.com";

/// One API page covers every repository the site would ever show.
const REPO_PAGE_SIZE: &str = "100";

/// Topic chips rendered per repository card.
const MAX_TOPICS: usize = 3;

/// Fetch the GitHub catalog: profile, popular repositories, pinned set.
///
/// A missing owner short-circuits to an empty catalog with no network calls.
/// Individual request failures degrade to an absent profile, an empty list,
/// or a dropped pin, and are only logged.
pub async fn fetch(client: &reqwest::Client, config: &GithubConfig) -> GithubData {
    let Some(owner) = config.owner.as_deref() else {
        log::debug!("github: no owner configured, skipping");
        return GithubData::default();
    };

    let user = match fetch_user(client, owner).await {
        Ok(user) => Some(user),
        Err(e) => {
            log::warn!("github: user lookup for '{owner}' failed: {e}");
            None
        }
    };

    let repos = match fetch_repos(client, owner).await {
        Ok(repos) => repos,
        Err(e) => {
            log::warn!("github: repository list for '{owner}' failed: {e}");
            Vec::new()
        }
    };

    // Qualified pins live under other accounts and need per-repo lookups
    let (_, qualified) = partition_pins(&config.pins);
    let lookups = qualified
        .iter()
        .map(|(owner, name)| fetch_repo(client, owner, name));
    let mut fetched = HashMap::new();
    for (result, (owner, name)) in join_all(lookups).await.into_iter().zip(&qualified) {
        match result {
            Ok(repo) => {
                fetched.insert(format!("{owner}/{name}"), repo);
            }
            Err(e) => log::warn!("github: pinned repo {owner}/{name} failed: {e}"),
        }
    }

    let (pinned_repos, repos) = split_repos(&config.pins, repos, fetched);

    GithubData {
        user,
        repos,
        pinned_repos,
    }
}

async fn fetch_user(client: &reqwest::Client, owner: &str) -> Result<GithubUser, FetchError> {
    get_json(client, &format!("{API_BASE}/users/{owner}"), &[]).await
}

async fn fetch_repos(
    client: &reqwest::Client,
    owner: &str,
) -> Result<Vec<GithubRepo>, FetchError> {
    get_json(
        client,
        &format!("{API_BASE}/users/{owner}/repos"),
        &[
            ("sort", "stars"),
            ("direction", "reverse"),
            ("per_page", REPO_PAGE_SIZE),
        ],
    )
    .await
}

async fn fetch_repo(
    client: &reqwest::Client,
    owner: &str,
    name: &str,
) -> Result<GithubRepo, FetchError> {
    get_json(client, &format!("{API_BASE}/repos/{owner}/{name}"), &[]).await
}

/// Split a pin list into plain names and qualified `owner/name` pairs.
pub(crate) fn partition_pins(pins: &[String]) -> (Vec<&str>, Vec<(&str, &str)>) {
    let mut simple = Vec::new();
    let mut qualified = Vec::new();
    for pin in pins {
        match pin.split_once('/') {
            Some((owner, name)) => qualified.push((owner, name)),
            None => simple.push(pin.as_str()),
        }
    }
    (simple, qualified)
}

/// Assemble the pinned and general lists from the owner's repositories plus
/// independently fetched qualified pins.
///
/// Pinned repos keep the order of the pin list. The general list keeps the
/// API's popularity order, drops anything already pinned, and drops forks
/// and repos without a description. Topic lists are capped on both sides.
pub(crate) fn split_repos(
    pins: &[String],
    mut repos: Vec<GithubRepo>,
    mut fetched: HashMap<String, GithubRepo>,
) -> (Vec<GithubRepo>, Vec<GithubRepo>) {
    for repo in &mut repos {
        repo.topics.truncate(MAX_TOPICS);
    }

    let mut pinned = Vec::new();
    for pin in pins {
        if pin.contains('/') {
            if let Some(mut repo) = fetched.remove(pin) {
                repo.topics.truncate(MAX_TOPICS);
                pinned.push(repo);
            }
        } else if let Some(repo) = repos.iter().find(|r| r.name == *pin) {
            pinned.push(repo.clone());
        } else {
            log::warn!("github: pinned repo '{pin}' is not in the repository list");
        }
    }

    let pinned_ids: HashSet<u64> = pinned.iter().map(|r| r.id).collect();
    let general = repos
        .into_iter()
        .filter(|r| !pinned_ids.contains(&r.id) && !r.fork && has_description(r))
        .collect();

    (pinned, general)
}

fn has_description(repo: &GithubRepo) -> bool {
    repo.description.as_deref().is_some_and(|d| !d.is_empty())
}

#[cfg(test)]
#[path = "tests/github_tests.rs"]
mod tests;
