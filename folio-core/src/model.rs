use serde::{Deserialize, Serialize};

/// Everything the site needs at render time, produced once per build.
///
/// The field names and nesting are the contract with the page templates;
/// the same document is what gets persisted to the build cache.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildData {
    pub github: GithubData,
    pub youtube: YoutubeData,
    pub sawthat: SawthatData,
}

/// GitHub catalog: profile plus the featured and general repository lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GithubData {
    pub user: Option<GithubUser>,
    pub repos: Vec<GithubRepo>,
    pub pinned_repos: Vec<GithubRepo>,
}

/// A repository record in the shape the GitHub REST API returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubRepo {
    pub id: u64,
    pub name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    /// Consumed while filtering the general list; the site never reads it.
    #[serde(default, skip_serializing)]
    pub fork: bool,
}

/// Profile fields shown in the site header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubUser {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
    pub created_at: String,
    pub public_repos: u64,
    pub followers: u64,
}

/// YouTube catalog: channel metadata plus the most recent uploads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YoutubeData {
    pub channel: Option<YoutubeChannel>,
    pub videos: Vec<YoutubeVideo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoutubeChannel {
    pub name: String,
    pub description: String,
    pub url: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoutubeVideo {
    pub id: String,
    pub title: String,
    pub published: String,
    pub thumbnail: String,
}

/// Concert catalog from sawthat.cc.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SawthatData {
    pub bands: Vec<Band>,
}

/// One band with its concert history, in the order the service returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Band {
    pub id: String,
    pub band: String,
    /// Default band picture, the artwork fallback for its concerts.
    pub picture: String,
    pub concerts: Vec<Concert>,
}

/// A single concert. The service supplies `date` (day-month-year text) and
/// `location`; the remaining fields are filled in by enrichment and stay
/// absent from the JSON when enrichment could not resolve them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concert {
    pub date: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// A background color in Oklab terms plus the legibility flag the page uses
/// to pick foreground text. Derived from artwork, never hand-authored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub l: f64,
    pub a: f64,
    pub b: f64,
    #[serde(rename = "isLight")]
    pub is_light: bool,
}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
