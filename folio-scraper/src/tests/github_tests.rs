use super::*;

use crate::client::build_client;

fn repo(id: u64, name: &str, description: Option<&str>, fork: bool) -> GithubRepo {
    GithubRepo {
        id,
        name: name.to_string(),
        html_url: format!("https://github.com/someone/{name}"),
        description: description.map(str::to_string),
        stargazers_count: 0,
        forks_count: 0,
        language: None,
        topics: Vec::new(),
        fork,
    }
}

#[test]
fn test_partition_pins() {
    let pins = vec!["folio".to_string(), "upstream/tool".to_string()];
    let (simple, qualified) = partition_pins(&pins);
    assert_eq!(simple, vec!["folio"]);
    assert_eq!(qualified, vec![("upstream", "tool")]);
}

#[test]
fn test_partition_pins_empty() {
    let (simple, qualified) = partition_pins(&[]);
    assert!(simple.is_empty());
    assert!(qualified.is_empty());
}

#[test]
fn test_pins_keep_pin_order_and_leave_the_general_list() {
    let pins = vec!["foo".to_string(), "bar/baz".to_string()];
    let repos = vec![
        repo(1, "zulu", Some("a tool"), false),
        repo(2, "foo", Some("the good one"), false),
    ];
    let mut fetched = HashMap::new();
    fetched.insert("bar/baz".to_string(), repo(3, "baz", Some("external"), false));

    let (pinned, general) = split_repos(&pins, repos, fetched);
    let pinned_names: Vec<&str> = pinned.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(pinned_names, vec!["foo", "baz"]);
    // "foo" qualifies for the general list but is already pinned
    let general_names: Vec<&str> = general.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(general_names, vec!["zulu"]);
}

#[test]
fn test_general_list_drops_forks_and_blank_descriptions() {
    let repos = vec![
        repo(1, "keeper", Some("has words"), false),
        repo(2, "fork", Some("described fork"), true),
        repo(3, "silent", None, false),
        repo(4, "blank", Some(""), false),
    ];

    let (pinned, general) = split_repos(&[], repos, HashMap::new());
    assert!(pinned.is_empty());
    assert_eq!(general.len(), 1);
    assert_eq!(general[0].name, "keeper");
}

#[test]
fn test_unknown_pin_is_dropped() {
    let pins = vec!["ghost".to_string()];
    let repos = vec![repo(1, "real", Some("exists"), false)];

    let (pinned, general) = split_repos(&pins, repos, HashMap::new());
    assert!(pinned.is_empty());
    assert_eq!(general.len(), 1);
}

#[test]
fn test_topic_lists_are_capped() {
    let mut chatty = repo(1, "chatty", Some("topics galore"), false);
    chatty.topics = vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into()];
    let mut ext = repo(2, "ext", Some("external"), false);
    ext.topics = vec!["v".into(), "w".into(), "x".into(), "y".into()];
    let pins = vec!["chatty".to_string(), "other/ext".to_string()];
    let mut fetched = HashMap::new();
    fetched.insert("other/ext".to_string(), ext);

    let (pinned, _) = split_repos(&pins, vec![chatty], fetched);
    assert_eq!(pinned[0].topics, vec!["a", "b", "c"]);
    assert_eq!(pinned[1].topics, vec!["v", "w", "x"]);
}

#[test]
fn test_no_owner_fetches_nothing() {
    let client = build_client().unwrap();
    let data = tokio::runtime::Runtime::new()
        .unwrap()
        .block_on(fetch(&client, &GithubConfig::default()));
    assert!(data.user.is_none());
    assert!(data.repos.is_empty());
    assert!(data.pinned_repos.is_empty());
}
