use crate::model::{Band, BuildData, Color, Concert, GithubRepo};

#[test]
fn test_color_serializes_with_camel_case_flag() {
    let color = Color {
        l: 0.45,
        a: 0.01,
        b: -0.02,
        is_light: false,
    };
    let json = serde_json::to_value(&color).unwrap();
    assert_eq!(json["isLight"], serde_json::json!(false));
    assert!(json.get("is_light").is_none());
}

#[test]
fn test_unenriched_concert_omits_optional_fields() {
    let concert = Concert {
        date: "15-03-2020".to_string(),
        location: "Berlin".to_string(),
        album: None,
        picture: None,
        color: None,
    };
    let json = serde_json::to_value(&concert).unwrap();
    assert!(json.get("album").is_none());
    assert!(json.get("picture").is_none());
    assert!(json.get("color").is_none());
    assert_eq!(json["date"], "15-03-2020");
}

#[test]
fn test_repo_deserializes_from_api_shape() {
    // Wire JSON carries fork and more; missing topics default to empty
    let json = r#"{
        "id": 42,
        "name": "demo",
        "html_url": "https://github.com/someone/demo",
        "description": null,
        "stargazers_count": 7,
        "forks_count": 1,
        "language": "Rust",
        "fork": true
    }"#;
    let repo: GithubRepo = serde_json::from_str(json).unwrap();
    assert!(repo.fork);
    assert!(repo.topics.is_empty());
    assert_eq!(repo.description, None);

    // fork never reaches the serialized output
    let out = serde_json::to_value(&repo).unwrap();
    assert!(out.get("fork").is_none());
}

#[test]
fn test_build_data_round_trips() {
    let mut data = BuildData::default();
    data.sawthat.bands.push(Band {
        id: "b1".to_string(),
        band: "The Example".to_string(),
        picture: "https://img.example/band.jpg".to_string(),
        concerts: vec![Concert {
            date: "01-01-2024".to_string(),
            location: "Oslo".to_string(),
            album: Some("Debut".to_string()),
            picture: Some("https://img.example/cover.jpg".to_string()),
            color: Some(Color {
                l: 0.7,
                a: 0.0,
                b: 0.1,
                is_light: true,
            }),
        }],
    });

    let json = serde_json::to_string(&data).unwrap();
    let back: BuildData = serde_json::from_str(&json).unwrap();
    assert_eq!(back.sawthat.bands.len(), 1);
    let concert = &back.sawthat.bands[0].concerts[0];
    assert_eq!(concert.album.as_deref(), Some("Debut"));
    assert!(concert.color.unwrap().is_light);
}

#[test]
fn test_default_build_data_has_all_catalogs() {
    let json = serde_json::to_value(BuildData::default()).unwrap();
    assert!(json["github"]["repos"].as_array().unwrap().is_empty());
    assert!(json["github"]["user"].is_null());
    assert!(json["youtube"]["videos"].as_array().unwrap().is_empty());
    assert!(json["sawthat"]["bands"].as_array().unwrap().is_empty());
}
