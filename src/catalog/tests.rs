use super::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const SONGS: &str = r#"[
  {"title": "Alpha", "artist": "One", "file": "alpha.mp3", "img": "https://img/a.jpg"},
  {"title": "Beta", "artist": "Two", "file": "beta.mp3", "img": "https://img/b.jpg"},
  {"title": "Gamma", "artist": "Three", "file": "gamma.mp3"}
]"#;

#[test]
fn parse_keeps_listing_order() {
    let list = parse_track_list(SONGS).unwrap();
    let titles: Vec<&str> = list.tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Beta", "Gamma"]);
    assert_eq!(list.rejected, 0);
    assert_eq!(list.tracks[0].id(), "alpha.mp3");
    assert_eq!(list.tracks[0].artwork.as_deref(), Some("https://img/a.jpg"));
    assert_eq!(list.tracks[2].artwork, None);
}

#[test]
fn parse_filters_invalid_records_and_counts_them() {
    let json = r#"[
      {"title": "Ok", "artist": "A", "file": "ok.mp3"},
      {"title": "No file", "artist": "A"},
      {"title": "   ", "artist": "A", "file": "blank.mp3"},
      {"title": 3, "artist": "A", "file": "num.mp3"},
      "not an object"
    ]"#;
    let list = parse_track_list(json).unwrap();
    assert_eq!(list.tracks.len(), 1);
    assert_eq!(list.tracks[0].title, "Ok");
    assert_eq!(list.rejected, 4);
}

#[test]
fn parse_drops_duplicate_ids() {
    let json = r#"[
      {"title": "First", "artist": "A", "file": "same.mp3"},
      {"title": "Second", "artist": "B", "file": "same.mp3"}
    ]"#;
    let list = parse_track_list(json).unwrap();
    assert_eq!(list.tracks.len(), 1);
    assert_eq!(list.tracks[0].title, "First");
    assert_eq!(list.rejected, 1);
}

#[test]
fn parse_rejects_non_array_document() {
    assert!(parse_track_list(r#"{"title": "x"}"#).is_err());
    assert!(parse_track_list("not json").is_err());
}

#[test]
fn load_catalog_reads_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("songs.json");
    fs::write(&path, SONGS).unwrap();

    let catalog = load_catalog(&path);
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.tracks()[1].id(), "beta.mp3");
    assert_eq!(catalog.rejected(), 0);
}

#[test]
fn load_catalog_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let catalog = load_catalog(&dir.path().join("nope.json"));
    assert!(catalog.is_empty());

    let err = try_load_catalog(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn load_catalog_malformed_file_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("songs.json");
    fs::write(&path, "[{").unwrap();

    assert!(load_catalog(&path).is_empty());
    assert!(matches!(
        try_load_catalog(&path).unwrap_err(),
        CatalogError::Parse(_)
    ));
}

#[test]
fn source_joins_songs_dir_and_file() {
    let list = parse_track_list(SONGS).unwrap();
    assert_eq!(
        list.tracks[1].source_in(Path::new("/srv/songs")),
        Path::new("/srv/songs/beta.mp3")
    );
    assert_eq!(list.tracks[1].display(), "Two - Beta");
}

#[test]
fn serialized_track_uses_catalog_field_names() {
    let list = parse_track_list(SONGS).unwrap();
    let json = serde_json::to_string(&list.tracks[0]).unwrap();
    assert!(json.contains(r#""img":"https://img/a.jpg""#));
    assert!(json.contains(r#""file":"alpha.mp3""#));

    let json = serde_json::to_string(&list.tracks[2]).unwrap();
    assert!(!json.contains("img"));
}

#[test]
fn get_finds_tracks_by_id() {
    let catalog = Catalog::new(parse_track_list(SONGS).unwrap());
    assert_eq!(catalog.get("beta.mp3").map(|t| t.title.as_str()), Some("Beta"));
    assert!(catalog.get("missing.mp3").is_none());
    assert!(catalog.get("Beta").is_none());
}
