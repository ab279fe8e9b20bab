use doc_intake::config::Config;
use tempfile::TempDir;

#[test]
fn test_save_and_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.set_backend_url("https://intake.example.com/".into()).unwrap();
    config.set_dismiss_after_secs(10).unwrap();
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.backend_url, "https://intake.example.com");
    assert_eq!(loaded.dismiss_after_secs, 10);
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = Config::load_from(&dir.path().join("config.json")).unwrap();
    assert_eq!(loaded.backend_url, "http://127.0.0.1:8000");
    assert_eq!(loaded.dismiss_after_secs, 4);
}

#[test]
fn test_corrupted_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_hand_edited_zero_dwell_is_clamped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"dismiss_after_secs": 0}"#).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.dismiss_after(), std::time::Duration::from_secs(1));
}
