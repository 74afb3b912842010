use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_config");
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[test]
fn defaults_point_at_resource_layout() {
    let cfg = HarnessConfig::default();
    assert!(!cfg.animation_dir.as_os_str().is_empty());
    assert!(!cfg.picture_baseline_dir.as_os_str().is_empty());
    cfg.validate().unwrap();
}

#[test]
fn json_overrides_subset_of_fields() {
    let path = scratch("partial.json");
    std::fs::write(&path, r#"{ "picture_dir": "elsewhere/svg" }"#).unwrap();

    let cfg = HarnessConfig::from_json_file(&path).unwrap();
    assert_eq!(cfg.picture_dir, PathBuf::from("elsewhere/svg"));
    assert_eq!(
        cfg.animation_dir,
        HarnessConfig::default().animation_dir
    );
}

#[test]
fn unknown_fields_and_empty_dirs_are_rejected() {
    let path = scratch("unknown.json");
    std::fs::write(&path, r#"{ "lottie_dir": "x" }"#).unwrap();
    assert!(matches!(
        HarnessConfig::from_json_file(&path),
        Err(HarnessError::Config(_))
    ));

    let path = scratch("empty.json");
    std::fs::write(&path, r#"{ "animation_baseline_dir": "" }"#).unwrap();
    assert!(matches!(
        HarnessConfig::from_json_file(&path),
        Err(HarnessError::Config(_))
    ));
}

#[test]
fn missing_file_is_an_error() {
    assert!(HarnessConfig::from_json_file(&scratch("does_not_exist.json")).is_err());
}
