
use common_test_utils::temp_state_path;
use pancam::{AppError, ConfigStore, PrivacyState};
use std::fs;

#[test]
fn missing_file_means_not_private() {
    let store = ConfigStore::new(temp_state_path("missing"));
    assert_eq!(store.load("front"), PrivacyState { is_private: false });
}

#[test]
fn corrupt_files_mean_not_private() {
    let corrupt_contents: [&[u8]; 4] = [
        b"[[[ not an ini",
        b"is_private = true\n",
        b"[front]\nthis line has no separator\n",
        &[0xff, 0xfe, 0x00, 0x9f],
    ];
    for (idx, contents) in corrupt_contents.iter().enumerate() {
        let path = temp_state_path(&format!("corrupt{}", idx));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        assert!(!ConfigStore::new(&path).load("front").is_private, "contents #{}", idx);
    }
}

#[test]
fn non_boolean_value_means_not_private() {
    let path = temp_state_path("nonbool");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "[front]\nis_private = perhaps\n").unwrap();
    assert!(!ConfigStore::new(&path).load("front").is_private);
}

#[test]
fn save_then_load_round_trips() {
    let store = ConfigStore::new(temp_state_path("roundtrip"));
    store.save("front", true).unwrap();
    assert!(ConfigStore::new(store.path()).load("front").is_private);
    store.save("front", false).unwrap();
    assert!(!ConfigStore::new(store.path()).load("front").is_private);
}

#[test]
fn camera_names_are_case_insensitive() {
    let store = ConfigStore::new(temp_state_path("case"));
    store.save("Front-Door", true).unwrap();
    assert!(store.load("front-door").is_private);
    assert!(store.load("FRONT-DOOR").is_private);
}

#[test]
fn saving_one_camera_leaves_another_alone() {
    let store = ConfigStore::new(temp_state_path("isolation"));
    store.save("a", true).unwrap();
    store.save("b", false).unwrap();
    assert!(store.load("a").is_private);
    store.save("b", true).unwrap();
    store.save("b", false).unwrap();
    assert!(store.load("a").is_private);
    assert!(!store.load("b").is_private);
}

#[test]
fn save_writes_version_and_keeps_unknown_sections() {
    let path = temp_state_path("preserve");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "[General]\nversion = 1\n\n[legacy]\nzoom = 4\n").unwrap();

    ConfigStore::new(&path).save("front", true).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("[General]\nversion = 1\n"), "{}", text);
    assert!(text.contains("[legacy]\nzoom = 4\n"), "{}", text);
    assert!(text.contains("[front]\nis_private = true\n"), "{}", text);
}

#[test]
fn save_creates_parent_directory_and_version_marker() {
    let path = temp_state_path("fresh");
    assert!(!path.parent().unwrap().exists());

    ConfigStore::new(&path).save("front", false).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("[General]\nversion = 1\n"), "{}", text);
    assert!(!path.with_file_name("pan-camera.ini.tmp").exists());
}

#[test]
fn save_over_unrecognised_lines_keeps_them() {
    let path = temp_state_path("recover");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "garbage without sections").unwrap();

    let store = ConfigStore::new(&path);
    store.save("front", true).unwrap();
    assert!(store.load("front").is_private);
    assert!(fs::read_to_string(&path).unwrap().starts_with("garbage without sections\n"));
}

#[test]
fn continuation_lines_in_other_sections_do_not_cost_other_cameras_their_flag() {
    let path = temp_state_path("continuation");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        &path,
        "[General]\nversion = 1\n\n[back]\nis_private = true\n\n[legacy]\nnotes = line one\n    line two\n",
    )
    .unwrap();

    let store = ConfigStore::new(&path);
    assert!(store.load("back").is_private);
    store.save("front", true).unwrap();

    assert!(store.load("back").is_private);
    assert!(store.load("front").is_private);
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("[legacy]\nnotes = line one\n    line two\n"), "{}", text);
}

#[test]
fn comments_survive_a_rewrite() {
    let path = temp_state_path("comments");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "# written by hand\n[back]\n; keep me\nis_private = false\n").unwrap();

    ConfigStore::new(&path).save("back", true).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("# written by hand\n"), "{}", text);
    assert!(text.contains("[back]\n; keep me\nis_private = true\n"), "{}", text);
}

#[test]
fn save_refuses_to_replace_a_file_it_cannot_read() {
    let path = temp_state_path("binary");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let contents: [u8; 4] = [0xff, 0xfe, 0x00, 0x9f];
    fs::write(&path, contents).unwrap();

    let store = ConfigStore::new(&path);
    assert!(matches!(store.save("front", true), Err(AppError::StateFormat(_))));
    assert!(!store.load("front").is_private);
    assert_eq!(fs::read(&path).unwrap(), contents);
}
