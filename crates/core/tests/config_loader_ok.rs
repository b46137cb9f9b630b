use mdrefactor_core::config::loader::ConfigLoader;
use mdrefactor_core::refactor::{IndexFrom, ListNumbering};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn load_full_config_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1

[index]
add_heading_index_from = 2
list_index_handle_method = "Disabled"

[export]
invalid_note_prefix = "untitled"
invalid_folder_prefix = "unnamed"

[logging]
level = "debug"
"#;

    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path)).expect("should load");
    assert_eq!(rc.source.as_deref(), Some(cfg_path.as_path()));
    assert_eq!(rc.index.add_heading_index_from, IndexFrom::Depth(2));
    assert_eq!(rc.index.list_index_handle_method, ListNumbering::Disabled);
    assert_eq!(rc.export.invalid_note_prefix, "untitled");
    assert_eq!(rc.export.invalid_folder_prefix, "unnamed");
    assert_eq!(rc.logging.level, "debug");
    assert!(rc.logging.file.is_none());
}

#[test]
fn missing_tables_use_defaults() {
    let rc = ConfigLoader::from_toml("version = 1\n", Path::new("config.toml")).unwrap();
    assert_eq!(rc.index.add_heading_index_from, IndexFrom::Depth(1));
    assert_eq!(rc.index.list_index_handle_method, ListNumbering::IncreaseFromOne);
    assert_eq!(rc.export.invalid_note_prefix, "invalid_note_title");
    assert_eq!(rc.export.invalid_folder_prefix, "invalid_folder_title");
    assert_eq!(rc.logging.level, "info");
}

#[test]
fn index_from_seven_means_never() {
    let toml = "version = 1\n[index]\nadd_heading_index_from = 7\n";
    let rc = ConfigLoader::from_toml(toml, Path::new("config.toml")).unwrap();
    assert_eq!(rc.index.add_heading_index_from, IndexFrom::Never);
    assert_eq!(rc.format_options().add_heading_index_from, IndexFrom::Never);
}

#[test]
fn unknown_list_method_is_kept() {
    let toml = "version = 1\n[index]\nlist_index_handle_method = \"Continue\"\n";
    let rc = ConfigLoader::from_toml(toml, Path::new("config.toml")).unwrap();
    assert_eq!(rc.index.list_index_handle_method, ListNumbering::Other("Continue".into()));
}

#[test]
fn log_file_tilde_is_expanded() {
    let toml = "version = 1\n[logging]\nfile = \"~/mdr.log\"\n";
    let rc = ConfigLoader::from_toml(toml, Path::new("config.toml")).unwrap();
    let file = rc.logging.file.unwrap();
    assert!(!file.to_string_lossy().starts_with('~'));
    assert!(file.ends_with("mdr.log"));
}
