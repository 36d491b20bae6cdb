use linelog::config::Config;
use linelog::fmt::Color;
use linelog::{ClearMode, Error, InstallOptions, Level};
use std::fs;
use tempfile::TempDir;

#[test]
fn empty_config_uses_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.parse_level(), Level::Info);
    assert!(config.terminal.enabled);
    assert!(config.terminal.colors);
    assert_eq!(config.terminal.time_format, "%H:%M:%S");
    assert_eq!(config.parse_clear_mode(), ClearMode::Auto);
    assert_eq!(config.file_path(), None);
    assert_eq!(config.max_size_bytes().unwrap(), 10 * 1024 * 1024);
    assert_eq!(config.file.max_backups, 3);
    assert_eq!(config.file.max_age_days, 28);
    assert!(config.file.compress);
    assert_eq!(config.install, InstallOptions::default());
}

#[test]
fn full_config_parses() {
    let config = Config::parse(
        r##"
[general]
level = "debug"

[terminal]
colors = false
time_format = "%Y-%m-%d %H:%M:%S"
clear_line = "never"

[file]
path = "/var/log/tool/app.log"
max_size = "512K"
max_backups = 0
max_age_days = 7
compress = false

[colors]
info = "#00ff00"
error = "#ff0000"

[install]
skip_desktop = true
custom_name = "tool-nightly"
"##,
    )
    .unwrap();

    assert_eq!(config.parse_level(), Level::Debug);
    assert!(!config.terminal.colors);
    assert_eq!(config.parse_clear_mode(), ClearMode::Never);
    assert_eq!(
        config.file_path().unwrap(),
        std::path::Path::new("/var/log/tool/app.log")
    );
    assert_eq!(config.max_size_bytes().unwrap(), 512 * 1024);
    assert_eq!(config.file.max_backups, 0);
    assert_eq!(config.file.max_age_days, 7);
    assert!(!config.file.compress);
    assert_eq!(
        config.level_colors(),
        vec![
            (Level::Info, Color::new(0, 255, 0)),
            (Level::Error, Color::new(255, 0, 0)),
        ]
    );
    assert!(config.install.skip_desktop);
    assert_eq!(config.install.custom_name.as_deref(), Some("tool-nightly"));
    assert!(!config.install.skip_wayland_env);
}

#[test]
fn lenient_values_fall_back() {
    let config = Config::parse(
        r##"
[general]
level = "loud"

[terminal]
clear_line = "sometimes"

[file]
max_size = "huge"

[colors]
info = "green"
chatty = "#ffffff"
warn = "#ffaa00"
"##,
    )
    .unwrap();

    assert_eq!(config.parse_level(), Level::Info);
    assert_eq!(config.parse_clear_mode(), ClearMode::Auto);
    assert!(matches!(config.max_size_bytes(), Err(Error::InvalidSize(s)) if s == "huge"));
    assert_eq!(config.max_size_or_default(), 10 * 1024 * 1024);
    assert_eq!(
        config.level_colors(),
        vec![(Level::Warn, Color::new(255, 170, 0))]
    );
}

#[test]
fn clear_mode_aliases() {
    for (value, mode) in [
        ("auto", ClearMode::Auto),
        ("always", ClearMode::Always),
        ("on", ClearMode::Always),
        ("true", ClearMode::Always),
        ("never", ClearMode::Never),
        ("off", ClearMode::Never),
        ("false", ClearMode::Never),
    ] {
        let config = Config::parse(&format!("[terminal]\nclear_line = \"{value}\"")).unwrap();
        assert_eq!(config.parse_clear_mode(), mode, "{value}");
    }
}

#[test]
fn blank_file_path_disables_file_output() {
    let config = Config::parse("[file]\npath = \"   \"").unwrap();
    assert_eq!(config.file_path(), None);
}

#[test]
fn tilde_in_file_path_is_expanded() {
    let config = Config::parse("[file]\npath = \"~/logs/app.log\"").unwrap();
    let path = config.file_path().unwrap();
    assert!(!path.starts_with("~"));
    assert!(path.ends_with("logs/app.log"));
}

#[test]
fn syntax_error_is_reported() {
    let err = Config::parse("[general\nlevel = ").unwrap_err();
    assert!(matches!(err, Error::ConfigParse(_)));
    assert!(err.to_string().starts_with("parse error"));
}

#[test]
fn type_mismatch_is_reported() {
    assert!(Config::parse("[file]\nmax_backups = \"three\"").is_err());
}

#[test]
fn load_from_missing_file_gives_defaults() {
    let tmp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&tmp_dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.parse_level(), Level::Info);
}

#[test]
fn load_from_reads_file() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("linelog.toml");
    fs::write(&path, "[general]\nlevel = \"warn\"\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.parse_level(), Level::Warn);
}

#[test]
fn config_path_ends_with_file_name() {
    if let Ok(path) = Config::get_config_path() {
        assert!(path.ends_with("linelog.toml"));
    }
}

#[test]
fn logger_from_config_wires_outputs() {
    let tmp_dir = TempDir::new().unwrap();
    let log_path = tmp_dir.path().join("out").join("app.log");
    let config = Config::parse(&format!(
        "[general]\nlevel = \"error\"\n[terminal]\nenabled = false\n[file]\npath = \"{}\"\n",
        log_path.display()
    ))
    .unwrap();

    let logger = linelog::Logger::from_config(&config);
    assert_eq!(logger.min_level(), Level::Error);
    assert_eq!(logger.output_count(), 1);

    logger.error("CFG", "written");
    logger.flush().unwrap();
    assert!(fs::read_to_string(&log_path).unwrap().contains("\"written\""));
}

#[test]
fn logger_from_config_with_nothing_enabled() {
    let config = Config::parse("[terminal]\nenabled = false").unwrap();
    assert_eq!(linelog::Logger::from_config(&config).output_count(), 0);
}

#[test]
fn install_options_builder() {
    let opts = InstallOptions::new()
        .skip_desktop(true)
        .custom_name("alt")
        .skip_wayland_env(true);
    assert!(opts.skip_desktop);
    assert!(opts.skip_wayland_env);
    assert_eq!(opts.custom_name.as_deref(), Some("alt"));
}
