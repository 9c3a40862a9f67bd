use std::path::Path;
use std::time::Duration;

use formation_shooter::config::*;
use formation_shooter::ConfigError;

#[test]
fn defaults_are_valid() {
    let cfg = GameConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.player_max_x(), 760);
    assert_eq!(cfg.formation_right_bound(), 740);
    assert_eq!(cfg.breach_line(), 500);
    assert_eq!(cfg.projectile_far_edge(), 580);
    assert_eq!(cfg.timing.tick_interval(), Duration::from_millis(16));
}

#[test]
fn empty_document_gives_defaults() {
    let cfg = GameConfig::from_toml_str("").unwrap();
    assert_eq!(cfg, GameConfig::default());
}

#[test]
fn partial_sections_keep_other_defaults() {
    let cfg = GameConfig::from_toml_str(
        r#"
        [formation]
        rows = 3
        speed = 4

        [projectile]
        award = 250
        "#,
    )
    .unwrap();
    assert_eq!(cfg.formation.rows, 3);
    assert_eq!(cfg.formation.speed, 4);
    assert_eq!(cfg.formation.cols, 4);
    assert_eq!(cfg.projectile.award, 250);
    assert_eq!(cfg.projectile.hit_radius, 30);
    assert_eq!(cfg.field, FieldConfig::default());
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = GameConfig::from_toml_str("[field\nwidth = 3").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn unknown_keys_are_rejected() {
    let err = GameConfig::from_toml_str("[player]\nlives = 3").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn empty_formation_is_invalid() {
    let err = GameConfig::from_toml_str("[formation]\ncols = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn oversized_player_margin_is_invalid() {
    let err = GameConfig::from_toml_str("[player]\nmargin = 401").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn zero_speeds_are_invalid() {
    let mut cfg = GameConfig::default();
    cfg.projectile.speed = 0;
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));

    let mut cfg = GameConfig::default();
    cfg.formation.speed = 0;
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn zero_tick_interval_is_invalid() {
    let err = GameConfig::from_toml_str("[timing]\ntick_ms = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = GameConfig::load(Path::new("does/not/exist.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("does/not/exist.toml"));
}

#[test]
fn shipped_config_matches_defaults() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/default.toml");
    let cfg = GameConfig::load(&path).unwrap();
    assert_eq!(cfg, GameConfig::default());
}

// ── overflow bounds ───────────────────────────────────────────────────────────

fn assert_invalid(text: &str) {
    let err = GameConfig::from_toml_str(text).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "{text:?} gave {err:?}");
}

#[test]
fn huge_margins_are_invalid_not_overflowing() {
    assert_invalid("[player]\nmargin = 2000000000\n");
    assert_invalid("[formation]\nedge_margin = 2000000000\n");
    assert_invalid("[player]\nmargin = -1\n");
}

#[test]
fn huge_field_is_invalid() {
    assert_invalid("[field]\nwidth = 2000000000\n");
    assert_invalid("[field]\nheight = 2147483647\n");
}

#[test]
fn formation_outside_coordinate_range_is_invalid() {
    assert_invalid("[formation]\norigin_x = 2000000000\n");
    assert_invalid("[formation]\norigin_y = -2000000000\n");
    assert_invalid("[formation]\ncols = 5000\nrows = 1\nspacing = 1000000\n");
    assert_invalid("[formation]\nspacing = 2000000000\n");
    assert_invalid("[formation]\nspeed = 2147483647\n");
}

#[test]
fn oversized_formation_is_invalid() {
    assert_invalid("[formation]\nrows = 100000\n");
    assert_invalid("[formation]\nrows = 4294967296\ncols = 4294967296\n");
}

#[test]
fn huge_projectile_values_are_invalid() {
    assert_invalid("[projectile]\nspeed = 2147483647\n");
    assert_invalid("[projectile]\nlaunch_y = -2147483648\n");
}

#[test]
fn large_but_bounded_layout_is_valid() {
    let cfg = GameConfig::from_toml_str(&format!(
        "[field]\nwidth = {MAX_COORD}\nheight = {MAX_COORD}\n\
         [formation]\nrows = 100\ncols = 100\nspacing = 1000\n"
    ))
    .unwrap();
    assert_eq!(cfg.formation.rows * cfg.formation.cols, MAX_ENEMIES);
}
