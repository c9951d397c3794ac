//! End-to-end tests driving the binary inside scratch directories.
//!
//! Every test runs with its own working directory so the default
//! `public/...` paths never touch the repository.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("slidegen");
    cmd.current_dir(dir).env_remove("SLIDEGEN_CONFIG");
    cmd
}

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("public")).unwrap();
    dir
}

fn assert_slide(path: &Path, background: [u8; 3]) {
    let img = image::open(path).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (1200, 800));
    assert_eq!(img.get_pixel(0, 0).0, background);
    assert_eq!(img.get_pixel(1199, 799).0, background);
}

#[test]
fn missing_subcommand_exits_with_error() {
    let dir = scratch("slidegen_cli_usage");
    cmd(&dir).assert().failure().stderr(predicate::str::contains("Usage"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_config_exits_with_error() {
    let dir = scratch("slidegen_cli_no_config");
    cmd(&dir)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invalid_config_exits_with_error() {
    let dir = scratch("slidegen_cli_bad_config");
    std::fs::write(dir.join("public/config.json"), "{not json").unwrap();
    cmd(&dir)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn config_mode_renders_every_node_image() {
    let dir = scratch("slidegen_cli_config");
    std::fs::write(
        dir.join("public/config.json"),
        r#"{"nodes": {
            "A": {"images": ["/images/a.png"]},
            "B": {"images": ["/images/b1.png", "/images/b2.png"]}
        }}"#,
    )
    .unwrap();

    cmd(&dir)
        .arg("config")
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved:"))
        .stderr(predicate::str::contains("Generated 3 of 3 images"));

    // First three palette entries: blue, purple, pink.
    assert_slide(&dir.join("public/images/a.png"), [0x3b, 0x82, 0xf6]);
    assert_slide(&dir.join("public/images/b1.png"), [0x8b, 0x5c, 0xf6]);
    assert_slide(&dir.join("public/images/b2.png"), [0xec, 0x48, 0x99]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn config_mode_with_extras() {
    let dir = scratch("slidegen_cli_extras");
    std::fs::write(dir.join("public/config.json"), r#"{"nodes": {}}"#).unwrap();

    cmd(&dir)
        .args(["config", "--with-extras"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Generated 3 of 3 images"));

    assert!(dir.join("public/images/examples/welcome.png").is_file());
    assert!(dir.join("public/images/examples/qa.png").is_file());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn slides_from_settings_end_to_end() {
    let dir = scratch("slidegen_cli_slides");
    std::fs::write(
        dir.join("slidegen.toml"),
        r#"
[[slides]]
file = "slide_2.png"
title = "Intro"
color = [50, 100, 200]
"#,
    )
    .unwrap();

    cmd(&dir)
        .arg("slides")
        .assert()
        .success()
        .stderr(predicate::str::contains("Generated 1 of 1 images"));

    assert_slide(&dir.join("public/images/slide_2.png"), [50, 100, 200]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn builtin_deck_honours_output_dir() {
    let dir = scratch("slidegen_cli_deck");

    cmd(&dir)
        .args(["slides", "--output-dir", "deck"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Generated 34 of 34 images"));

    assert_slide(&dir.join("deck/slide_2.png"), [50, 100, 200]);
    assert_slide(&dir.join("deck/slide_35.png"), [255, 255, 101]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn duplicate_outputs_exit_with_error() {
    let dir = scratch("slidegen_cli_duplicates");
    std::fs::write(
        dir.join("slidegen.toml"),
        r#"
[[slides]]
file = "slide_2.png"
title = "One"
color = [0, 0, 0]

[[slides]]
file = "slide_2.png"
title = "Two"
color = [0, 0, 0]
"#,
    )
    .unwrap();

    cmd(&dir)
        .arg("slides")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate output path"));
    assert!(!dir.join("public/images/slide_2.png").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unwritable_slide_does_not_abort_batch() {
    let dir = scratch("slidegen_cli_partial");
    std::fs::create_dir_all(dir.join("public/images")).unwrap();
    std::fs::write(dir.join("public/images/blocker"), b"not a directory").unwrap();
    std::fs::write(
        dir.join("slidegen.toml"),
        r#"
[[slides]]
file = "blocker/slide_1.png"
title = "Blocked"
color = [0, 0, 0]

[[slides]]
file = "slide_2.png"
title = "Fine"
color = [10, 20, 30]
"#,
    )
    .unwrap();

    cmd(&dir)
        .arg("slides")
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed:").count(1))
        .stderr(predicate::str::contains("render failed").not())
        .stderr(predicate::str::contains("Generated 1 of 2 images"));

    assert_slide(&dir.join("public/images/slide_2.png"), [10, 20, 30]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn builtin_font_fallback_is_quiet_by_default() {
    let dir = scratch("slidegen_cli_no_fonts");
    std::fs::write(
        dir.join("slidegen.toml"),
        r#"
[fonts]
title = []
subtitle = []

[[slides]]
file = "slide_2.png"
title = "Intro"
color = [50, 100, 200]
"#,
    )
    .unwrap();

    cmd(&dir)
        .arg("slides")
        .assert()
        .success()
        .stderr(predicate::str::contains("built-in face").not())
        .stderr(predicate::str::contains("WARN").not());

    cmd(&dir)
        .args(["-v", "slides"])
        .assert()
        .success()
        .stderr(predicate::str::contains("built-in face"));

    assert_slide(&dir.join("public/images/slide_2.png"), [50, 100, 200]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invalid_settings_exit_with_error() {
    let dir = scratch("slidegen_cli_bad_settings");
    std::fs::write(dir.join("custom.toml"), "width = \"wide\"").unwrap();

    cmd(&dir)
        .args(["slides", "--settings", "custom.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Settings error"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn outline_then_config() {
    let dir = scratch("slidegen_cli_outline");
    std::fs::write(dir.join("public/index.md"), "# Deck\n## Intro\n## Outro\n").unwrap();

    cmd(&dir)
        .arg("outline")
        .assert()
        .success()
        .stderr(predicate::str::contains("2 nodes"));
    assert!(dir.join("public/config.json").is_file());

    cmd(&dir).arg("config").assert().success();
    assert!(dir.join("public/images/slide_2.png").is_file());
    assert!(dir.join("public/images/slide_3.png").is_file());
    let _ = std::fs::remove_dir_all(&dir);
}
