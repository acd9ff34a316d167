use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::prelude::*;
use image::{ImageFormat, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

fn diarist(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("diarist").unwrap();
    cmd.env("DIARIST_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn create(home: &Path, title: &str, pin: &str) {
    diarist(home)
        .args(["create", title, "--pin", pin])
        .assert()
        .success();
}

#[test]
fn test_create_and_list() {
    let temp_dir = tempfile::tempdir().unwrap();

    diarist(temp_dir.path())
        .args(["create", "Trip", "--pin", "1234", "--color", "#00ff00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Diary created: Trip"));

    diarist(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Trip"));

    // bare invocation lists as well
    diarist(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Trip"));
}

#[test]
fn test_create_rejects_bad_pin_and_duplicate_title() {
    let temp_dir = tempfile::tempdir().unwrap();

    diarist(temp_dir.path())
        .args(["create", "Trip", "--pin", "12a4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid 4-digit PIN"));

    create(temp_dir.path(), "Trip", "1234");

    diarist(temp_dir.path())
        .args(["create", "trip", "--pin", "9999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_wrong_pin_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    create(temp_dir.path(), "Trip", "1234");

    diarist(temp_dir.path())
        .args(["open", "Trip", "--pin", "0000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wrong PIN!"));
}

#[test]
fn test_write_then_open_shows_entries_in_order() {
    let temp_dir = tempfile::tempdir().unwrap();
    create(temp_dir.path(), "Trip", "1234");

    diarist(temp_dir.path())
        .args(["open", "Trip", "--pin", "1234"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries yet."));

    diarist(temp_dir.path())
        .args(["write", "Trip", "--pin", "1234", "Day", "one"])
        .assert()
        .success();
    diarist(temp_dir.path())
        .args(["write", "1", "--pin", "1234", "Day two"])
        .assert()
        .success();

    diarist(temp_dir.path())
        .args(["open", "trip", "--pin", "1234"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Day one"))
        .stdout(predicate::str::contains("Day two"))
        .stdout(predicate::str::is_match("(?s)Day one.*Day two").unwrap())
        .stdout(predicate::str::contains("No entries yet.").not());

    diarist(temp_dir.path())
        .args(["open", "Trip", "--pin", "1234", "--newest-first"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("(?s)Day two.*Day one").unwrap());
}

#[test]
fn test_write_rejects_blank_text() {
    let temp_dir = tempfile::tempdir().unwrap();
    create(temp_dir.path(), "Trip", "1234");

    diarist(temp_dir.path())
        .args(["write", "Trip", "--pin", "1234", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter some text."));
}

#[test]
fn test_html_output_escapes_markup() {
    let temp_dir = tempfile::tempdir().unwrap();
    create(temp_dir.path(), "Trip", "1234");

    diarist(temp_dir.path())
        .args(["write", "Trip", "--pin", "1234", "<script>alert(1)</script>"])
        .assert()
        .success();

    diarist(temp_dir.path())
        .args(["open", "Trip", "--pin", "1234", "--html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("&lt;script&gt;"))
        .stdout(predicate::str::contains("<script>").not());
}

#[test]
fn test_unknown_diary_redirects_to_listing() {
    let temp_dir = tempfile::tempdir().unwrap();
    create(temp_dir.path(), "Trip", "1234");

    diarist(temp_dir.path())
        .args(["open", "_nosuchid1", "--pin", "1234"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Diary not found"))
        .stdout(predicate::str::contains("Trip"));
}

#[test]
fn test_draw_script_adds_drawing() {
    let temp_dir = tempfile::tempdir().unwrap();
    create(temp_dir.path(), "Sketches", "4321");

    let script = temp_dir.path().join("stroke.txt");
    std::fs::write(&script, "down 10 10\nmove 120 80\nup\n").unwrap();

    diarist(temp_dir.path())
        .args(["draw", "Sketches", "--pin", "4321"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Drawing saved."));

    diarist(temp_dir.path())
        .args(["open", "Sketches", "--pin", "4321", "--html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("data:image/png;base64,"));
}

#[test]
fn test_draw_scales_display_coordinates() {
    let temp_dir = tempfile::tempdir().unwrap();
    create(temp_dir.path(), "Sketches", "4321");

    diarist(temp_dir.path())
        .args(["draw", "Sketches", "--pin", "4321", "--display", "300x200", "-"])
        .write_stdin("touchstart 10 10\ntouchmove 150 100\ntouchend\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Drawing saved."));

    diarist(temp_dir.path())
        .args(["draw", "Sketches", "--pin", "4321", "--display", "0x200", "-"])
        .write_stdin("down 1 1\nmove 5 5\nup\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid display size"));
}

fn write_png(dir: &Path, name: &str, color: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(8, 8, Rgba(color))
        .save_with_format(&path, ImageFormat::Png)
        .unwrap();
    path
}

#[test]
fn test_upload_images_and_audio() {
    let temp_dir = tempfile::tempdir().unwrap();
    create(temp_dir.path(), "Trip", "1234");

    let red = write_png(temp_dir.path(), "red.png", [255, 0, 0, 255]);
    let blue = write_png(temp_dir.path(), "blue.png", [0, 0, 255, 255]);
    let clip = temp_dir.path().join("clip.mp3");
    std::fs::write(&clip, b"ID3\x03\x00fake mp3 frames").unwrap();

    diarist(temp_dir.path())
        .args(["image", "Trip", "--pin", "1234"])
        .arg(&red)
        .arg(&blue)
        .assert()
        .success()
        .stdout(predicate::str::contains("red.png"))
        .stdout(predicate::str::contains("blue.png"));

    diarist(temp_dir.path())
        .args(["audio", "Trip", "--pin", "1234"])
        .arg(&clip)
        .assert()
        .success();

    diarist(temp_dir.path())
        .args(["open", "Trip", "--pin", "1234", "--html"])
        .assert()
        .success()
        .stdout(predicate::function(|out: &str| {
            out.matches("<img src=\"data:image/png;base64,").count() == 2
        }))
        .stdout(predicate::str::contains(
            "<audio controls src=\"data:audio/mpeg;base64,",
        ));
}

#[test]
fn test_audio_rejects_unknown_extension() {
    let temp_dir = tempfile::tempdir().unwrap();
    create(temp_dir.path(), "Trip", "1234");

    let notes = temp_dir.path().join("notes.txt");
    std::fs::write(&notes, "not audio").unwrap();

    diarist(temp_dir.path())
        .args(["audio", "Trip", "--pin", "1234"])
        .arg(&notes)
        .assert()
        .failure()
        .stdout(predicate::str::contains("notes.txt"));
}

#[test]
fn test_draw_rejects_empty_canvas() {
    let temp_dir = tempfile::tempdir().unwrap();
    create(temp_dir.path(), "Sketches", "4321");

    diarist(temp_dir.path())
        .args(["draw", "Sketches", "--pin", "4321", "-"])
        .write_stdin("# nothing drawn\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("The drawing is empty."));
}

#[test]
fn test_theme_toggle_persists() {
    let temp_dir = tempfile::tempdir().unwrap();

    diarist(temp_dir.path())
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("light"));

    diarist(temp_dir.path())
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme set to dark"));

    diarist(temp_dir.path())
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("dark"));
}

#[test]
fn test_config_set_and_get() {
    let temp_dir = tempfile::tempdir().unwrap();

    diarist(temp_dir.path())
        .args(["config", "canvas-width", "320"])
        .assert()
        .success();

    diarist(temp_dir.path())
        .args(["config", "canvas-width"])
        .assert()
        .success()
        .stdout(predicate::str::contains("320"));

    diarist(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("canvas-width = 320"));
}

#[test]
fn test_config_set_rejects_invalid_values() {
    let temp_dir = tempfile::tempdir().unwrap();

    diarist(temp_dir.path())
        .args(["config", "canvas-width", "4000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("canvas-width must be an integer"));

    diarist(temp_dir.path())
        .args(["config", "no-such-key", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));

    diarist(temp_dir.path())
        .args(["config", "canvas-width"])
        .assert()
        .success()
        .stdout(predicate::str::contains("600"));
}
