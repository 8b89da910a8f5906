use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn packlock() -> Command {
    Command::cargo_bin("packlock").unwrap()
}

#[test]
fn generate_key_writes_default_file() {
    let dir = assert_fs::TempDir::new().unwrap();

    packlock()
        .current_dir(dir.path())
        .arg("generate-key")
        .assert()
        .success()
        .stdout(predicate::str::contains("packlock.key"));

    dir.child("packlock.key").assert(predicate::path::exists());
    let len = std::fs::metadata(dir.path().join("packlock.key"))
        .unwrap()
        .len();
    assert_eq!(len, 32);
}

#[test]
fn generate_key_refuses_overwrite() {
    let dir = assert_fs::TempDir::new().unwrap();

    packlock()
        .current_dir(dir.path())
        .arg("generate-key")
        .assert()
        .success();

    let original = std::fs::read(dir.path().join("packlock.key")).unwrap();

    packlock()
        .current_dir(dir.path())
        .arg("generate-key")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    // The original key survived.
    assert_eq!(
        std::fs::read(dir.path().join("packlock.key")).unwrap(),
        original
    );
}

#[test]
fn generate_key_force_overwrites() {
    let dir = assert_fs::TempDir::new().unwrap();

    packlock()
        .current_dir(dir.path())
        .arg("generate-key")
        .assert()
        .success();

    let original = std::fs::read(dir.path().join("packlock.key")).unwrap();

    packlock()
        .current_dir(dir.path())
        .args(["generate-key", "--force"])
        .assert()
        .success();

    assert_ne!(
        std::fs::read(dir.path().join("packlock.key")).unwrap(),
        original
    );
}

#[test]
fn generate_key_custom_output_path() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("keys").create_dir_all().unwrap();

    packlock()
        .current_dir(dir.path())
        .args(["generate-key", "--output", "keys/filekey.key"])
        .assert()
        .success();

    dir.child("keys/filekey.key")
        .assert(predicate::path::exists());
}

#[test]
fn generate_key_unwritable_path_fails() {
    let dir = assert_fs::TempDir::new().unwrap();

    packlock()
        .current_dir(dir.path())
        .args(["generate-key", "--output", "missing-dir/filekey.key"])
        .assert()
        .failure();
}
