use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("morphpose_cli_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("output_husky")).unwrap();
    dir
}

fn write_exports(base: &Path) {
    std::fs::write(
        base.join("coordinates_3d_Akita_Sit.csv"),
        "Frame,Bone,X,Y,Z\n0,Tail,0,0,0\n0,Head,0,0,0\n1,Head,0,0,0\n",
    )
    .unwrap();

    std::fs::write(
        base.join("output_husky/coordinates_3d_Husky_Run.csv"),
        "Frame,Bone,X,Y,Z\n0,Spine,0,0,0\n",
    )
    .unwrap();

    std::fs::write(
        base.join("coordinates_2d_Akita_Sit.csv"),
        "Frame,Camera,Bone,X,Y,Focal Length\n0,A,Head,1,2,50\n0,A,Tail,1,2,50\n",
    )
    .unwrap();
}

#[test]
fn test_utils_bones_saves_vocabulary() {
    let base = scratch("bones");
    write_exports(&base);

    Command::cargo_bin("morphpose")
        .unwrap()
        .args(["utils", "bones", "-i"])
        .arg(&base)
        .arg("-o")
        .arg(base.join("bones.json"))
        .assert()
        .success()
        .stdout("Head\nSpine\nTail\n");

    let saved = std::fs::read_to_string(base.join("bones.json")).unwrap();
    assert!(saved.contains(r#""all""#));
    assert!(saved.contains("Spine"));

    std::fs::remove_dir_all(base).unwrap();
}

#[test]
fn test_utils_count() {
    let base = scratch("count");
    write_exports(&base);

    Command::cargo_bin("morphpose")
        .unwrap()
        .args(["utils", "count", "-i"])
        .arg(&base)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Head\t2\n"));

    std::fs::remove_dir_all(base).unwrap();
}

#[test]
fn test_utils_mask() {
    let base = scratch("mask");
    write_exports(&base);

    std::fs::write(
        base.join("bones.json"),
        r#"{"all": ["Head", "Spine", "Tail"]}"#,
    )
    .unwrap();

    Command::cargo_bin("morphpose")
        .unwrap()
        .args(["utils", "mask", "-i"])
        .arg(base.join("coordinates_2d_Akita_Sit.csv"))
        .arg("--bones")
        .arg(base.join("bones.json"))
        .assert()
        .success()
        .stdout("akita: [1, 0, 1]\n");

    std::fs::remove_dir_all(base).unwrap();
}

#[test]
fn test_utils_bones_empty_directory() {
    let base = scratch("bones_empty");

    Command::cargo_bin("morphpose")
        .unwrap()
        .args(["utils", "bones", "-i"])
        .arg(&base)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No 3D exports"));

    std::fs::remove_dir_all(base).unwrap();
}
