use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn memotree() -> Command {
    Command::cargo_bin("memotree").expect("binary")
}

fn setup_repo() -> tempfile::TempDir {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("pkg")).unwrap();
    fs::write(
        root.join("pkg/a.py"),
        "def foo():\n    pass\n\nclass Bar:\n    def m(self):\n        pass\n",
    )
    .unwrap();
    fs::create_dir_all(root.join("__pycache__")).unwrap();
    fs::write(root.join("__pycache__/a.cpython-312.py"), "def cached():\n    pass\n").unwrap();
    temp
}

fn scan_json(root: &Path) -> Value {
    let output = memotree()
        .arg("scan")
        .arg("--root")
        .arg(root)
        .arg("--json")
        .arg("--quiet")
        .output()
        .expect("command run");
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn scan_json_lists_declarations() {
    let temp = setup_repo();
    let catalog = scan_json(temp.path());

    let entry = &catalog["folders"]["pkg"]["a.py"];
    assert_eq!(entry["outline"]["functions"], serde_json::json!(["foo"]));
    assert_eq!(entry["outline"]["classes"][0]["name"], "Bar");
    assert_eq!(entry["outline"]["classes"][0]["methods"], serde_json::json!(["m"]));
}

#[test]
fn scan_excludes_default_segments() {
    let temp = setup_repo();
    let catalog = scan_json(temp.path());

    assert!(catalog["folders"].get("__pycache__").is_none());
}

#[test]
fn scan_text_listing_shows_keys() {
    let temp = setup_repo();
    memotree()
        .arg("scan")
        .arg("--root")
        .arg(temp.path())
        .arg("--keys")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("class Bar:"))
        .stdout(predicate::str::contains("::method::m::Bar"));
}

#[test]
fn scan_missing_root_fails_before_scanning() {
    memotree()
        .arg("scan")
        .arg("--root")
        .arg("/definitely/not/here")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn scan_isolates_bad_files() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("bad.py"), "def broken(:\n    pass\n").unwrap();
    fs::write(temp.path().join("good.py"), "def fine():\n    pass\n").unwrap();

    let catalog = scan_json(temp.path());
    assert!(catalog["folders"]["."]["bad.py"]["diagnostic"].is_string());
    assert_eq!(
        catalog["folders"]["."]["good.py"]["outline"]["functions"],
        serde_json::json!(["fine"])
    );
}

#[test]
fn report_renders_annotation_file() {
    let temp = tempdir().unwrap();
    // keys store canonical absolute paths, so resolve the tempdir first
    let root = temp.path().canonicalize().unwrap();
    let file_path = root.join("pkg").join("a.py");

    let mut annotations = serde_json::Map::new();
    annotations.insert(
        format!("memo_{}::method::m::Bar", file_path.display()),
        Value::from("does x"),
    );
    annotations.insert(
        format!("memo_{}::file::a.py", file_path.display()),
        Value::from("top memo"),
    );
    annotations.insert(
        format!("memo_{}::function::ignored", file_path.display()),
        Value::from("   "),
    );
    annotations.insert("memo_short::file".to_string(), Value::from("dropped"));

    let annotations_path = root.join("annotations.json");
    fs::write(
        &annotations_path,
        serde_json::to_string_pretty(&Value::Object(annotations)).unwrap(),
    )
    .unwrap();

    memotree()
        .arg("report")
        .arg("--annotations")
        .arg(&annotations_path)
        .arg("--quiet")
        .current_dir(&root)
        .assert()
        .success()
        .stdout(predicate::eq(
            "📄 pkg/a.py\n  📌 top memo\n  [CLASS] Bar : \n    └── def m() : does x\n",
        ));
}

#[test]
fn report_writes_output_file() {
    let temp = tempdir().unwrap();
    let root = temp.path().canonicalize().unwrap();

    let mut annotations = serde_json::Map::new();
    annotations.insert(
        format!("memo_{}::function::foo", root.join("a.py").display()),
        Value::from("note"),
    );
    let annotations_path = root.join("annotations.json");
    fs::write(&annotations_path, Value::Object(annotations).to_string()).unwrap();

    let output_path = root.join("report.txt");
    memotree()
        .arg("report")
        .arg("--annotations")
        .arg(&annotations_path)
        .arg("--output")
        .arg(&output_path)
        .arg("--quiet")
        .current_dir(&root)
        .assert()
        .success();

    let report = fs::read_to_string(&output_path).unwrap();
    assert_eq!(report, "📄 a.py\n  [FUNC] foo() : note\n");
}

#[test]
fn report_rejects_non_string_values() {
    let temp = tempdir().unwrap();
    let annotations_path = temp.path().join("annotations.json");
    fs::write(&annotations_path, r#"{"memo_/proj/a.py::function::foo": 7}"#).unwrap();

    memotree()
        .arg("report")
        .arg("--annotations")
        .arg(&annotations_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a string"));
}
