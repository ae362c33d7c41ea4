//! Build command integration tests.

use std::time::SystemTime;

use predicates::prelude::*;

use super::common::{TestEnv, set_mtime};

const STAMP: &str = r#"
[[target]]
name = "stamp"
inputs = ["src/input.txt"]
outputs = ["out/stamp"]
stages = [{ touch = "out/stamp" }]
"#;

#[test]
fn builds_missing_output() {
  let env = TestEnv::new(STAMP);
  env.write_old_file("src/input.txt", "hello");
  std::fs::create_dir_all(env.path("out")).unwrap();

  env
    .autobus_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Built 1 target(s)"));

  assert!(env.path("out/stamp").exists());
}

#[test]
fn second_build_is_up_to_date() {
  let env = TestEnv::new(STAMP);
  env.write_old_file("src/input.txt", "hello");
  std::fs::create_dir_all(env.path("out")).unwrap();

  env.autobus_cmd().arg("build").assert().success();
  env
    .autobus_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("'stamp' is up to date"));
}

#[test]
fn newer_input_triggers_rebuild() {
  let env = TestEnv::new(STAMP);
  env.write_old_file("src/input.txt", "hello");
  std::fs::create_dir_all(env.path("out")).unwrap();
  env.autobus_cmd().arg("build").assert().success();

  set_mtime(
    &env.path("src/input.txt"),
    SystemTime::now() + std::time::Duration::from_secs(3600),
  );

  env
    .autobus_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Built 1 target(s)"));
}

#[test]
fn force_rebuilds_current_target() {
  let env = TestEnv::new(STAMP);
  env.write_old_file("src/input.txt", "hello");
  std::fs::create_dir_all(env.path("out")).unwrap();
  env.autobus_cmd().arg("build").assert().success();

  env
    .autobus_cmd()
    .args(["build", "--force"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Built 1 target(s)"));
}

#[test]
fn dry_run_leaves_files_alone() {
  let env = TestEnv::new(STAMP);
  env.write_old_file("src/input.txt", "hello");

  env
    .autobus_cmd()
    .args(["build", "--dry-run"])
    .assert()
    .success()
    .stderr(predicate::str::contains("Dry run"));

  assert!(!env.path("out/stamp").exists());
}

#[test]
fn builds_dependencies_first() {
  let env = TestEnv::new(
    r#"
[[target]]
name = "app"
inputs = ["lib.a"]
outputs = ["app"]
deps = ["lib"]
stages = [{ touch = "app" }]

[[target]]
name = "lib"
inputs = ["lib.c"]
outputs = ["lib.a"]
stages = [{ touch = "lib.a" }]
"#,
  );
  env.write_old_file("lib.c", "int x;");

  env
    .autobus_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Built 2 target(s)"))
    .stdout(predicate::str::is_match("(?s)lib.*app").unwrap());

  assert!(env.path("lib.a").exists());
  assert!(env.path("app").exists());
}

#[test]
fn feature_selects_gated_dependency() {
  let env = TestEnv::new(
    r#"
[[target]]
name = "all"
deps = [{ name = "docs", feature = "docs" }]

[[target]]
name = "docs"
outputs = ["docs.html"]
stages = [{ touch = "docs.html" }]
"#,
  );

  env.autobus_cmd().arg("build").assert().success();
  assert!(!env.path("docs.html").exists());

  env
    .autobus_cmd()
    .args(["build", "--feature", "docs"])
    .assert()
    .success();
  assert!(env.path("docs.html").exists());
}

#[test]
fn missing_output_fails_build() {
  let env = TestEnv::new(
    r#"
[[target]]
name = "liar"
outputs = ["never.txt"]
"#,
  );

  env
    .autobus_cmd()
    .arg("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("was not generated"));
}

#[cfg(unix)]
#[test]
fn runs_shell_commands_in_build_file_directory() {
  let env = TestEnv::new(
    r#"
[[target]]
name = "greet"
outputs = ["greeting.txt"]
stages = [
  "echo hello > part1.txt",
  ["echo a > a.txt", "echo b > b.txt"],
  "cat part1.txt a.txt b.txt > greeting.txt",
]
"#,
  );

  env.autobus_cmd().args(["build", "-j", "2"]).assert().success();

  let greeting = std::fs::read_to_string(env.path("greeting.txt")).unwrap();
  assert_eq!(greeting, "hello\na\nb\n");
}

#[cfg(unix)]
#[test]
fn failing_checked_command_stops_build() {
  let env = TestEnv::new(
    r#"
[[target]]
name = "broken"
outputs = ["never.txt"]
stages = [
  { cmd = "exit 3", check = true },
  { touch = "never.txt" },
]
"#,
  );

  env
    .autobus_cmd()
    .arg("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Target 'broken' failed"));

  assert!(!env.path("never.txt").exists());
}
