//! Plan, check and leaves integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

const DIAMOND: &str = r#"
[[target]]
name = "app"
outputs = ["app"]
deps = ["left", "right"]
stages = [{ touch = "app" }]

[[target]]
name = "left"
outputs = ["left.o"]
deps = ["base"]
stages = [{ touch = "left.o" }]

[[target]]
name = "right"
outputs = ["right.o"]
deps = ["base"]
stages = [{ touch = "right.o" }]

[[target]]
name = "base"
outputs = ["base.o"]
stages = [{ touch = "base.o" }]
"#;

#[test]
fn plan_lists_waves() {
  let env = TestEnv::new(DIAMOND);

  env
    .autobus_cmd()
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("Wave 3:"))
    .stdout(predicate::str::contains("Stale: 4 of 4"));
}

#[test]
fn plan_json_output() {
  let env = TestEnv::new(DIAMOND);

  let output = env.autobus_cmd().args(["plan", "-o", "json"]).output().unwrap();
  assert!(output.status.success());

  let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(plan["root"], "app");
  let waves = plan["waves"].as_array().unwrap();
  assert_eq!(waves.len(), 3);
  assert_eq!(waves[0][0]["name"], "base");
  assert_eq!(waves[1].as_array().unwrap().len(), 2);
  assert_eq!(waves[2][0]["dependencies"], serde_json::json!(["left", "right"]));
}

#[test]
fn plan_for_named_target() {
  let env = TestEnv::new(DIAMOND);

  env
    .autobus_cmd()
    .args(["plan", "left"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Plan for 'left'"))
    .stdout(predicate::str::contains("right").not());
}

#[test]
fn check_reports_missing_outputs() {
  let env = TestEnv::new(DIAMOND);
  env.write_file("base.o", "");

  env
    .autobus_cmd()
    .arg("check")
    .assert()
    .failure()
    .stderr(predicate::str::contains("left.o"))
    .stderr(predicate::str::contains("base.o").not());
}

#[test]
fn check_passes_after_build() {
  let env = TestEnv::new(DIAMOND);
  env.autobus_cmd().arg("build").assert().success();

  env.autobus_cmd().arg("check").assert().success();
}

#[test]
fn leaves_lists_leaf_targets() {
  let env = TestEnv::new(DIAMOND);

  env
    .autobus_cmd()
    .arg("leaves")
    .assert()
    .success()
    .stdout("base\n");
}

#[test]
fn leaves_with_custom_file() {
  let env = TestEnv::new("");
  env.write_file("sub/other.toml", DIAMOND);

  env
    .autobus_cmd()
    .args(["leaves", "left", "-f", "sub/other.toml"])
    .assert()
    .success()
    .stdout("base\n");
}

const GATED_DOCS: &str = r#"
[[target]]
name = "all"
deps = ["lib", { name = "docs", feature = "docs" }]

[[target]]
name = "lib"
outputs = ["lib.a"]
stages = [{ touch = "lib.a" }]

[[target]]
name = "docs"
outputs = ["docs.html"]
stages = [{ touch = "docs.html" }]
"#;

#[test]
fn check_covers_feature_gated_outputs() {
  let env = TestEnv::new(GATED_DOCS);
  env.autobus_cmd().arg("build").assert().success();

  env.autobus_cmd().arg("check").assert().success();
  env
    .autobus_cmd()
    .args(["check", "--feature", "docs"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("docs.html"));

  env
    .autobus_cmd()
    .args(["build", "--feature", "docs"])
    .assert()
    .success();
  env
    .autobus_cmd()
    .args(["check", "--feature", "docs"])
    .assert()
    .success();
}

#[test]
fn leaves_follow_enabled_features() {
  let env = TestEnv::new(GATED_DOCS);

  env.autobus_cmd().arg("leaves").assert().success().stdout("lib\n");
  env
    .autobus_cmd()
    .args(["leaves", "--feature", "docs"])
    .assert()
    .success()
    .stdout("docs\nlib\n");
}
