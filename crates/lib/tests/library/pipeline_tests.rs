use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use autobus_lib::driver::{BuildOptions, build_target, plan};
use autobus_lib::execute::{CommandRunner, ExecuteConfig};
use autobus_lib::manifest::load_manifest;
use autobus_lib::path::OsFileSystem;
use autobus_lib::target::TargetState;
use tempfile::TempDir;

const BUILD_FILE: &str = r#"
[[target]]
name = "bundle"
inputs = ["parts/*.part"]
outputs = ["bundle.stamp"]
deps = ["parts"]
stages = [{ touch = "bundle.stamp" }]

[[target]]
name = "parts"
inputs = ["seed.txt"]
outputs = ["parts/a.part", "parts/b.part"]
stages = [[{ touch = "parts/a.part" }, { touch = "parts/b.part" }]]
"#;

fn backdate(path: &Path) {
  File::options()
    .write(true)
    .open(path)
    .unwrap()
    .set_modified(SystemTime::now() - Duration::from_secs(3600))
    .unwrap();
}

fn options() -> BuildOptions {
  BuildOptions {
    force: false,
    execute: ExecuteConfig {
      parallelism: 2,
      ..Default::default()
    },
  }
}

#[tokio::test]
async fn loads_and_builds_from_disk() {
  let temp = TempDir::new().unwrap();
  std::fs::create_dir(temp.path().join("parts")).unwrap();
  std::fs::write(temp.path().join("seed.txt"), "seed").unwrap();
  backdate(&temp.path().join("seed.txt"));
  let build_file = temp.path().join("autobus.toml");
  std::fs::write(&build_file, BUILD_FILE).unwrap();

  let mut manifest = load_manifest(&build_file, &BTreeSet::new()).unwrap();
  let root = manifest.resolve_target(None).unwrap();
  let runner = Arc::new(CommandRunner::new(&options().execute));

  let report = build_target(&mut manifest.graph, root, &runner, &OsFileSystem, &options())
    .await
    .unwrap();

  assert!(report.is_success(), "{:?}", report.failed);
  assert_eq!(report.built, vec!["parts", "bundle"]);
  assert!(temp.path().join("parts/a.part").exists());
  assert!(temp.path().join("bundle.stamp").exists());
  assert_eq!(manifest.graph[root].state(), TargetState::Done);
}

#[tokio::test]
async fn plan_reflects_files_on_disk() {
  let temp = TempDir::new().unwrap();
  std::fs::create_dir(temp.path().join("parts")).unwrap();
  std::fs::write(temp.path().join("seed.txt"), "seed").unwrap();
  backdate(&temp.path().join("seed.txt"));
  std::fs::write(temp.path().join("parts/a.part"), "").unwrap();
  std::fs::write(temp.path().join("parts/b.part"), "").unwrap();
  let build_file = temp.path().join("autobus.toml");
  std::fs::write(&build_file, BUILD_FILE).unwrap();

  let manifest = load_manifest(&build_file, &BTreeSet::new()).unwrap();
  let root = manifest.resolve_target(Some("bundle")).unwrap();

  let plan = plan(&manifest.graph, root, &OsFileSystem).unwrap();

  assert_eq!(plan.waves.len(), 2);
  assert_eq!(plan.waves[0][0].name, "parts");
  assert!(!plan.waves[0][0].stale);
  assert_eq!(plan.waves[1][0].name, "bundle");
  assert!(plan.waves[1][0].stale);
}
