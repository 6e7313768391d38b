use assert_cmd::Command;
use git2::{Repository, RepositoryInitOptions, Signature, Time};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A `vcsfacts` command isolated from the user's config and environment.
fn vcsfacts(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vcsfacts").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("VCSFACTS_LOG")
        .env_remove("VCSFACTS_DIRTY_IF_UNTRACKED")
        .env_remove("VCSFACTS_RENAMES_FROM_REWRITES")
        .env_remove("VCSFACTS_INCLUDE_SUBMODULES")
        .env_remove("VCSFACTS_TIMEOUT_MS");
    cmd
}

/// Repository with one commit on `master`.
fn repo_with_commit() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("master");
    let repo = Repository::init_opts(dir.path(), &opts).unwrap();
    fs::write(dir.path().join("README"), "hello\n").unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new("README")).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = Signature::new("Test User", "test@example.com", &Time::new(1_000, 0)).unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
        .unwrap();
    dir
}

#[test]
fn test_default_attributes() {
    let repo = repo_with_commit();
    let home = tempfile::tempdir().unwrap();
    vcsfacts(home.path())
        .arg(repo.path())
        .assert()
        .success()
        .stdout("branch=master\ndirty=false\n");
}

#[test]
fn test_untracked_file_and_ignore_flag() {
    let repo = repo_with_commit();
    let home = tempfile::tempdir().unwrap();
    fs::write(repo.path().join("a.txt"), "new\n").unwrap();

    vcsfacts(home.path())
        .current_dir(repo.path())
        .args(["-a", "dirty"])
        .assert()
        .success()
        .stdout("dirty=true\n");

    vcsfacts(home.path())
        .current_dir(repo.path())
        .args(["-a", "dirty", "--ignore-untracked"])
        .assert()
        .success()
        .stdout("dirty=false\n");
}

#[test]
fn test_json_output() {
    let repo = repo_with_commit();
    let home = tempfile::tempdir().unwrap();
    let output = vcsfacts(home.path())
        .arg(repo.path())
        .args(["-a", "vcs,branch,added", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"vcs": "git", "branch": "master", "added": 0})
    );
}

#[test]
fn test_not_a_repository_exits_1_silently() {
    let dir = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();
    vcsfacts(home.path())
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_unknown_attribute_exits_2() {
    let repo = repo_with_commit();
    let home = tempfile::tempdir().unwrap();
    vcsfacts(home.path())
        .arg(repo.path())
        .args(["-a", "branch,bookmark"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Unknown attribute: bookmark"));
}

#[test]
fn test_config_file_selects_attributes() {
    let repo = repo_with_commit();
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("facts.toml");
    fs::write(&config, "attributes = [\"vcs\", \"tag\"]\n").unwrap();
    vcsfacts(home.path())
        .arg(repo.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout("vcs=git\ntag=\n");
}

#[test]
fn test_missing_config_file_is_an_error() {
    let repo = repo_with_commit();
    let home = tempfile::tempdir().unwrap();
    vcsfacts(home.path())
        .arg(repo.path())
        .args(["--config", "/nonexistent/vcsfacts.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_env_overrides_defaults() {
    let repo = repo_with_commit();
    let home = tempfile::tempdir().unwrap();
    fs::write(repo.path().join("a.txt"), "new\n").unwrap();
    vcsfacts(home.path())
        .arg(repo.path())
        .args(["-a", "dirty"])
        .env("VCSFACTS_DIRTY_IF_UNTRACKED", "false")
        .assert()
        .success()
        .stdout("dirty=false\n");
}

#[test]
fn test_all_lists_every_attribute_in_order() {
    let repo = repo_with_commit();
    let home = tempfile::tempdir().unwrap();
    let output = vcsfacts(home.path())
        .arg(repo.path())
        .arg("--all")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let names: Vec<&str> = stdout
        .lines()
        .map(|line| line.split('=').next().unwrap())
        .collect();
    assert_eq!(names.len(), 22);
    assert_eq!(names[0], "vcs");
    assert_eq!(names[2], "branch");
    assert_eq!(names[21], "has-untracked");
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let repo = repo_with_commit();
    let home = tempfile::tempdir().unwrap();
    vcsfacts(home.path())
        .arg(repo.path())
        .args(["-a", "branch", "-v"])
        .assert()
        .success()
        .stdout("branch=master\n")
        .stderr(predicate::str::contains("resolved lookup set"));
}
