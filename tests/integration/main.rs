//! Integration tests for buildpilot

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn buildpilot() -> Command {
        cargo_bin_cmd!("buildpilot")
    }

    fn in_project(temp: &TempDir, subcommand: &str) -> Command {
        let mut cmd = buildpilot();
        cmd.arg("--project").arg(temp.path()).arg(subcommand);
        cmd
    }

    #[test]
    fn help_displays() {
        buildpilot()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("CMake pipeline driver"));
    }

    #[test]
    fn version_displays() {
        buildpilot()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("buildpilot"));
    }

    #[test]
    fn configure_requires_name_or_list() {
        buildpilot().arg("configure").assert().failure();
    }

    #[test]
    fn generate_fails_without_configurations() {
        let temp = TempDir::new().unwrap();
        in_project(&temp, "generate")
            .assert()
            .failure()
            .stdout(predicate::str::contains("No configuration file found"));
    }

    #[test]
    fn build_fails_without_generated_files() {
        let temp = TempDir::new().unwrap();
        in_project(&temp, "build")
            .assert()
            .failure()
            .stdout(
                predicate::str::contains("No generated build files")
                    .and(predicate::str::contains("Hint:")),
            );
    }

    #[test]
    fn deps_skips_without_conanfile() {
        let temp = TempDir::new().unwrap();
        in_project(&temp, "deps")
            .assert()
            .success()
            .stdout(predicate::str::contains("Found no conanfile"));
    }

    #[test]
    fn init_writes_scripts_and_stamp() {
        let temp = TempDir::new().unwrap();
        in_project(&temp, "init")
            .assert()
            .success()
            .stdout(predicate::str::contains("Project initialized"));

        assert!(temp.path().join("1-configure.sh").is_file());
        assert!(temp.path().join("4-build.sh").is_file());
        assert!(temp.path().join(".buildpilot-version").is_file());
    }

    #[test]
    fn incompatible_version_stamp_is_reported() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".buildpilot-version"), "99.0.0").unwrap();

        in_project(&temp, "generate")
            .assert()
            .failure()
            .stdout(predicate::str::contains("incompatible"));
    }

    #[test]
    fn invalid_local_config_is_reported() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("buildpilot.toml"), "not toml [").unwrap();

        in_project(&temp, "deps")
            .assert()
            .failure()
            .stdout(predicate::str::contains("Invalid configuration"));
    }
}
