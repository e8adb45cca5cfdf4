//! Integration tests for Botstrap

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn botstrap() -> Command {
        cargo_bin_cmd!("botstrap")
    }

    /// Write a config pointing at an unreachable server and a temp cache
    /// dir, with `sh` standing in for the bot interpreter.
    fn test_config(temp: &TempDir) -> std::path::PathBuf {
        let cache_dir = temp.path().join("cache");
        let config_path = temp.path().join("config.toml");
        std::fs::write(
            &config_path,
            format!(
                r#"
[server]
url = "http://127.0.0.1:9"
check_timeout_secs = 1
download_timeout_secs = 1

[cache]
dir = "{}"

[runtime]
interpreter = "sh"
interpreter_args = []
"#,
                cache_dir.display()
            ),
        )
        .unwrap();
        config_path
    }

    #[test]
    fn help_displays() {
        botstrap()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Self-updating bot launcher"));
    }

    #[test]
    fn version_displays() {
        botstrap()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("botstrap"));
    }

    #[test]
    fn status_with_empty_cache() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);

        botstrap()
            .args(["--config", config.to_str().unwrap(), "status"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached artifact"));
    }

    #[test]
    fn clean_empty_cache() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);

        botstrap()
            .args(["--config", config.to_str().unwrap(), "clean"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already empty"));
    }

    #[test]
    fn launch_offline_without_cache_exits_one() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);

        botstrap()
            .args(["--config", config.to_str().unwrap(), "launch", "--offline"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No usable artifact"))
            .stderr(predicate::str::contains("server_url"));
    }

    #[test]
    fn launch_unreachable_server_without_cache_exits_one() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);

        botstrap()
            .args(["--config", config.to_str().unwrap(), "launch"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No usable artifact"));
    }

    #[test]
    fn launch_runs_cached_artifact_and_cleans_up() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);

        let cache_dir = temp.path().join("cache");
        std::fs::create_dir_all(&cache_dir).unwrap();
        let artifact = cache_dir.join("bot.js");
        std::fs::write(&artifact, "#!/bin/sh\nexit 0\n").unwrap();

        botstrap()
            .args(["--config", config.to_str().unwrap(), "launch", "--offline"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Bot exited normally"));

        // Lifecycle cleanup must have removed the artifact
        assert!(!artifact.exists());
    }

    #[test]
    fn launch_failing_artifact_exits_one_and_cleans_up() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);

        let cache_dir = temp.path().join("cache");
        std::fs::create_dir_all(&cache_dir).unwrap();
        let artifact = cache_dir.join("bot.js");
        std::fs::write(&artifact, "exit 5\n").unwrap();

        botstrap()
            .args(["--config", config.to_str().unwrap(), "launch", "--offline"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("execution failed"));

        assert!(!artifact.exists());
    }

    #[test]
    fn bad_server_url_is_rejected() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);

        botstrap()
            .args(["--config", config.to_str().unwrap(), "status"])
            .args(["--server", "not-a-url"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid server URL"));
    }
}
