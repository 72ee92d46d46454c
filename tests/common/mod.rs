use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

pub fn run_demo_insights(args: &[&str]) -> Output {
    TestEnv::new().run(args)
}

pub struct TestEnv {
    home: TempDir,
    config: TempDir,
    workdir: TempDir,
    envs: Vec<(String, String)>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temporary HOME dir"),
            config: tempfile::tempdir().expect("create temporary XDG config dir"),
            workdir: tempfile::tempdir().expect("create temporary working dir"),
            envs: Vec::new(),
        }
    }

    /// Set an environment variable for every subsequent run.
    #[allow(dead_code)]
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Working directory of the spawned binary; also the default export dir.
    #[allow(dead_code)]
    pub fn workdir(&self) -> &Path {
        self.workdir.path()
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_demo-insights"))
            .args(args)
            .current_dir(self.workdir.path())
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.config.path())
            .env_remove("ANTHROPIC_API_KEY")
            .env_remove("DEMO_INSIGHTS_ENDPOINT")
            .env_remove("DEMO_INSIGHTS_MODEL")
            .env_remove("RUST_LOG")
            .envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .output()
            .expect("failed to execute demo-insights binary")
    }

    /// Write a file into the working directory and return its path.
    #[allow(dead_code)]
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.workdir.path().join(name);
        std::fs::write(&path, contents).expect("write test file");
        path
    }

    #[allow(dead_code)]
    pub fn config_path(&self) -> PathBuf {
        let output = self.run(&["config", "path"]);
        assert!(
            output.status.success(),
            "config path should succeed\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );

        let path = String::from_utf8_lossy(&output.stdout);
        PathBuf::from(path.trim())
    }

    #[allow(dead_code)]
    pub fn write_config(&self, contents: &str) {
        let config_path = self.config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).expect("create config parent directory");
        }
        std::fs::write(&config_path, contents).expect("write config file");
    }
}
