use std::ffi::OsString;

use clangtool_config::{
    discover_config_path, load_for_dir, with_config_env_lock, CLANGTOOL_CONFIG_ENV_VAR,
};

struct EnvVarGuard {
    key: &'static str,
    previous: Option<OsString>,
}

impl EnvVarGuard {
    fn set(key: &'static str, value: impl Into<OsString>) -> Self {
        let previous = std::env::var_os(key);
        std::env::set_var(key, value.into());
        Self { key, previous }
    }

    fn unset(key: &'static str) -> Self {
        let previous = std::env::var_os(key);
        std::env::remove_var(key);
        Self { key, previous }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => std::env::set_var(self.key, value),
            None => std::env::remove_var(self.key),
        }
    }
}

#[test]
fn visible_name_wins_over_dotfile() {
    with_config_env_lock(|| {
        let _env = EnvVarGuard::unset(CLANGTOOL_CONFIG_ENV_VAR);
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("clangtool.toml"), "").unwrap();
        std::fs::write(dir.path().join(".clangtool.toml"), "").unwrap();

        let found = discover_config_path(dir.path()).unwrap();
        assert_eq!(found, dir.path().join("clangtool.toml"));
    });
}

#[test]
fn dotfile_is_found() {
    with_config_env_lock(|| {
        let _env = EnvVarGuard::unset(CLANGTOOL_CONFIG_ENV_VAR);
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".clangtool.toml"), "").unwrap();

        let found = discover_config_path(dir.path()).unwrap();
        assert_eq!(found, dir.path().join(".clangtool.toml"));
    });
}

#[test]
fn env_var_is_resolved_against_root() {
    with_config_env_lock(|| {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("cfg")).unwrap();
        std::fs::write(
            dir.path().join("cfg/custom.toml"),
            "[compile]\nargs = [\"-DCUSTOM\"]\n",
        )
        .unwrap();
        let _env = EnvVarGuard::set(CLANGTOOL_CONFIG_ENV_VAR, "cfg/custom.toml");

        let (config, path) = load_for_dir(dir.path()).unwrap();
        assert_eq!(path, Some(dir.path().join("cfg/custom.toml")));
        assert_eq!(config.compile.args, vec!["-DCUSTOM"]);
    });
}

#[test]
fn no_config_gives_defaults() {
    with_config_env_lock(|| {
        let _env = EnvVarGuard::unset(CLANGTOOL_CONFIG_ENV_VAR);
        let dir = tempfile::tempdir().unwrap();

        let (config, path) = load_for_dir(dir.path()).unwrap();
        assert!(path.is_none());
        assert!(config.compile.args.is_empty());
    });
}
