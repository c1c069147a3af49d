//! Integration tests for TOML and environment configuration loading.
//!
//! Uses `figment::Jail` for sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use roster_config::{ConfigError, RosterConfig};

fn chain() -> Figment {
    Figment::from(Serialized::defaults(RosterConfig::default()))
        .merge(Toml::file("config.toml"))
        .merge(Env::prefixed("ROSTER_").split("__"))
}

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://hr.example.com/"
timeout_secs = 30
user_agent = "roster-test"

[auth]
keyring_service = "roster-test"
credentials_file = "/tmp/roster/credentials"

[paging]
page_size = 10
lookup_size = 50
bulk_size = 500
"#,
        )?;

        let config = RosterConfig::from_figment(&chain()).map_err(|e| e.to_string())?;

        assert_eq!(config.api.base(), "https://hr.example.com");
        assert_eq!(config.api.timeout_secs, Some(30));
        assert_eq!(config.api.user_agent, "roster-test");
        assert_eq!(config.auth.keyring_service, "roster-test");
        assert_eq!(
            config.auth.credentials_path(),
            Some(std::path::PathBuf::from("/tmp/roster/credentials"))
        );
        assert_eq!(config.paging.page_size, 10);
        assert_eq!(config.paging.lookup_size, 50);
        assert_eq!(config.paging.bulk_size, 500);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[paging]
page_size = 20
",
        )?;

        let config = RosterConfig::from_figment(&chain()).map_err(|e| e.to_string())?;

        assert_eq!(config.paging.page_size, 20);
        assert_eq!(config.paging.lookup_size, 100);
        assert_eq!(config.api.base(), "http://localhost:8080");
        assert!(config.api.timeout_secs.is_none());
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "http://from-toml:8080"
"#,
        )?;
        jail.set_env("ROSTER_API__BASE_URL", "http://from-env:9090");
        jail.set_env("ROSTER_PAGING__BULK_SIZE", "250");

        let config = RosterConfig::from_figment(&chain()).map_err(|e| e.to_string())?;

        assert_eq!(config.api.base(), "http://from-env:9090");
        assert_eq!(config.paging.bulk_size, 250);
        Ok(())
    });
}

#[test]
fn invalid_page_size_is_reported() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[paging]
page_size = 0
",
        )?;

        let err = RosterConfig::from_figment(&chain()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "paging.page_size"
        ));
        Ok(())
    });
}

#[test]
fn wrong_type_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[paging]
page_size = "five"
"#,
        )?;

        let err = RosterConfig::from_figment(&chain()).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}

#[test]
fn load_reads_project_local_file() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".roster")).map_err(|e| e.to_string())?;
        jail.create_file(
            ".roster/config.toml",
            r#"
[api]
base_url = "http://project-local:8080"
"#,
        )?;

        let config = RosterConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.api.base(), "http://project-local:8080");
        Ok(())
    });
}
