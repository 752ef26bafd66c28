//! Layering tests for `load_config` (defaults, TOML file, environment).

use figment::Jail;

use gack_config::{load_config, ConfigError, HandlerConfig, HandlerKind, LEGACY_TOKEN_ENV};

#[test]
fn defaults_without_file() {
    Jail::expect_with(|jail| {
        jail.set_env(LEGACY_TOKEN_ENV, "");
        let config = load_config(None).map_err(|e| e.to_string())?;
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.path, "/");
        assert!(config.auth.tokens.is_empty());
        assert_eq!(config.handlers, vec![HandlerConfig::new(HandlerKind::Echo)]);
        Ok(())
    });
}

#[test]
fn file_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env(LEGACY_TOKEN_ENV, "");
        jail.create_file(
            "gack.toml",
            r#"
[server]
port = 8080
path = "/slack/commands"

[auth]
tokens = ["gIkuvaNzQIHg97ATvDxqgjtO", "second"]

[[handlers]]
kind = "clock"
command = "/time"

[[handlers]]
kind = "echo"
"#,
        )?;
        let config = load_config(Some("gack.toml")).map_err(|e| e.to_string())?;
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.path, "/slack/commands");
        assert_eq!(config.auth.tokens.len(), 2);
        assert_eq!(
            config.handlers,
            vec![
                HandlerConfig::new(HandlerKind::Clock).for_command("/time"),
                HandlerConfig::new(HandlerKind::Echo),
            ]
        );
        Ok(())
    });
}

#[test]
fn env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.set_env(LEGACY_TOKEN_ENV, "");
        jail.create_file("gack.toml", "[server]\nport = 8080\n")?;
        jail.set_env("GACK_SERVER_PORT", "9090");
        jail.set_env("GACK_AUTH_TOKENS", "[aaa, bbb]");
        jail.set_env("GACK_LOGGING_LEVEL", "debug");
        let config = load_config(Some("gack.toml")).map_err(|e| e.to_string())?;
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.auth.tokens, vec!["aaa".to_string(), "bbb".to_string()]);
        assert_eq!(config.logging.level, "debug");
        Ok(())
    });
}

#[test]
fn legacy_token_env_is_appended() {
    Jail::expect_with(|jail| {
        jail.create_file("gack.toml", "[auth]\ntokens = [\"aaa\"]\n")?;
        jail.set_env(LEGACY_TOKEN_ENV, "from-env");
        let config = load_config(Some("gack.toml")).map_err(|e| e.to_string())?;
        assert_eq!(
            config.auth.tokens,
            vec!["aaa".to_string(), "from-env".to_string()]
        );
        Ok(())
    });
}

#[test]
fn legacy_token_not_duplicated() {
    Jail::expect_with(|jail| {
        jail.create_file("gack.toml", "[auth]\ntokens = [\"aaa\"]\n")?;
        jail.set_env(LEGACY_TOKEN_ENV, "aaa");
        let config = load_config(Some("gack.toml")).map_err(|e| e.to_string())?;
        assert_eq!(config.auth.tokens, vec!["aaa".to_string()]);
        Ok(())
    });
}

#[test]
fn unknown_key_fails() {
    Jail::expect_with(|jail| {
        jail.set_env(LEGACY_TOKEN_ENV, "");
        jail.create_file("gack.toml", "[server]\nport = 1\nbogus = true\n")?;
        let result = load_config(Some("gack.toml"));
        assert!(matches!(result, Err(ConfigError::Load(_))));
        Ok(())
    });
}

#[test]
fn unknown_handler_kind_fails() {
    Jail::expect_with(|jail| {
        jail.set_env(LEGACY_TOKEN_ENV, "");
        jail.create_file("gack.toml", "[[handlers]]\nkind = \"weather\"\n")?;
        assert!(load_config(Some("gack.toml")).is_err());
        Ok(())
    });
}

#[test]
fn missing_file_fails() {
    Jail::expect_with(|_jail| {
        let result = load_config(Some("nope.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
        Ok(())
    });
}
