use std::collections::HashMap;

use super::*;

fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    ServerConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn database_url_is_required() {
    assert_eq!(config_from(&[]), Err(ConfigError::Missing { var: "DATABASE_URL" }));
    assert_eq!(config_from(&[("DATABASE_URL", "   ")]), Err(ConfigError::Missing { var: "DATABASE_URL" }));
}

#[test]
fn defaults_apply_when_optional_vars_unset() {
    let cfg = config_from(&[("DATABASE_URL", "postgres://localhost/estate")]).unwrap();
    assert_eq!(cfg.database_url, "postgres://localhost/estate");
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.db_max_connections, DEFAULT_DB_MAX_CONNECTIONS);
    assert_eq!(cfg.admin_seed, None);
}

#[test]
fn numeric_vars_are_parsed() {
    let cfg = config_from(&[("DATABASE_URL", "postgres://x"), ("PORT", "8080"), ("DB_MAX_CONNECTIONS", " 12 ")]).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.db_max_connections, 12);
}

#[test]
fn invalid_port_is_rejected() {
    assert_eq!(
        config_from(&[("DATABASE_URL", "postgres://x"), ("PORT", "eighty")]),
        Err(ConfigError::Invalid { var: "PORT", value: "eighty".to_owned() })
    );
    assert!(config_from(&[("DATABASE_URL", "postgres://x"), ("PORT", "70000")]).is_err());
}

#[test]
fn admin_seed_requires_both_vars() {
    let only_name = config_from(&[("DATABASE_URL", "postgres://x"), ("ADMIN_USERNAME", "admin")]).unwrap();
    assert_eq!(only_name.admin_seed, None);

    let both = config_from(&[
        ("DATABASE_URL", "postgres://x"),
        ("ADMIN_USERNAME", "admin"),
        ("ADMIN_PASSWORD", "hunter2"),
    ])
    .unwrap();
    assert_eq!(both.admin_seed, Some(AdminSeed { username: "admin".to_owned(), password: "hunter2".to_owned() }));
}

#[test]
fn config_error_messages() {
    assert_eq!(ConfigError::Missing { var: "DATABASE_URL" }.to_string(), "DATABASE_URL is required");
    assert_eq!(
        ConfigError::Invalid { var: "PORT", value: "x".to_owned() }.to_string(),
        "invalid PORT: \"x\""
    );
}
