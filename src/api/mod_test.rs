use super::{ApiError, Config, Env};
use serial_test::serial;
use std::env;
use std::net::{IpAddr, Ipv4Addr};

#[test]
fn test_config_default_binds_all_interfaces_on_3000() {
    let config = Config::default();
    assert_eq!(config.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    assert_eq!(config.port, 3000);
}

#[test]
#[serial]
fn test_env_from_env_reads_admin_email() {
    unsafe {
        env::set_var("ADMIN_EMAIL", "admin@example.com");
    }

    let loaded = Env::from_env().expect("ADMIN_EMAIL is set");
    assert_eq!(loaded.admin_email, "admin@example.com");

    // Cleanup
    unsafe {
        env::remove_var("ADMIN_EMAIL");
    }
}

#[test]
#[serial]
fn test_env_from_env_fails_when_unset() {
    unsafe {
        env::remove_var("ADMIN_EMAIL");
    }

    let result = Env::from_env();
    assert!(
        matches!(result, Err(ApiError::MissingEnv { ref name }) if name == "ADMIN_EMAIL"),
        "missing ADMIN_EMAIL must be fatal"
    );
}

#[test]
#[serial]
fn test_env_from_env_fails_when_empty() {
    unsafe {
        env::set_var("ADMIN_EMAIL", "");
    }

    assert!(Env::from_env().is_err());

    // Cleanup
    unsafe {
        env::remove_var("ADMIN_EMAIL");
    }
}

#[test]
#[serial]
fn test_env_precedence_cli_over_env() {
    // Precedence: CLI flag > env var
    unsafe {
        env::set_var("ADMIN_EMAIL", "env@example.com");
    }

    let resolved = Env::resolve(Some("cli@example.com".to_string())).unwrap();
    assert_eq!(
        resolved.admin_email, "cli@example.com",
        "CLI flag should override env var"
    );

    let fallback = Env::resolve(None).unwrap();
    assert_eq!(fallback.admin_email, "env@example.com");

    // Cleanup
    unsafe {
        env::remove_var("ADMIN_EMAIL");
    }
}

#[test]
#[serial]
fn test_env_resolve_without_any_source_fails() {
    unsafe {
        env::remove_var("ADMIN_EMAIL");
    }

    assert!(Env::resolve(None).is_err());
    assert!(Env::resolve(Some(String::new())).is_err());
}

#[test]
fn test_missing_env_error_names_variable() {
    let err = ApiError::MissingEnv {
        name: "ADMIN_EMAIL".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Required environment variable ADMIN_EMAIL is not set"
    );
}
