use std::path::PathBuf;

use dirserve::cli::Cli;
use dirserve::config::Config;

use clap::Parser;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.bind, "0.0.0.0");
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.root, PathBuf::from("."));
    assert_eq!(cfg.listen_addr(), "0.0.0.0:8080");
}

#[test]
fn test_config_from_yaml() {
    let cfg = Config::from_yaml("bind: 127.0.0.1\nport: 9000\nroot: /srv/www\n").unwrap();
    assert_eq!(cfg.bind, "127.0.0.1");
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.root, PathBuf::from("/srv/www"));
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let cfg = Config::from_yaml("port: 3000\n").unwrap();
    assert_eq!(cfg.bind, "0.0.0.0");
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.root, PathBuf::from("."));
}

#[test]
fn test_config_rejects_bad_yaml() {
    assert!(Config::from_yaml("port: not-a-port\n").is_err());
}

#[test]
fn test_config_from_missing_file() {
    assert!(Config::from_file(std::path::Path::new("/nonexistent/dirserve.yaml")).is_err());
}

#[test]
fn test_config_ipv6_listen_addr() {
    let cfg = Config {
        bind: "::1".to_string(),
        ..Config::default()
    };
    assert_eq!(cfg.listen_addr(), "[::1]:8080");
}

// All environment handling lives in one test so parallel tests never see
// each other's variables.
#[test]
fn test_config_environment_overrides() {
    unsafe {
        std::env::set_var("DIRSERVE_BIND", "127.0.0.1");
        std::env::set_var("DIRSERVE_PORT", "5000");
        std::env::set_var("DIRSERVE_ROOT", "/tmp");
    }
    let mut cfg = Config::default();
    cfg.apply_env().unwrap();
    assert_eq!(cfg.listen_addr(), "127.0.0.1:5000");
    assert_eq!(cfg.root, PathBuf::from("/tmp"));

    // Flags win over the environment.
    let cli = Cli::try_parse_from(["dirserve", "-p", "7000"]).unwrap();
    let cfg = cli.into_config().unwrap();
    assert_eq!(cfg.port, 7000);
    assert_eq!(cfg.bind, "127.0.0.1");

    unsafe {
        std::env::set_var("DIRSERVE_PORT", "eighty");
    }
    assert!(Config::default().apply_env().is_err());
    assert!(Cli::try_parse_from(["dirserve"]).unwrap().into_config().is_err());

    unsafe {
        std::env::remove_var("DIRSERVE_BIND");
        std::env::remove_var("DIRSERVE_PORT");
        std::env::remove_var("DIRSERVE_ROOT");
    }
    let cfg = Cli::try_parse_from(["dirserve"]).unwrap().into_config().unwrap();
    assert_eq!(cfg, Config::default());
}

#[test]
fn test_cli_flags() {
    let cli = Cli::try_parse_from(["dirserve", "-b", "127.0.0.1", "-p", "9090", "-d", "/var/www"])
        .unwrap();
    assert_eq!(cli.bind.as_deref(), Some("127.0.0.1"));
    assert_eq!(cli.port, Some(9090));
    assert_eq!(cli.directory, Some(PathBuf::from("/var/www")));
}

#[test]
fn test_cli_rejects_unknown_flag() {
    assert!(Cli::try_parse_from(["dirserve", "-x"]).is_err());
}

#[test]
fn test_cli_rejects_bad_port() {
    assert!(Cli::try_parse_from(["dirserve", "-p", "99999"]).is_err());
}
