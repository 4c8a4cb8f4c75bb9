// Panel discovery tests.

use super::*;
use std::fs;

use crate::config::Config;

const DOMAIN_INFO: &str = r#"{
  "data": {
    "domains": [
      {"domain": "b.example", "user": "bob"},
      {"user": "orphan"},
      {"domain": "a.example", "user": "alice"}
    ]
  },
  "metadata": {"result": 1}
}"#;

const USERDATA: &str = "\
a.example: alice==root==main==a.example==/home/alice/public_html==10.0.0.5:80==
a.example.au: alice==root==addon==a.example==/home/alice/au==10.0.0.5:80==
broken.example: bob==root==sub
b.example: bob==root==main==b.example==/home/bob/public_html==10.0.0.5:80==
b.example: bob==root==main==b.example==/home/bob/duplicate==10.0.0.5:80==
no-colon-line==x==y==z==/nowhere
empty.example: carol==root==main==empty.example==  ==10.0.0.5:80==
";

#[test]
fn test_parse_domain_info_skips_entries_without_domain() {
    let domains = parse_domain_info(DOMAIN_INFO).unwrap();
    assert_eq!(domains, vec!["b.example", "a.example"]);
}

#[test]
fn test_parse_domain_info_rejects_garbage() {
    let err = parse_domain_info("--output=jsonpretty get_domain_info").unwrap_err();
    assert!(matches!(err, DiscoveryError::InvalidPayload(_)));
}

#[test]
fn test_parse_domain_info_missing_domains_list() {
    let domains = parse_domain_info(r#"{"data": {}}"#).unwrap();
    assert!(domains.is_empty());
}

#[test]
fn test_parse_userdata_exact_key_match() {
    let roots = parse_userdata_domains(USERDATA);
    assert_eq!(
        roots.get("a.example"),
        Some(&PathBuf::from("/home/alice/public_html"))
    );
    // A longer domain sharing the prefix keeps its own root
    assert_eq!(roots.get("a.example.au"), Some(&PathBuf::from("/home/alice/au")));
}

#[test]
fn test_parse_userdata_first_line_wins() {
    let roots = parse_userdata_domains(USERDATA);
    assert_eq!(
        roots.get("b.example"),
        Some(&PathBuf::from("/home/bob/public_html"))
    );
}

#[test]
fn test_parse_userdata_skips_malformed_lines() {
    let roots = parse_userdata_domains(USERDATA);
    assert!(!roots.contains_key("broken.example"));
    assert!(!roots.contains_key("empty.example"));
    assert!(!roots.keys().any(|k| k.contains("no-colon-line")));
}

#[test]
fn test_detect_prefers_cpanel() {
    let dir = tempfile::tempdir().unwrap();
    let cpanel_dir = dir.path().join("cpanel");
    let directadmin_dir = dir.path().join("directadmin");
    let paths = PanelPaths {
        cpanel_dir: cpanel_dir.clone(),
        directadmin_dir: directadmin_dir.clone(),
    };
    assert_eq!(detect(&paths), PanelChoice::Auto);

    fs::create_dir(&directadmin_dir).unwrap();
    assert_eq!(detect(&paths), PanelChoice::Directadmin);

    fs::create_dir(&cpanel_dir).unwrap();
    assert_eq!(detect(&paths), PanelChoice::Cpanel);
}

#[test]
fn test_from_config_auto_unknown() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        cpanel_dir: dir.path().join("missing-cpanel"),
        directadmin_dir: dir.path().join("missing-directadmin"),
        ..Default::default()
    };
    assert!(matches!(Panel::from_config(&config), Panel::Unknown));
}

#[test]
fn test_from_config_forced_panel() {
    let config = Config {
        panel: PanelChoice::Directadmin,
        ..Default::default()
    };
    let panel = Panel::from_config(&config);
    assert_eq!(panel.name(), "directadmin");

    let config = Config {
        panel: PanelChoice::Cpanel,
        ..Default::default()
    };
    assert_eq!(Panel::from_config(&config).name(), "cpanel");
}

#[tokio::test]
async fn test_unknown_panel_discovery_fails() {
    let err = Panel::Unknown.discover().await.unwrap_err();
    assert!(matches!(err, DiscoveryError::UnknownPanel));
}

#[tokio::test]
async fn test_directadmin_discover_layout() {
    let home = tempfile::tempdir().unwrap();
    for name in ["b.example", "a.example", "sharedip", "suspended", "default"] {
        fs::create_dir_all(home.path().join("alice/domains").join(name)).unwrap();
    }
    fs::create_dir_all(home.path().join("bob/domains/c.example/public_html")).unwrap();
    // Accounts without a domains directory are ignored
    fs::create_dir_all(home.path().join("transfer")).unwrap();
    // Stray files are not domains
    fs::write(home.path().join("alice/domains/notes.txt"), "x").unwrap();

    let source = DirectAdminSource::new(home.path());
    let records = source.discover().await.unwrap();

    let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["a.example", "b.example", "c.example"]);
    assert_eq!(
        records[2].document_root,
        Some(home.path().join("bob/domains/c.example/public_html"))
    );
}

#[tokio::test]
async fn test_directadmin_unreadable_home() {
    let home = tempfile::tempdir().unwrap();
    let source = DirectAdminSource::new(home.path().join("missing"));
    let err = source.discover().await.unwrap_err();
    assert!(matches!(err, DiscoveryError::Unreadable { .. }));
}

#[tokio::test]
async fn test_cpanel_command_failure() {
    let source = CpanelSource::new("false", "/nonexistent/userdatadomains");
    let err = source.discover().await.unwrap_err();
    assert!(matches!(err, DiscoveryError::CommandFailed { .. }));
}

#[tokio::test]
async fn test_cpanel_missing_binary() {
    let source = CpanelSource::new(
        "/nonexistent/bin/whmapi1-does-not-exist",
        "/nonexistent/userdatadomains",
    );
    let err = source.discover().await.unwrap_err();
    assert!(matches!(err, DiscoveryError::CommandFailed { .. }));
}

#[tokio::test]
async fn test_cpanel_non_json_output() {
    // `echo` succeeds but prints its arguments, not JSON
    let source = CpanelSource::new("echo", "/nonexistent/userdatadomains");
    let err = source.discover().await.unwrap_err();
    assert!(matches!(err, DiscoveryError::InvalidPayload(_)));
}

#[cfg(unix)]
#[tokio::test]
async fn test_cpanel_discover_joins_document_roots() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("whmapi1");
    fs::write(
        &script,
        format!("#!/bin/sh\ncat <<'JSON'\n{DOMAIN_INFO}\nJSON\n"),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let userdata = dir.path().join("userdatadomains");
    fs::write(&userdata, USERDATA).unwrap();

    let source = CpanelSource::new(script.to_string_lossy(), &userdata);
    let records = source.discover().await.unwrap();

    assert_eq!(
        records,
        vec![
            DomainRecord::new("a.example", Some(PathBuf::from("/home/alice/public_html"))),
            DomainRecord::new("b.example", Some(PathBuf::from("/home/bob/public_html"))),
        ]
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_cpanel_unreadable_userdata_keeps_domains() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("whmapi1");
    fs::write(
        &script,
        format!("#!/bin/sh\ncat <<'JSON'\n{DOMAIN_INFO}\nJSON\n"),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let source = CpanelSource::new(script.to_string_lossy(), dir.path().join("missing"));
    let records = source.discover().await.unwrap();

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.document_root.is_none()));
}
