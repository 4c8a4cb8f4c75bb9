//! Report output tests.

use super::*;
use std::fs;
use std::net::IpAddr;

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

fn scenario_outcomes() -> Vec<DomainOutcome> {
    let mut healthy = DomainOutcome::resolved("b.example", Classification::Healthy, ip("203.0.113.9"));
    healthy.http_status = Some("200".to_string());
    let mut direct = DomainOutcome::resolved("a.example", Classification::Direct, ip("10.0.0.5"));
    direct.http_status = Some("index of".to_string());
    vec![
        direct,
        healthy,
        DomainOutcome::unresolvable("c.example"),
        DomainOutcome::resolved("d.example", Classification::Mismatched, ip("198.51.100.7")),
    ]
}

#[test]
fn test_category_sets_partition() {
    let sets = CategorySets::from_outcomes(&scenario_outcomes());
    assert_eq!(sets.direct, vec!["a.example"]);
    assert_eq!(sets.healthy, vec!["b.example"]);
    assert_eq!(sets.mismatched, vec!["d.example"]);
    assert_eq!(sets.unresolvable, vec!["c.example"]);
    assert_eq!(sets.total(), 4);
}

#[test]
fn test_combined_is_direct_and_healthy_once_each() {
    let mut outcomes = scenario_outcomes();
    outcomes.push(DomainOutcome::resolved(
        "a.example",
        Classification::Direct,
        ip("10.0.0.5"),
    ));
    let sets = CategorySets::from_outcomes(&outcomes);
    assert_eq!(sets.combined(), vec!["a.example", "b.example"]);
}

#[test]
fn test_format_domain_list() {
    assert_eq!(format_domain_list(&[]), "");
    assert_eq!(
        format_domain_list(&["a.example".to_string(), "b.example".to_string()]),
        "a.example\nb.example\n"
    );
}

#[test]
fn test_render_html_rows_and_classes() {
    let html = render_html(&scenario_outcomes());
    assert!(html.contains("<title>Domain Status Report</title>"));
    assert!(html.contains("<tr class=\"direct\">"));
    assert!(html.contains("<tr class=\"healthy\">"));
    assert!(html.contains("<tr class=\"mismatched\">"));
    assert!(html.contains("<tr class=\"no-ping\">"));
    assert!(html.contains("<td>No Ping</td>"));
    assert!(html.contains("<td>index of</td>"));
    // Unresolvable row has neither IP nor status
    assert_eq!(html.matches("<td>N/A</td>").count(), 3);
    assert_eq!(html.matches("<tr class=").count(), 4);
}

#[test]
fn test_render_html_keeps_order() {
    let html = render_html(&scenario_outcomes());
    let a = html.find("a.example").unwrap();
    let b = html.find("b.example").unwrap();
    let c = html.find("c.example").unwrap();
    assert!(a < b && b < c);
}

#[test]
fn test_render_html_escapes_text() {
    let mut outcome = DomainOutcome::resolved(
        "<script>.example",
        Classification::Healthy,
        ip("203.0.113.9"),
    );
    outcome.http_status = Some("\"&'".to_string());
    let html = render_html(&[outcome]);
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;.example"));
    assert!(html.contains("&quot;&amp;&#39;"));
}

#[test]
fn test_render_html_empty() {
    let html = render_html(&[]);
    assert!(html.contains("<th>HTTP Status</th>"));
    assert!(!html.contains("<tr class="));
}

#[test]
fn test_write_reports_creates_all_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("transfer");
    let output = write_reports(&out_dir, &scenario_outcomes());

    assert!(output.failures.is_empty());
    assert_eq!(output.written.len(), 7);
    let read = |name: &str| fs::read_to_string(out_dir.join(name)).unwrap();
    assert_eq!(read("direct_domains.txt"), "a.example\n");
    assert_eq!(read("healthy_domains.txt"), "b.example\n");
    assert_eq!(read("mismatched_domains.txt"), "d.example\n");
    assert_eq!(read("no_ping_domains.txt"), "c.example\n");
    assert_eq!(read("combined_domains.txt"), "a.example\nb.example\n");
    assert!(read("domain_report.html").contains("b.example"));

    let json: serde_json::Value = serde_json::from_str(&read("domain_report.json")).unwrap();
    assert_eq!(json[1]["domain"], "b.example");
    assert_eq!(json[1]["http_status"], "200");
    assert_eq!(json[2]["classification"], "No Ping");
}

#[test]
fn test_write_reports_empty_lists_are_empty_files() {
    let dir = tempfile::tempdir().unwrap();
    let outcomes = vec![DomainOutcome::unresolvable("c.example")];
    let output = write_reports(dir.path(), &outcomes);

    assert!(output.failures.is_empty());
    assert_eq!(
        fs::read_to_string(dir.path().join("combined_domains.txt")).unwrap(),
        ""
    );
}

#[test]
fn test_write_reports_one_failure_does_not_stop_others() {
    let dir = tempfile::tempdir().unwrap();
    // A directory squatting on one artifact's name makes that write fail
    fs::create_dir(dir.path().join("healthy_domains.txt")).unwrap();

    let output = write_reports(dir.path(), &scenario_outcomes());

    assert_eq!(output.failures.len(), 1);
    assert!(matches!(
        &output.failures[0],
        OutputError::WriteFile { path, .. } if path.ends_with("healthy_domains.txt")
    ));
    assert_eq!(output.written.len(), 6);
    assert!(dir.path().join("domain_report.html").exists());
}

#[test]
fn test_write_reports_unusable_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "x").unwrap();

    let output = write_reports(&blocker, &scenario_outcomes());

    assert!(output.written.is_empty());
    assert!(matches!(output.failures[0], OutputError::CreateDir { .. }));
    assert_eq!(output.failures.len(), 8);
}
