use zonestore_dns_domain::zone::{
    fqdn, host_key, is_in_zone, labels, match_zone, normalize_zone, relative_host, validate_name,
    APEX_HOST,
};

#[test]
fn test_parse_host_from_qname() {
    let zone = "test.zone.";
    let cases = [
        ("test.zone.", ""),
        ("record.test.zone.", "record"),
        ("long.record.test.zone.", "long.record"),
    ];

    for (qname, expected) in cases {
        assert_eq!(relative_host(qname, zone), expected, "qname {}", qname);
    }
}

#[test]
fn test_match_zone_exact_and_subdomain() {
    let zones = ["example.com.", "example.org."];

    assert_eq!(
        match_zone("example.com.", zones.iter().copied()),
        Some("example.com.")
    );
    assert_eq!(
        match_zone("www.example.org.", zones.iter().copied()),
        Some("example.org.")
    );
}

#[test]
fn test_match_zone_prefers_longest() {
    let zones = ["example.com.", "sub.example.com.", "com."];

    assert_eq!(
        match_zone("a.sub.example.com.", zones.iter().copied()),
        Some("sub.example.com.")
    );
    assert_eq!(
        match_zone("b.example.com.", zones.iter().copied()),
        Some("example.com.")
    );
    assert_eq!(match_zone("other.com.", zones.iter().copied()), Some("com."));
}

#[test]
fn test_match_zone_order_independent() {
    let forward = ["com.", "example.com.", "sub.example.com."];
    let backward = ["sub.example.com.", "example.com.", "com."];

    assert_eq!(
        match_zone("x.sub.example.com.", forward.iter().copied()),
        match_zone("x.sub.example.com.", backward.iter().copied())
    );
}

#[test]
fn test_match_zone_respects_label_boundaries() {
    let zones = ["example.com."];

    assert_eq!(match_zone("badexample.com.", zones.iter().copied()), None);
    assert_eq!(match_zone("example.com.evil.", zones.iter().copied()), None);
    assert_eq!(match_zone("com.", zones.iter().copied()), None);
}

#[test]
fn test_match_zone_no_zones() {
    let zones: [&str; 0] = [];
    assert_eq!(match_zone("example.com.", zones.iter().copied()), None);
}

#[test]
fn test_match_zone_ignores_case() {
    let zones = ["example.com."];
    assert_eq!(
        match_zone("WWW.Example.COM.", zones.iter().copied()),
        Some("example.com.")
    );
    assert!(is_in_zone("Mail.EXAMPLE.com", "example.com."));
}

#[test]
fn test_root_zone_matches_everything() {
    let zones = ["."];
    assert_eq!(match_zone("anything.test.", zones.iter().copied()), Some("."));
    assert_eq!(relative_host("anything.test.", "."), "anything.test");
}

#[test]
fn test_labels() {
    assert_eq!(labels("a.b.c."), vec!["a", "b", "c"]);
    assert_eq!(labels("a.b.c"), vec!["a", "b", "c"]);
    assert!(labels(".").is_empty());
    assert!(labels("").is_empty());
}

#[test]
fn test_fqdn_and_normalize() {
    assert_eq!(fqdn("example.com"), "example.com.");
    assert_eq!(fqdn("example.com."), "example.com.");
    assert_eq!(normalize_zone(" Example.COM "), "example.com.");
}

#[test]
fn test_host_key() {
    assert_eq!(host_key(""), APEX_HOST);
    assert_eq!(host_key("@"), APEX_HOST);
    assert_eq!(host_key("record"), "record.");
    assert_eq!(host_key("long.record"), "long.record.");
    assert_eq!(host_key("Mixed.Case."), "mixed.case.");
}

fn random_label() -> String {
    let len = fastrand::usize(1..12);
    (0..len)
        .map(|_| fastrand::alphanumeric().to_ascii_lowercase())
        .collect()
}

fn random_name(labels: usize) -> String {
    let parts: Vec<String> = (0..labels).map(|_| random_label()).collect();
    parts.join(".")
}

#[test]
fn test_relative_host_strips_zone_suffix_for_random_names() {
    for _ in 0..500 {
        let zone = fqdn(&random_name(fastrand::usize(1..4)));
        let host_labels = fastrand::usize(0..4);
        let host = random_name(host_labels);
        let qname = if host.is_empty() {
            zone.clone()
        } else {
            format!("{}.{}", host, zone)
        };

        assert!(is_in_zone(&qname, &zone));
        assert_eq!(match_zone(&qname, [zone.as_str()]), Some(zone.as_str()));
        assert_eq!(relative_host(&qname, &zone), host);

        let rebuilt = if host.is_empty() {
            zone.clone()
        } else {
            format!("{}.{}", relative_host(&qname, &zone), zone)
        };
        assert_eq!(rebuilt, qname);
    }
}

#[test]
fn test_match_zone_picks_deepest_of_nested_random_zones() {
    for _ in 0..200 {
        let base = fqdn(&random_name(fastrand::usize(1..3)));
        let child = format!("{}.{}", random_label(), base);
        let grandchild = format!("{}.{}", random_label(), child);
        let qname = format!("{}.{}", random_label(), grandchild);

        let mut zones = vec![base.clone(), child.clone(), grandchild.clone()];
        fastrand::shuffle(&mut zones);

        assert_eq!(
            match_zone(&qname, zones.iter().map(String::as_str)),
            Some(grandchild.as_str())
        );
        assert_eq!(
            match_zone(&child, zones.iter().map(String::as_str)),
            Some(child.as_str())
        );
    }
}

#[test]
fn test_unrelated_random_names_do_not_match() {
    for _ in 0..200 {
        let zone = format!("{}.zone-a.", random_label());
        let qname = format!("{}.zone-b.", random_name(fastrand::usize(1..4)));
        assert_eq!(match_zone(&qname, [zone.as_str()]), None);
    }
}

#[test]
fn test_validate_name() {
    assert!(validate_name("example.com.").is_ok());
    assert!(validate_name("example.com").is_ok());
    assert!(validate_name("_sip._tcp.example.com.").is_ok());
    assert!(validate_name(".").is_ok());

    assert!(validate_name("").is_err());
    assert!(validate_name("bad..name.").is_err());
    assert!(validate_name("spaces in.name.").is_err());
    assert!(validate_name(&format!("{}.com.", "a".repeat(64))).is_err());
    assert!(validate_name(&format!("{}com.", "abcdefghi.".repeat(26))).is_err());
}
