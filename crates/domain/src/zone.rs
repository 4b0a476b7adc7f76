//! Zone matching and host parsing.
//!
//! Names are compared label by label, ignoring ASCII case. A trailing dot is
//! optional on input; the root is written `.`.

use crate::DomainError;

/// Host key used for records at the zone apex.
pub const APEX_HOST: &str = "@";

const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 253;

/// Return `name` with a trailing dot.
pub fn fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

/// Lower-case fully-qualified form used as zone identity.
pub fn normalize_zone(name: &str) -> String {
    fqdn(name.trim()).to_ascii_lowercase()
}

/// Labels of `name`, left to right. The root name has no labels.
pub fn labels(name: &str) -> Vec<&str> {
    let trimmed = name.strip_suffix('.').unwrap_or(name);
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('.').collect()
    }
}

/// Reject names that cannot be stored as a zone or host.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidDomainName(format!("{}: {}", name, reason));
    let trimmed = name.strip_suffix('.').unwrap_or(name);

    if trimmed.is_empty() {
        return if name == "." {
            Ok(())
        } else {
            Err(invalid("empty name"))
        };
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(invalid("name too long"));
    }

    for label in trimmed.split('.') {
        if label.is_empty() {
            return Err(invalid("empty label"));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(invalid("label too long"));
        }
        if !label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'*'))
        {
            return Err(invalid("invalid character"));
        }
    }

    Ok(())
}

/// True when `zone` equals `qname` or is a parent of it at a label boundary.
pub fn is_in_zone(qname: &str, zone: &str) -> bool {
    let q = labels(qname);
    let z = labels(zone);
    suffix_matches(&q, &z)
}

/// Pick the most specific zone containing `qname`.
///
/// Among the zones that equal `qname` or are one of its parents, the one with
/// the most labels wins. `None` means this responder is not authoritative.
pub fn match_zone<'a, I>(qname: &str, zones: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let q = labels(qname);
    let mut best: Option<(&'a str, usize)> = None;

    for zone in zones {
        let z = labels(zone);
        if !suffix_matches(&q, &z) {
            continue;
        }
        match best {
            Some((_, depth)) if depth >= z.len() => {}
            _ => best = Some((zone, z.len())),
        }
    }

    best.map(|(zone, _)| zone)
}

/// Labels of `qname` preceding `zone`, joined by dots, without trailing dot.
///
/// `qname` must be inside `zone`; the apex yields the empty string.
pub fn relative_host(qname: &str, zone: &str) -> String {
    let q = labels(qname);
    let z = labels(zone);
    let length = q.len().saturating_sub(z.len());
    q[..length].join(".")
}

/// Storage key for a relative host: `record` becomes `record.`, the apex `@`.
pub fn host_key(relative: &str) -> String {
    if relative.is_empty() || relative == APEX_HOST {
        APEX_HOST.to_string()
    } else {
        fqdn(relative).to_ascii_lowercase()
    }
}

fn suffix_matches(q: &[&str], z: &[&str]) -> bool {
    if z.len() > q.len() {
        return false;
    }
    q[q.len() - z.len()..]
        .iter()
        .zip(z)
        .all(|(a, b)| a.eq_ignore_ascii_case(b))
}
