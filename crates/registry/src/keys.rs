//! Storage key derivation for organization records.
//!
//! Keys are `orgs.<sanitized-name>`. Sanitizing replaces every `.` in the
//! name with `-`, so the name segment never contains the separator. Two
//! names that differ only by `.` versus `-` (`a.b` and `a-b`) map to the same
//! key; the registry reports the second one as a conflict.

pub const NAMESPACE_PREFIX: &str = "orgs";
pub const SEPARATOR: char = '.';
pub const SEPARATOR_REPLACEMENT: char = '-';

pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c == SEPARATOR { SEPARATOR_REPLACEMENT } else { c })
        .collect()
}

pub fn qid(name: &str) -> String {
    format!("{NAMESPACE_PREFIX}{SEPARATOR}{}", sanitize(name))
}

/// Prefix shared by every organization key.
pub fn key_prefix() -> String {
    format!("{NAMESPACE_PREFIX}{SEPARATOR}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "acme",
        "acme.inc",
        "...",
        "a.b.c.d",
        "déjà.vu",
        "-.-",
        "orgs.acme",
        "trailing.",
    ];

    #[test]
    fn sanitize_removes_separator_and_keeps_length() {
        for name in SAMPLES {
            let out = sanitize(name);
            assert!(!out.contains(SEPARATOR), "{name:?} -> {out:?}");
            assert_eq!(out.chars().count(), name.chars().count());
        }
    }

    #[test]
    fn sanitize_is_idempotent() {
        for name in SAMPLES {
            let once = sanitize(name);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn qid_always_starts_with_prefix() {
        for name in SAMPLES {
            assert!(qid(name).starts_with("orgs."));
            assert!(qid(name).starts_with(&key_prefix()));
        }
        assert_eq!(qid("acme.inc"), "orgs.acme-inc");
    }

    #[test]
    fn separator_and_replacement_collide() {
        assert_eq!(qid("a.b"), qid("a-b"));
    }
}
