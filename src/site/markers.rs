//! Resolve classification markers to a child of the site tree
//!
//! Callers hand over an ordered list of markers describing the resource
//! they are looking for. The first marker that any rule accepts decides
//! the child; rules are checked in table order.

use crate::site::children::ChildKind;
use regex::Regex;

/// A marker is either a literal value or a pattern
#[derive(Debug, Clone)]
pub enum Marker {
    Value(String),
    Pattern(Regex),
}

impl From<&str> for Marker {
    fn from(value: &str) -> Self {
        Marker::Value(value.to_string())
    }
}

impl From<String> for Marker {
    fn from(value: String) -> Self {
        Marker::Value(value)
    }
}

impl From<Regex> for Marker {
    fn from(pattern: Regex) -> Self {
        Marker::Pattern(pattern)
    }
}

const SETTINGS_MARKERS: &[&str] = &["applicationSettings", "applicationSetting", "appSettings"];
const PROXY_MARKERS: &[&str] = &["proxies", "proxy"];
const DEPLOYMENT_MARKERS: &[&str] = &["deployments", "deployment"];

/// Function kinds; each may also carry a `ReadOnly` suffix
const FUNCTION_KINDS: &[&str] = &["function", "functions", "httpFunction", "httpFunctions"];
const READ_ONLY_SUFFIX: &str = "ReadOnly";

struct MarkerRule {
    kind: ChildKind,
    accepts: fn(&Marker) -> bool,
}

static RULES: [MarkerRule; 4] = [
    MarkerRule {
        kind: ChildKind::AppSettings,
        accepts: is_settings_marker,
    },
    MarkerRule {
        kind: ChildKind::Proxies,
        accepts: is_proxy_marker,
    },
    MarkerRule {
        kind: ChildKind::Deployments,
        accepts: is_deployment_marker,
    },
    MarkerRule {
        kind: ChildKind::Functions,
        accepts: is_function_marker,
    },
];

/// Map markers to the child that should own the resource
pub fn resolve(markers: &[Marker]) -> Option<ChildKind> {
    markers
        .iter()
        .find_map(|marker| RULES.iter().find(|rule| (rule.accepts)(marker)))
        .map(|rule| rule.kind)
}

fn is_settings_marker(marker: &Marker) -> bool {
    matches!(marker, Marker::Value(v) if SETTINGS_MARKERS.contains(&v.as_str()))
}

fn is_proxy_marker(marker: &Marker) -> bool {
    matches!(marker, Marker::Value(v) if PROXY_MARKERS.contains(&v.as_str()))
}

fn is_deployment_marker(marker: &Marker) -> bool {
    match marker {
        Marker::Value(v) => DEPLOYMENT_MARKERS.contains(&v.as_str()),
        Marker::Pattern(re) => DEPLOYMENT_MARKERS.iter().any(|m| re.is_match(m)),
    }
}

/// Function markers are composed as `[http]function[s][ReadOnly]`, optionally
/// qualified by a `<scope>/` prefix such as `remote/httpFunction`.
fn is_function_marker(marker: &Marker) -> bool {
    match marker {
        Marker::Value(v) => parse_function_marker(v),
        Marker::Pattern(re) => FUNCTION_KINDS
            .iter()
            .any(|kind| re.is_match(kind) || re.is_match(&format!("{}{}", kind, READ_ONLY_SUFFIX))),
    }
}

fn parse_function_marker(value: &str) -> bool {
    let kind = value.rsplit('/').next().unwrap_or(value);
    let kind = kind.strip_suffix(READ_ONLY_SUFFIX).unwrap_or(kind);
    FUNCTION_KINDS.contains(&kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers(values: &[&str]) -> Vec<Marker> {
        values.iter().map(|v| Marker::from(*v)).collect()
    }

    #[test]
    fn first_matching_marker_wins() {
        assert_eq!(
            resolve(&markers(&["proxies", "functions"])),
            Some(ChildKind::Proxies)
        );
        assert_eq!(
            resolve(&markers(&["functions", "proxies"])),
            Some(ChildKind::Functions)
        );
    }

    #[test]
    fn unknown_markers_are_skipped() {
        assert_eq!(
            resolve(&markers(&["storageAccount", "applicationSettings"])),
            Some(ChildKind::AppSettings)
        );
        assert_eq!(resolve(&markers(&["storageAccount"])), None);
        assert_eq!(resolve(&[]), None);
    }

    #[test]
    fn deployment_matches_value_or_pattern() {
        assert_eq!(resolve(&markers(&["deployment"])), Some(ChildKind::Deployments));

        let pattern = Regex::new("^deploy").unwrap();
        assert_eq!(resolve(&[Marker::from(pattern)]), Some(ChildKind::Deployments));
    }

    #[test]
    fn function_marker_parts() {
        for value in [
            "function",
            "functions",
            "httpFunction",
            "httpFunctionReadOnly",
            "functionReadOnly",
            "remote/httpFunction",
        ] {
            assert_eq!(
                resolve(&markers(&[value])),
                Some(ChildKind::Functions),
                "{value}"
            );
        }
        for value in ["httpfunction", "functional", "ReadOnly", "http"] {
            assert_eq!(resolve(&markers(&[value])), None, "{value}");
        }
    }

    #[test]
    fn function_pattern_marker() {
        let pattern = Regex::new("ReadOnly$").unwrap();
        assert_eq!(resolve(&[Marker::from(pattern)]), Some(ChildKind::Functions));

        let unmatched = Regex::new("^zzz").unwrap();
        assert_eq!(resolve(&[Marker::from(unmatched)]), None);
    }

    #[test]
    fn value_and_pattern_accept_the_same_function_names() {
        for name in ["httpFunctions", "httpFunctionsReadOnly", "functionsReadOnly"] {
            let pattern = Regex::new(&format!("^{}$", name)).unwrap();
            assert_eq!(resolve(&markers(&[name])), Some(ChildKind::Functions), "{name}");
            assert_eq!(resolve(&[Marker::from(pattern)]), Some(ChildKind::Functions), "{name}");
        }
    }

    #[test]
    fn pattern_does_not_match_literal_only_rules() {
        // Patterns are only tested by the deployment and function rules.
        let pattern = Regex::new("proxies").unwrap();
        assert_eq!(resolve(&[Marker::from(pattern)]), None);
    }
}
