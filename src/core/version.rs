//! Semantic-version parsing and three-way comparison.

use std::cmp::Ordering;

/// Compare two version strings of the form `[v]MAJOR.MINOR.PATCH[. ...]`.
///
/// An optional leading `v` is stripped. Components are parsed as non-negative
/// integers and the shorter sequence is right-padded with zeros before the
/// component-wise comparison, so `"1.9"` compares equal to `"1.9.0"`. There
/// are no pre-release semantics.
///
/// Returns `Err` with the offending component when either string contains a
/// non-numeric component.
pub fn compare_versions(version1: &str, version2: &str) -> Result<Ordering, String> {
    let parts1 = parse_components(version1)?;
    let parts2 = parse_components(version2)?;

    let arity = parts1.len().max(parts2.len());
    for i in 0..arity {
        let p1 = parts1.get(i).copied().unwrap_or(0);
        let p2 = parts2.get(i).copied().unwrap_or(0);
        match p1.cmp(&p2) {
            Ordering::Equal => continue,
            other => return Ok(other),
        }
    }
    Ok(Ordering::Equal)
}

fn parse_components(version: &str) -> Result<Vec<u64>, String> {
    let trimmed = version.strip_prefix('v').unwrap_or(version);
    trimmed
        .split('.')
        .map(|part| {
            part.parse::<u64>()
                .map_err(|_| format!("invalid version component '{}' in '{}'", part, version))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_versions_compare_equal() {
        assert_eq!(compare_versions("1.0.0", "1.0.0").unwrap(), Ordering::Equal);
        assert_eq!(compare_versions("v2.3.4", "2.3.4").unwrap(), Ordering::Equal);
    }

    #[test]
    fn shorter_version_is_zero_padded() {
        assert_eq!(compare_versions("1.9", "1.9.0").unwrap(), Ordering::Equal);
        assert_eq!(compare_versions("1.9", "1.9.1").unwrap(), Ordering::Less);
        assert_eq!(compare_versions("2", "1.9.9").unwrap(), Ordering::Greater);
    }

    #[test]
    fn components_compare_numerically_not_lexically() {
        assert_eq!(
            compare_versions("v1.9.9", "v10.0.0").unwrap(),
            Ordering::Less
        );
        assert_eq!(compare_versions("1.10.0", "1.2.0").unwrap(), Ordering::Greater);
    }

    #[test]
    fn comparison_is_antisymmetric() {
        let pairs = [("1.2.3", "1.2.4"), ("v1.9.9", "v10.0.0"), ("2.0", "2.0.0")];
        for (a, b) in pairs {
            let ab = compare_versions(a, b).unwrap();
            let ba = compare_versions(b, a).unwrap();
            assert_eq!(ab, ba.reverse(), "compare({a},{b}) vs compare({b},{a})");
        }
    }

    #[test]
    fn non_numeric_component_is_an_error() {
        assert!(compare_versions("1.x.0", "1.0.0").is_err());
        assert!(compare_versions("1.0.0", "1.0.0-beta").is_err());
    }
}
