//! String manipulation utilities

/// Pluralize a word based on count
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        return word.to_string();
    }

    // dependency → dependencies, but key → keys
    match word.strip_suffix('y') {
        Some(stem) if stem.ends_with(|c: char| !"aeiou".contains(c)) => format!("{stem}ies"),
        _ => format!("{word}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("package", 0), "packages");
        assert_eq!(pluralize("package", 1), "package");
        assert_eq!(pluralize("cycle", 5), "cycles");
    }

    #[test]
    fn test_pluralize_consonant_y() {
        assert_eq!(pluralize("dependency", 2), "dependencies");
        assert_eq!(pluralize("dependency", 1), "dependency");
        assert_eq!(pluralize("directory", 0), "directories");
        assert_eq!(pluralize("key", 3), "keys");
    }
}
