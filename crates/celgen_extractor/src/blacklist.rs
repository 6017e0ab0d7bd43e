//! Name patterns excluded from binding generation.

use regex::Regex;

/// Patterns excluded when no configuration overrides them: constructors and
/// package initializers.
pub const DEFAULT_BLACKLIST: &[&str] = &["^Create", "^init"];

/// An ordered list of regular expressions matched against method names.
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    patterns: Vec<Regex>,
}

impl Blacklist {
    pub fn new(patterns: Vec<Regex>) -> Self {
        Self { patterns }
    }

    /// Compile a list of pattern strings.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// The first pattern matching `name`, if any.
    pub fn find_match(&self, name: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|re| re.is_match(name))
            .map(Regex::as_str)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patterns() {
        let blacklist = Blacklist::compile(DEFAULT_BLACKLIST).unwrap();
        assert_eq!(blacklist.find_match("CreateWidget"), Some("^Create"));
        assert_eq!(blacklist.find_match("init"), Some("^init"));
        assert_eq!(blacklist.find_match("initialize"), Some("^init"));
        assert_eq!(blacklist.find_match("Recreate"), None);
        assert_eq!(blacklist.find_match("Add"), None);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(Blacklist::compile(&["(unclosed"]).is_err());
    }
}
