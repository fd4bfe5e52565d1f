//! Path filtering for diff records.
//!
//! This module provides glob-style pattern matching over the dotted paths
//! diff records carry, allowing users to ignore specific paths or focus on
//! particular areas of the documents.
//!
//! # Pattern Syntax
//!
//! - `foo` - matches literal segment "foo"
//! - `*` - matches any single path segment
//! - `**` - matches any number of path segments (including zero)
//! - `foo.bar` - matches nested path "foo.bar"
//! - `**.version` - matches "version" at any depth
//!
//! # Examples
//!
//! ```
//! use docdiff_rs::filter::PathPattern;
//!
//! let pattern = PathPattern::parse("metadata.timestamp");
//! assert!(pattern.matches("metadata.timestamp"));
//!
//! let pattern = PathPattern::parse("**.version");
//! assert!(pattern.matches("package.version"));
//! assert!(pattern.matches("dependencies.foo.version"));
//! ```

use crate::diff::DiffRecord;

/// A single segment in a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment {
    /// Matches an exact string
    Literal(String),
    /// Matches any single path segment (*)
    SingleWildcard,
    /// Matches any number of path segments (**)
    DoubleWildcard,
}

/// A compiled path pattern for matching against record paths.
#[derive(Debug, Clone)]
pub struct PathPattern {
    pub segments: Vec<PatternSegment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('.')
            .map(|s| match s {
                "**" => PatternSegment::DoubleWildcard,
                "*" => PatternSegment::SingleWildcard,
                _ => PatternSegment::Literal(s.to_string()),
            })
            .collect();
        Self { segments }
    }

    pub fn matches(&self, path: &str) -> bool {
        let segments: Vec<&str> = path.split('.').collect();
        self.matches_recursive(&self.segments, &segments)
    }

    fn matches_recursive(&self, pattern: &[PatternSegment], path: &[&str]) -> bool {
        match (pattern.first(), path.first()) {
            (None, None) => true,
            (None, Some(_)) => false,
            (Some(_seg), None) => pattern
                .iter()
                .all(|s| matches!(s, PatternSegment::DoubleWildcard)),
            (Some(seg), Some(path_seg)) => match seg {
                PatternSegment::Literal(lit) => {
                    if lit == path_seg {
                        self.matches_recursive(&pattern[1..], &path[1..])
                    } else {
                        false
                    }
                }
                PatternSegment::SingleWildcard => self.matches_recursive(&pattern[1..], &path[1..]),
                PatternSegment::DoubleWildcard => {
                    self.matches_recursive(&pattern[1..], path)
                        || self.matches_recursive(pattern, &path[1..])
                }
            },
        }
    }
}

/// Configuration for filtering diff records.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Patterns for paths to ignore (exclude from the report)
    pub ignore_patterns: Vec<PathPattern>,
    /// Patterns for paths to include (if non-empty, only these are kept)
    pub only_patterns: Vec<PathPattern>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore(mut self, pattern: &str) -> Self {
        self.ignore_patterns.push(PathPattern::parse(pattern));
        self
    }

    pub fn only(mut self, pattern: &str) -> Self {
        self.only_patterns.push(PathPattern::parse(pattern));
        self
    }

    pub fn has_filters(&self) -> bool {
        !self.ignore_patterns.is_empty() || !self.only_patterns.is_empty()
    }

    pub fn should_include(&self, path: &str) -> bool {
        for pattern in &self.ignore_patterns {
            if pattern.matches(path) {
                return false;
            }
        }

        // If only patterns are specified, at least one must match
        if !self.only_patterns.is_empty() {
            for pattern in &self.only_patterns {
                if pattern.matches(path) {
                    return true;
                }
            }
            return false;
        }

        // No only patterns, and no ignore matched
        true
    }
}

/// Filters a record list, preserving order.
pub fn filter_records(records: &[DiffRecord], config: &FilterConfig) -> Vec<DiffRecord> {
    if !config.has_filters() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| config.should_include(&record.path))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_match() {
        let pattern = PathPattern::parse("user.name");
        assert!(pattern.matches("user.name"));
        assert!(!pattern.matches("user.age"));
        assert!(!pattern.matches("user"));
        assert!(!pattern.matches("user.name.first"));
    }

    #[test]
    fn test_single_wildcard() {
        let pattern = PathPattern::parse("user.*");
        assert!(pattern.matches("user.name"));
        assert!(pattern.matches("user.age"));
        assert!(!pattern.matches("user.name.first"));
    }

    #[test]
    fn test_double_wildcard() {
        let pattern = PathPattern::parse("**.version");
        assert!(pattern.matches("version"));
        assert!(pattern.matches("package.version"));
        assert!(pattern.matches("a.b.c.version"));
        assert!(!pattern.matches("package.name"));
    }

    #[test]
    fn test_trailing_double_wildcard() {
        let pattern = PathPattern::parse("metadata.**");
        assert!(pattern.matches("metadata"));
        assert!(pattern.matches("metadata.created"));
        assert!(pattern.matches("metadata.a.b"));
        assert!(!pattern.matches("data.created"));
    }

    #[test]
    fn test_filter_records_ignore() {
        let records = vec![
            DiffRecord::changed("a", "1".to_string(), "2".to_string()),
            DiffRecord::changed("meta.ts", "1".to_string(), "2".to_string()),
        ];
        let config = FilterConfig::new().ignore("meta.**");
        let filtered = filter_records(&records, &config);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].path, "a");
    }

    #[test]
    fn test_filter_records_only() {
        let records = vec![
            DiffRecord::changed("a.x", "1".to_string(), "2".to_string()),
            DiffRecord::changed("b.y", "1".to_string(), "2".to_string()),
        ];
        let config = FilterConfig::new().only("a.**");
        let filtered = filter_records(&records, &config);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].path, "a.x");
    }

    #[test]
    fn test_filter_records_no_filters_is_identity() {
        let records = vec![DiffRecord::only_in_file1("x", "1".to_string())];
        let filtered = filter_records(&records, &FilterConfig::new());
        assert_eq!(filtered, records);
    }
}
