use regex::Regex;
use tracing::debug;

use crate::error::ReportError;

/// A predicate over strings built from two sets of regular expressions.
///
/// A value passes the filter if it matches at least one of the `matches`
/// expressions (or there are none) and matches none of the `excludes`
/// expressions. Exclusion therefore always wins over inclusion.
///
/// A `Filter` is built once per report and never changes afterwards; the
/// renderers only ever borrow it.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    /// Expressions a value must match (at least one of them).
    matches: Vec<Regex>,
    /// Expressions a value must not match (any of them).
    excludes: Vec<Regex>,
}

impl Filter {
    /// Constructs an empty `Filter` which passes every value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a `Filter` from a mapping of pattern to polarity.
    ///
    /// Each pattern is compiled as a regular expression. A `true` polarity adds
    /// it to the set of expressions a value must match, `false` to the set it
    /// must not match.
    ///
    /// A pattern that does not compile is reported and skipped; the remaining
    /// entries are still compiled, so one bad pattern never hides the others.
    ///
    /// # Arguments
    /// * `filter_map`: Pairs of pattern string and polarity.
    ///
    /// # Returns
    /// The filter built from every valid pattern, together with one
    /// `ReportError::InvalidPattern` per pattern that failed to compile.
    pub fn from_map<I, S>(filter_map: I) -> (Self, Vec<ReportError>)
    where
        I: IntoIterator<Item = (S, bool)>,
        S: AsRef<str>,
    {
        let mut filter = Self::new();
        let mut errors = Vec::new();

        for (pattern, must_match) in filter_map {
            let pattern = pattern.as_ref();
            match Regex::new(pattern) {
                Ok(re) if must_match => filter.add_match(re),
                Ok(re) => filter.add_exclude(re),
                Err(source) => errors.push(ReportError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                }),
            }
        }

        debug!(
            matches = filter.matches.len(),
            excludes = filter.excludes.len(),
            errors = errors.len(),
            "built filter"
        );

        (filter, errors)
    }

    /// Adds an expression to the set a value must match.
    pub fn add_match(&mut self, re: Regex) {
        self.matches.push(re);
    }

    /// Adds an expression to the set a value must not match.
    pub fn add_exclude(&mut self, re: Regex) {
        self.excludes.push(re);
    }

    /// Returns `true` if any expressions have been given, `false` otherwise.
    pub fn has_filters(&self) -> bool {
        !self.matches.is_empty() || !self.excludes.is_empty()
    }

    /// Checks whether a value satisfies the filter.
    ///
    /// With no `matches` expressions every value is a candidate; otherwise the
    /// value must match at least one of them. The value is then rejected as
    /// soon as any `excludes` expression matches it.
    pub fn passes(&self, value: &str) -> bool {
        let included = self.matches.is_empty() || self.matches.iter().any(|re| re.is_match(value));

        included && !self.excludes.iter().any(|re| re.is_match(value))
    }
}
