use regex_automata::meta::{BuildError, Regex};
use regex_automata::util::syntax;
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;

const PATTERN_COMPILE_BUDGET: Duration = Duration::from_millis(100);
const MAX_PATTERN_LENGTH: usize = 50_000;
const WILDCARD: char = '*';

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("failed to compile pattern `{pattern}`")]
    Build {
        pattern: String,
        #[source]
        source: Box<BuildError>,
    },
    #[error("compiling pattern `{pattern}` exceeded the configured budget ({elapsed:?} > {budget:?})")]
    Timeout {
        pattern: String,
        elapsed: Duration,
        budget: Duration,
    },
    #[error("pattern length {length} exceeds maximum allowed {max}")]
    TooLong { length: usize, max: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// `*` globs, anchored at both ends.
    Wildcard,
    /// Used as written, unanchored.
    Regex,
}

/// A single compiled access-list entry.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    kind: PatternKind,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, PatternError> {
        Self::compile(source, PATTERN_COMPILE_BUDGET)
    }

    fn compile(source: &str, budget: Duration) -> Result<Self, PatternError> {
        if source.len() > MAX_PATTERN_LENGTH {
            return Err(PatternError::TooLong {
                length: source.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }

        let (kind, expression) = translate(source);
        let started = Instant::now();
        let regex = Regex::builder()
            .syntax(syntax::Config::new().case_insensitive(true))
            .build(&expression)
            .map_err(|err| PatternError::Build {
                pattern: source.to_owned(),
                source: Box::new(err),
            })?;
        let elapsed = started.elapsed();
        if elapsed > budget {
            return Err(PatternError::Timeout {
                pattern: source.to_owned(),
                elapsed,
                budget,
            });
        }

        Ok(Self {
            source: source.to_owned(),
            kind,
            regex,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_budget(source: &str, budget: Duration) -> Result<Self, PatternError> {
        Self::compile(source, budget)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn is_match(&self, subject: &str) -> bool {
        self.regex.is_match(subject.as_bytes())
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("source", &self.source)
            .field("kind", &self.kind)
            .finish()
    }
}

fn translate(source: &str) -> (PatternKind, String) {
    if source.contains(WILDCARD) {
        let body = source
            .split(WILDCARD)
            .map(regex_syntax::escape)
            .collect::<Vec<_>>()
            .join(".*");
        (PatternKind::Wildcard, format!("^{body}$"))
    } else {
        (PatternKind::Regex, source.to_owned())
    }
}

/// Ordered list of patterns. An empty list places no restriction.
#[derive(Clone, Debug, Default)]
pub struct PatternList {
    patterns: Vec<Pattern>,
}

impl PatternList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compile<I, S>(sources: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = sources
            .into_iter()
            .map(|source| Pattern::new(source.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Parses a comma-separated list, trimming entries and dropping blanks.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        Self::compile(
            raw.split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty()),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    /// True when the list is empty or any pattern matches `subject`.
    /// An absent subject only passes an empty list.
    pub fn matches(&self, subject: Option<&str>) -> bool {
        if self.patterns.is_empty() {
            return true;
        }
        match subject {
            Some(subject) => self.patterns.iter().any(|pattern| pattern.is_match(subject)),
            None => false,
        }
    }
}

impl<'a> IntoIterator for &'a PatternList {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "pattern_test.rs"]
mod pattern_test;
