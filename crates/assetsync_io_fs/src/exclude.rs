//! Path exclusion predicates.
//!
//! The synchronizer asks one question per traversed entry: is this relative
//! path excluded? Exclusion of a directory prunes its whole subtree because
//! the traversal never descends into it.

use std::path::{Component, Path};

use globset::{Glob, GlobMatcher};
use regex::Regex;

use crate::spec::{EnumPatternMode, SyncError};

/// Predicate over paths relative to the source root.
pub trait PathExclusion {
    /// `true` when `path_rel` (and everything below it) must not be mirrored.
    fn is_excluded(&self, path_rel: &Path) -> bool;
}

impl<F> PathExclusion for F
where
    F: Fn(&Path) -> bool,
{
    fn is_excluded(&self, path_rel: &Path) -> bool {
        self(path_rel)
    }
}

////////////////////////////////////////////////////////////////////////////////
// #region PatternMatching

#[derive(Debug, Clone)]
enum TypePatternSeq {
    Literal(Vec<String>),
    Glob(Vec<GlobMatcher>),
    Regex(Vec<Regex>),
}

/// Compiled segment patterns; a path matches if any segment matches any pattern.
#[derive(Debug, Clone)]
pub struct SpecExcludePatterns {
    patterns: Option<TypePatternSeq>,
}

impl SpecExcludePatterns {
    /// Compile `patterns` under `rule_pattern`. An empty list excludes nothing.
    pub fn from_raw(
        patterns: &[String],
        rule_pattern: EnumPatternMode,
    ) -> Result<Self, SyncError> {
        Ok(Self {
            patterns: _compile(patterns, rule_pattern)?,
        })
    }

    /// Exact-name exclusion, e.g. `["ignore"]`.
    pub fn literal<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let l_names: Vec<String> = names.into_iter().map(Into::into).collect();
        let patterns = (!l_names.is_empty()).then_some(TypePatternSeq::Literal(l_names));
        Self { patterns }
    }

    fn is_segment_matching(&self, segment: &str) -> bool {
        match &self.patterns {
            None => false,
            Some(TypePatternSeq::Literal(v)) => v.iter().any(|p| p == segment),
            Some(TypePatternSeq::Glob(v)) => v.iter().any(|p| p.is_match(segment)),
            Some(TypePatternSeq::Regex(v)) => v.iter().any(|p| p.is_match(segment)),
        }
    }
}

impl PathExclusion for SpecExcludePatterns {
    fn is_excluded(&self, path_rel: &Path) -> bool {
        if self.patterns.is_none() {
            return false;
        }
        path_rel.components().any(|component| match component {
            Component::Normal(segment) => self.is_segment_matching(&segment.to_string_lossy()),
            _ => false,
        })
    }
}

fn _compile(
    patterns: &[String],
    rule_pattern: EnumPatternMode,
) -> Result<Option<TypePatternSeq>, SyncError> {
    if patterns.is_empty() {
        return Ok(None);
    }

    match rule_pattern {
        EnumPatternMode::Literal => Ok(Some(TypePatternSeq::Literal(patterns.to_vec()))),
        EnumPatternMode::Glob => {
            let mut l_glob = Vec::with_capacity(patterns.len());
            for pattern in patterns {
                let matcher = Glob::new(pattern)
                    .map_err(|e| SyncError::InvalidPattern(format!("`{pattern}`: {e}")))?
                    .compile_matcher();
                l_glob.push(matcher);
            }
            Ok(Some(TypePatternSeq::Glob(l_glob)))
        }
        EnumPatternMode::Regex => {
            let mut l_regex = Vec::with_capacity(patterns.len());
            for pattern in patterns {
                let regex = Regex::new(pattern)
                    .map_err(|e| SyncError::InvalidPattern(format!("`{pattern}`: {e}")))?;
                l_regex.push(regex);
            }
            Ok(Some(TypePatternSeq::Regex(l_regex)))
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
