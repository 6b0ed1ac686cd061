//! Tokenize text with a bundled grammar and report where it stops.
//!
//! After an issue the linter skips one character and resumes, so a single
//! stray construct does not hide the rest of the input.

use glex_core::utf16;
use glex_vm::EvalError;

use crate::Lang;

/// Position where tokenization stopped, in UTF-16 units from the start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternIssue {
    /// No state accepted the input at `offset`.
    Unparsed { offset: usize, remainder: String },
    /// An attempt starting at `offset` failed after a commit point.
    Failed { offset: usize, error: EvalError },
}

impl PatternIssue {
    pub fn offset(&self) -> usize {
        match self {
            PatternIssue::Unparsed { offset, .. } | PatternIssue::Failed { offset, .. } => {
                *offset
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            PatternIssue::Unparsed { remainder, .. } => {
                format!("no token matches here: `{}`", glex_core::escape_text(remainder))
            }
            PatternIssue::Failed { error, .. } => format!("{}: {}", error.kind, error.message),
        }
    }
}

/// Check a regex pattern against the bundled regex grammar.
#[cfg(feature = "lang-regex")]
pub fn check_pattern(pattern: &str) -> Vec<PatternIssue> {
    check(&crate::regex(), pattern)
}

/// Tokenize `input` with `lang`, collecting every stop.
pub fn check(lang: &Lang, input: &str) -> Vec<PatternIssue> {
    let evaluator = lang.evaluator();
    let mut issues = Vec::new();
    let mut rest = input;
    let mut offset = 0;

    while !rest.is_empty() {
        let tokenized = evaluator.evaluate_all(rest);
        let Some(remainder) = tokenized.unmatched_suffix else {
            break;
        };

        let at = offset + tokenized.matched_len;
        issues.push(match tokenized.last_error {
            Some(error) => PatternIssue::Failed { offset: at, error },
            None => PatternIssue::Unparsed {
                offset: at,
                remainder,
            },
        });

        // A stop inside a surrogate pair already skips the rest of that char.
        let (mut units, mut bytes) = utf16::boundary_at(rest, tokenized.matched_len);
        if units == tokenized.matched_len {
            let Some(skipped) = rest[bytes..].chars().next() else {
                break;
            };
            units += skipped.len_utf16();
            bytes += skipped.len_utf8();
        }
        offset += units;
        rest = &rest[bytes..];
    }
    issues
}
