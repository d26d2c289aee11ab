use nom::{
    IResult, bytes::complete::take_while, character::complete::char, sequence::delimited,
};
use serde::{Deserialize, Serialize};

use crate::{MatchBudget, MatchError, budget::Deadline, signature};

const VALUE_MARKER: &str = "$value";

/// Which shapes a single path segment has.
///
/// Shapes overlap: `Namespace.fn(a)` is both a function and a function with
/// parameters. `plain` is set only when nothing else is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentShape {
    pub collection_index: bool,
    pub function: bool,
    pub function_with_parameters: bool,
    pub value_marker: bool,
    pub plain: bool,
}

/// Classification predicates over one path-template segment.
///
/// Implemented for `str` and for `Option<S>`; an absent segment is never
/// any shape.
pub trait PathSegment {
    fn segment(&self) -> Option<&str>;

    /// `{id}`-style key segment.
    fn is_collection_index(&self) -> bool {
        self.segment()
            .is_some_and(|s| !s.is_empty() && s.starts_with('{') && s.ends_with('}'))
    }

    /// OData bound/unbound function such as `Namespace.Function`.
    fn is_function(&self) -> bool {
        self.segment().is_some_and(|s| s.contains('.'))
    }

    fn is_function_with_parameters(&self) -> bool {
        has_parameters_or_false(self, &MatchBudget::default())
    }

    fn try_is_function_with_parameters(&self, budget: &MatchBudget) -> Result<bool, MatchError> {
        match self.segment() {
            Some(s) if !s.is_empty() => {
                let deadline = budget.function_parameters_deadline();
                Ok(find_parameter_group(s, &deadline)?.is_some())
            }
            _ => Ok(false),
        }
    }

    fn is_value_marker(&self) -> bool {
        self.segment() == Some(VALUE_MARKER)
    }

    fn is_plain(&self) -> bool {
        self.shape().plain
    }

    fn shape(&self) -> SegmentShape {
        let Some(s) = self.segment() else {
            return SegmentShape::default();
        };
        let mut shape = SegmentShape {
            collection_index: s.is_collection_index(),
            function: s.is_function(),
            function_with_parameters: s.is_function_with_parameters(),
            value_marker: s.is_value_marker(),
            plain: false,
        };
        shape.plain = !s.is_empty()
            && !(shape.collection_index
                || shape.function
                || shape.function_with_parameters
                || shape.value_marker);
        shape
    }

    /// Whether `self` covers the parameter list of `other`.
    /// See [`signature::function_parameters_match`].
    fn is_function_with_parameters_match(&self, other: &str) -> bool {
        self.segment()
            .is_some_and(|candidate| matches_or_distinct(candidate, other, &MatchBudget::default()))
    }
}

pub(crate) fn has_parameters_or_false<S: PathSegment + ?Sized>(
    segment: &S,
    budget: &MatchBudget,
) -> bool {
    match segment.try_is_function_with_parameters(budget) {
        Ok(found) => found,
        Err(err) => {
            tracing::warn!(error = %err, "treating segment as having no parameter list");
            false
        }
    }
}

pub(crate) fn matches_or_distinct(candidate: &str, other: &str, budget: &MatchBudget) -> bool {
    match signature::function_parameters_match(candidate, other, budget) {
        Ok(matched) => matched,
        Err(err) => {
            tracing::warn!(error = %err, candidate, other, "treating signatures as distinct");
            false
        }
    }
}

impl PathSegment for str {
    fn segment(&self) -> Option<&str> {
        Some(self)
    }
}

impl<S: AsRef<str>> PathSegment for Option<S> {
    fn segment(&self) -> Option<&str> {
        self.as_ref().map(AsRef::as_ref)
    }
}

/// Strips every leading and trailing `(` and `)`.
pub fn remove_function_braces(segment: &str) -> &str {
    segment.trim_matches(['(', ')'])
}

/// Word characters: letters, digits, connector punctuation and combining
/// marks.
///
/// Combining marks are limited to the combining diacritical blocks.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
        || matches!(
            c,
            '_' | '\u{203F}'
                | '\u{2040}'
                | '\u{2054}'
                | '\u{FE33}'
                | '\u{FE34}'
                | '\u{FE4D}'..='\u{FE4F}'
                | '\u{FF3F}'
                | '\u{0300}'..='\u{036F}'
                | '\u{1AB0}'..='\u{1AFF}'
                | '\u{1DC0}'..='\u{1DFF}'
                | '\u{20D0}'..='\u{20FF}'
                | '\u{FE20}'..='\u{FE2F}'
        )
}

/// Upper-cases `c` only when its upper-case form is a single character.
pub(crate) fn simple_upper_case(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

fn is_parameter_char(c: char) -> bool {
    is_word_char(c)
        || c.is_whitespace()
        || matches!(
            c,
            '=' | '\'' | ':' | '$' | '{' | '}' | '<' | '>' | '|' | '-' | ','
        )
}

fn parameter_group(input: &str) -> IResult<&str, &str> {
    delimited(char('('), take_while(is_parameter_char), char(')'))(input)
}

/// Finds the first `(...)` group whose body is made only of parameter
/// characters and returns that body.
///
/// `(` is not a parameter character, so a failed attempt can resume where
/// its run of parameter characters stopped. Every character is visited at
/// most twice.
pub(crate) fn find_parameter_group<'a>(
    segment: &'a str,
    deadline: &Deadline,
) -> Result<Option<&'a str>, MatchError> {
    let mut rest = segment;
    while let Some(open) = rest.find('(') {
        deadline.check()?;
        let attempt = &rest[open..];
        if let Ok((_, body)) = parameter_group(attempt) {
            return Ok(Some(body));
        }
        let stop = attempt[1..]
            .find(|c: char| !is_parameter_char(c))
            .map_or(attempt.len(), |idx| idx + 1);
        rest = &attempt[stop..];
    }
    Ok(None)
}
