//! Overload matching for function segments with parameter lists.
//!
//! Two segments belong to the same overload group when their function names
//! are equal ignoring case and the candidate's parameter names cover every
//! parameter name of the other segment. Coverage is one-directional: the
//! candidate may carry extra parameters.

use serde::Serialize;

use crate::{
    MatchBudget, MatchError,
    segment::{find_parameter_group, simple_upper_case},
};

/// Name and bare parameter names of a function segment, borrowed from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionSignature<'a> {
    pub name: &'a str,
    /// In declaration order, default values stripped, duplicates kept.
    pub parameters: Vec<&'a str>,
}

impl<'a> FunctionSignature<'a> {
    /// Returns `None` when the segment has no parameter list.
    ///
    /// The name is everything before the first `(`; the parameter list is
    /// everything between the first `(` and the last `)`. An empty list
    /// still yields one empty parameter name.
    pub fn parse(segment: &'a str, budget: &MatchBudget) -> Result<Option<Self>, MatchError> {
        if segment.is_empty() {
            return Ok(None);
        }
        let deadline = budget.function_parameters_deadline();
        if find_parameter_group(segment, &deadline)?.is_none() {
            return Ok(None);
        }
        let (Some(open), Some(close)) = (segment.find('('), segment.rfind(')')) else {
            return Ok(None);
        };
        if close < open {
            return Ok(None);
        }

        let parameters = segment[open + 1..close]
            .split(',')
            .map(strip_default_value)
            .collect();

        Ok(Some(Self {
            name: &segment[..open],
            parameters,
        }))
    }

    pub fn covers(&self, other: &FunctionSignature<'_>) -> bool {
        if !eq_ignore_case(self.name, other.name) {
            return false;
        }
        other.parameters.iter().all(|wanted| {
            let wanted = strip_default_value(wanted);
            self.parameters
                .iter()
                .any(|present| eq_ignore_case(present, wanted))
        })
    }
}

/// Whether `candidate` and `other` denote the same overload group.
///
/// Both must have a parameter list; anything else is not a match.
pub fn function_parameters_match(
    candidate: &str,
    other: &str,
    budget: &MatchBudget,
) -> Result<bool, MatchError> {
    let Some(candidate_signature) = FunctionSignature::parse(candidate, budget)? else {
        return Ok(false);
    };
    let Some(other_signature) = FunctionSignature::parse(other, budget)? else {
        return Ok(false);
    };

    let covered = candidate_signature.covers(&other_signature);
    tracing::trace!(candidate, other, covered, "compared function signatures");
    Ok(covered)
}

fn strip_default_value(token: &str) -> &str {
    token.split_once('=').map_or(token, |(name, _)| name)
}

// Ordinal: one char maps to one char, so lengths must agree.
fn eq_ignore_case(left: &str, right: &str) -> bool {
    left.chars()
        .map(simple_upper_case)
        .eq(right.chars().map(simple_upper_case))
}
