use crate::{
    MatchBudget, MatchError,
    segment::{is_word_char, simple_upper_case},
};

const VALUE_MARKER: &str = "$value";
const VALUE_REPLACEMENT: &str = "Content";
// Characters visited between two deadline checks.
const DEADLINE_INTERVAL: usize = 1024;

/// Turns raw API labels into identifier-safe fragments.
///
/// Absent labels go through `Option::map`, which keeps them absent.
pub trait SymbolName {
    fn symbol(&self) -> &str;

    /// `$value` -> `Content`, every occurrence.
    fn replace_value_identifier(&self) -> String {
        self.symbol().replace(VALUE_MARKER, VALUE_REPLACEMENT)
    }

    /// Leaves an unresolved (empty) name empty.
    fn append(&self, suffix: &str) -> String {
        let original = self.symbol();
        if original.is_empty() {
            return String::new();
        }
        format!("{original}{suffix}")
    }

    fn to_first_character_upper_case(&self) -> String {
        let mut c = self.symbol().chars();
        match c.next() {
            None => String::new(),
            Some(f) => std::iter::once(simple_upper_case(f)).chain(c).collect(),
        }
    }

    /// Drops disallowed characters, upper-casing the word character that
    /// follows each one: `foo-bar` -> `fooBar`, `trailing-` -> `trailing`.
    ///
    /// Returns the label unchanged if the cleanup budget runs out.
    fn cleanup_symbol_name(&self) -> String {
        cleanup_or_keep(self, &MatchBudget::default())
    }

    fn try_cleanup_symbol_name(&self, budget: &MatchBudget) -> Result<String, MatchError> {
        let original = self.symbol();
        if original.is_empty() {
            return Ok(String::new());
        }

        let deadline = budget.symbol_cleanup_deadline();
        let mut cleaned = String::with_capacity(original.len());
        let mut chars = original.chars().peekable();
        let mut visited = 0;
        let mut next_check = 0;

        while let Some(c) = chars.next() {
            if visited >= next_check {
                deadline.check()?;
                next_check = visited + DEADLINE_INTERVAL;
            }
            visited += 1;

            if !is_disallowed(c) {
                cleaned.push(c);
                continue;
            }
            if let Some(following) = chars.next_if(|&n| is_word_char(n)) {
                visited += 1;
                cleaned.push(simple_upper_case(following));
            }
        }

        Ok(cleaned)
    }
}

impl SymbolName for str {
    fn symbol(&self) -> &str {
        self
    }
}

pub(crate) fn cleanup_or_keep<S: SymbolName + ?Sized>(label: &S, budget: &MatchBudget) -> String {
    match label.try_cleanup_symbol_name(budget) {
        Ok(cleaned) => cleaned,
        Err(err) => {
            tracing::warn!(error = %err, "keeping symbol name as is");
            label.symbol().to_string()
        }
    }
}

fn is_disallowed(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '"' | '!'
                | '#'
                | '$'
                | '%'
                | '&'
                | '\''
                | '('
                | ')'
                | '*'
                | '+'
                | ','
                | '.'
                | '/'
                | ':'
                | ';'
                | '<'
                | '='
                | '>'
                | '?'
                | '@'
                | '['
                | ']'
                | '\\'
                | '^'
                | '`'
                | '{'
                | '}'
                | '|'
                | '~'
                | '-'
        )
}
