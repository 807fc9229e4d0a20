use lazy_static::lazy_static;
use regex::Regex;

pub const PASSWORD_TOO_SHORT: &str = "password must be at least 8 characters";
pub const PASSWORD_WEAK: &str = "password must contain at least 1 uppercase letter and 1 number";

const MIN_PASSWORD_LEN: usize = 8;

/// A predicate over one field plus the message shown when it fails.
pub struct Rule {
    pub check: fn(&str) -> bool,
    pub message: &'static str,
}

/// Ordered rules for a single form field.
pub struct FieldRules {
    pub field: &'static str,
    pub rules: Vec<Rule>,
}

impl FieldRules {
    /// Runs every rule and returns the messages of all that fail, in order.
    pub fn check(&self, value: &str) -> Vec<String> {
        self.rules
            .iter()
            .filter(|rule| !(rule.check)(value))
            .map(|rule| rule.message.to_string())
            .collect()
    }
}

fn long_enough(value: &str) -> bool {
    value.chars().count() >= MIN_PASSWORD_LEN
}

/// Uppercase letter and digit on a single line: any line terminator fails the rule.
fn has_upper_and_digit(value: &str) -> bool {
    lazy_static! {
        static ref SINGLE_LINE_RE: Regex = Regex::new(r"^[^\n\r\x{2028}\x{2029}]+$").unwrap();
        static ref UPPER_RE: Regex = Regex::new(r"[A-Z]").unwrap();
        static ref DIGIT_RE: Regex = Regex::new(r"[0-9]").unwrap();
    }
    SINGLE_LINE_RE.is_match(value) && UPPER_RE.is_match(value) && DIGIT_RE.is_match(value)
}

pub fn password_rules() -> FieldRules {
    FieldRules {
        field: "password",
        rules: vec![
            Rule { check: long_enough, message: PASSWORD_TOO_SHORT },
            Rule { check: has_upper_and_digit, message: PASSWORD_WEAK },
        ],
    }
}
