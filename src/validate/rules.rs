use crate::validate::locales::MessageKey;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern compiles")
});

/// One named check in a field's rule chain. Chains are parsed from the
/// compact `"required|min:5|match:/^[a-z]+$/"` form when the validator
/// is constructed, so a bad rule surfaces once, not on every pass.
#[derive(Debug, Clone)]
pub enum Rule {
    Required,
    Email,
    Min(usize),
    Max(usize),
    Match(Regex),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleParseError {
    #[error("unknown rule `{0}`")]
    UnknownRule(String),
    #[error("rule `{0}` is missing its parameter")]
    MissingParameter(String),
    #[error("rule `{rule}` expects a number, got `{param}`")]
    BadParameter { rule: String, param: String },
    #[error("invalid pattern for `match`: {0}")]
    BadPattern(String),
}

impl Rule {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::Min(_) => "min",
            Self::Max(_) => "max",
            Self::Match(_) => "match",
        }
    }

    /// Parses one `name` or `name:param` token.
    pub fn parse(token: &str) -> Result<Self, RuleParseError> {
        let mut parts = token.splitn(2, ':');
        let name = parts.next().unwrap_or_default().trim();
        let param = parts.next();

        match name {
            "required" => Ok(Self::Required),
            "email" => Ok(Self::Email),
            "min" => Ok(Self::Min(parse_count(name, param)?)),
            "max" => Ok(Self::Max(parse_count(name, param)?)),
            "match" => {
                let raw = param.ok_or_else(|| {
                    RuleParseError::MissingParameter(name.to_string())
                })?;
                Regex::new(strip_delimiters(raw))
                    .map(Self::Match)
                    .map_err(|err| RuleParseError::BadPattern(err.to_string()))
            }
            other => Err(RuleParseError::UnknownRule(other.to_string())),
        }
    }

    /// `Some(key)` when `raw` violates the rule. The required rule on a
    /// select field surfaces the select-specific message.
    pub fn check(&self, raw: &str, is_select: bool) -> Option<MessageKey> {
        match self {
            Self::Required => {
                if raw.is_empty() {
                    Some(if is_select {
                        MessageKey::Select
                    } else {
                        MessageKey::Empty
                    })
                } else {
                    None
                }
            }
            Self::Email => (!EMAIL_PATTERN.is_match(raw)).then_some(MessageKey::Email),
            Self::Min(min) => (raw.trim().chars().count() < *min).then_some(MessageKey::Min),
            Self::Max(max) => (raw.trim().chars().count() > *max).then_some(MessageKey::Max),
            Self::Match(pattern) => (!pattern.is_match(raw)).then_some(MessageKey::Match),
        }
    }

    /// Parameters to substitute into this rule's message template.
    pub fn message_params<'a>(&'a self, field: &'a str) -> Vec<(&'a str, String)> {
        match self {
            Self::Min(min) => vec![("min", min.to_string())],
            Self::Max(max) => vec![("max", max.to_string())],
            Self::Required => vec![("name", field.to_string())],
            _ => Vec::new(),
        }
    }
}

/// Parses a pipe-separated chain. Malformed tokens are returned
/// alongside the rules that did parse, so callers can report them and
/// keep going.
pub fn parse_chain(spec: &str) -> (Vec<Rule>, Vec<RuleParseError>) {
    let mut rules = Vec::new();
    let mut issues = Vec::new();

    for token in spec.split('|') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match Rule::parse(token) {
            Ok(rule) => rules.push(rule),
            Err(err) => issues.push(err),
        }
    }

    (rules, issues)
}

fn parse_count(rule: &str, param: Option<&str>) -> Result<usize, RuleParseError> {
    let raw = param.ok_or_else(|| RuleParseError::MissingParameter(rule.to_string()))?;
    raw.trim().parse().map_err(|_| RuleParseError::BadParameter {
        rule: rule.to_string(),
        param: raw.to_string(),
    })
}

/// Rule strings carry regex literals in `/.../` delimiters.
fn strip_delimiters(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('/') && trimmed.ends_with('/') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}
