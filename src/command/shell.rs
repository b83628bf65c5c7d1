//! Shell quoting and regex escaping for generated command lines.

/// Quote `s` so a POSIX shell reads it back as a single literal word.
///
/// Words made only of `[A-Za-z0-9_@%+=:,./-]` pass through untouched, the
/// empty string becomes `''`, anything else is single-quoted with embedded
/// quotes written as `'"'"'`.
#[must_use]
pub fn shell_quote(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }
    if s.chars().all(is_shell_safe) {
        return s.to_string();
    }
    format!("'{}'", s.replace('\'', r#"'"'"'"#))
}

const fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '_' | '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-')
}

/// Escape regex metacharacters so `s` matches itself literally.
///
/// `-` is left alone: it is only special inside a class, and project names
/// are full of it.
#[must_use]
pub fn escape_regex_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        if matches!(
            c,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `^<literal prefix>.*$`: every index whose name starts with `prefix`.
#[must_use]
pub fn prefix_pattern(prefix: &str) -> String {
    format!("^{}.*$", escape_regex_literal(prefix))
}
