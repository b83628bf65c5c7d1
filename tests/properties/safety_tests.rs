use proptest::prelude::*;
use regex::Regex;

use curator_cron::command::{escape_regex_literal, prefix_pattern, shell_quote};
use curator_cron::policy::{PROJECT_NAME_MAX_LEN, check_project_name};

/// Read one POSIX shell word made of bare, single-quoted and double-quoted
/// segments. Returns `None` if the word would split or is unterminated.
fn read_word(word: &str) -> Option<String> {
    let mut out = String::new();
    let mut chars = word.chars();
    while let Some(c) = chars.next() {
        match c {
            '\'' => loop {
                match chars.next()? {
                    '\'' => break,
                    other => out.push(other),
                }
            },
            '"' => loop {
                match chars.next()? {
                    '"' => break,
                    '\\' | '$' | '`' => return None,
                    other => out.push(other),
                }
            },
            c if c.is_whitespace() => return None,
            '\\' | '$' | '`' | ';' | '&' | '|' | '<' | '>' | '(' | ')' | '*' | '?' | '[' | '#'
            | '~' => return None,
            other => out.push(other),
        }
    }
    Some(out)
}

proptest! {
    #[test]
    fn test_shell_quote_reads_back_as_one_word(s in any::<String>()) {
        let quoted = shell_quote(&s);
        prop_assert_eq!(read_word(&quoted), Some(s));
    }

    #[test]
    fn test_shell_quote_leaves_safe_words_alone(s in "[A-Za-z0-9_@%+=:,./-]{1,40}") {
        prop_assert_eq!(shell_quote(&s), s);
    }

    #[test]
    fn test_escaped_literal_matches_itself(s in "[ -~]{0,40}") {
        let re = Regex::new(&format!("^{}$", escape_regex_literal(&s))).unwrap();
        prop_assert!(re.is_match(&s));
    }

    #[test]
    fn test_prefix_pattern_matches_only_prefixed_names(
        prefix in "[ -~]{1,20}",
        suffix in "[a-z0-9.-]{0,20}",
        other in "[a-z0-9.-]{1,20}",
    ) {
        let re = Regex::new(&prefix_pattern(&prefix)).unwrap();
        let matching = format!("{prefix}{suffix}");
        prop_assert!(re.is_match(&matching));
        if !other.starts_with(&prefix) {
            prop_assert!(!re.is_match(&other));
        }
    }

    #[test]
    fn test_valid_project_names_pass(name in "[a-z0-9]([-a-z0-9]{0,61}[a-z0-9])?") {
        prop_assert!(name.len() <= PROJECT_NAME_MAX_LEN);
        prop_assert!(check_project_name(&name).is_ok());
    }

    #[test]
    fn test_names_with_forbidden_characters_fail(
        head in "[a-z0-9]{0,10}",
        bad in "[A-Z_.$ ]",
        tail in "[a-z0-9]{0,10}",
    ) {
        let name = format!("{head}{bad}{tail}");
        prop_assert!(check_project_name(&name).is_err());
    }

    #[test]
    fn test_names_with_dash_at_either_end_fail(body in "[a-z0-9]{1,20}") {
        let leading = format!("-{body}");
        let trailing = format!("{body}-");
        prop_assert!(check_project_name(&leading).is_err());
        prop_assert!(check_project_name(&trailing).is_err());
    }

    #[test]
    fn test_overlong_names_fail(name in "[a-z0-9]{64,100}") {
        prop_assert!(check_project_name(&name).is_err());
    }
}
