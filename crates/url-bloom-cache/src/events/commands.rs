//! Command Messages
//!
//! One command per input line: a case-insensitive verb, a single space, and
//! the payload (the rest of the line, internal whitespace included).
//!
//! ```text
//! ADD https://example1.com/page1
//! contains https://example1.com/page1
//! ```

use crate::error::CommandError;

/// A parsed command line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `ADD <item>`
    Add(String),
    /// `CONTAINS <item>`
    Contains(String),
}

impl Command {
    /// Parse one input line
    ///
    /// Returns `Ok(None)` for blank lines and unrecognized verbs, which the
    /// command loop skips. `ADD` or `CONTAINS` without the verb/payload
    /// separator is malformed.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            return Ok(None);
        }

        let (verb, payload) = match line.split_once(' ') {
            Some((verb, payload)) => (verb, Some(payload)),
            None => (line, None),
        };

        let is_add = verb.eq_ignore_ascii_case("ADD");
        if !is_add && !verb.eq_ignore_ascii_case("CONTAINS") {
            return Ok(None);
        }

        let payload = payload.ok_or_else(|| CommandError::MissingPayload {
            line: line.to_string(),
        })?;
        let command = if is_add {
            Command::Add(payload.to_string())
        } else {
            Command::Contains(payload.to_string())
        };

        Ok(Some(command))
    }

    /// The item this command operates on
    pub fn payload(&self) -> &str {
        match self {
            Command::Add(item) | Command::Contains(item) => item,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verbs_case_insensitively() {
        assert_eq!(
            Command::parse("ADD https://a.test").unwrap(),
            Some(Command::Add("https://a.test".to_string()))
        );
        assert_eq!(
            Command::parse("add https://a.test\n").unwrap(),
            Some(Command::Add("https://a.test".to_string()))
        );
        assert_eq!(
            Command::parse("Contains https://a.test\r\n").unwrap(),
            Some(Command::Contains("https://a.test".to_string()))
        );
    }

    #[test]
    fn test_payload_keeps_internal_whitespace() {
        let command = Command::parse("ADD https://a.test/some path  with spaces").unwrap();
        assert_eq!(
            command.as_ref().map(Command::payload),
            Some("https://a.test/some path  with spaces")
        );
    }

    #[test]
    fn test_unknown_verbs_and_blank_lines_are_skipped() {
        assert_eq!(Command::parse("REMOVE https://a.test").unwrap(), None);
        assert_eq!(Command::parse("ADDS https://a.test").unwrap(), None);
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   \n").unwrap(), None);
    }

    #[test]
    fn test_line_without_separator_is_malformed() {
        assert_eq!(
            Command::parse("ADD\n"),
            Err(CommandError::MissingPayload {
                line: "ADD".to_string()
            })
        );
    }

    #[test]
    fn test_bare_unknown_verb_is_skipped() {
        assert_eq!(Command::parse("HELLO").unwrap(), None);
        assert_eq!(Command::parse("QUIT\r\n").unwrap(), None);
        assert_eq!(
            Command::parse("contains"),
            Err(CommandError::MissingPayload {
                line: "contains".to_string()
            })
        );
    }

    #[test]
    fn test_empty_payload_is_allowed() {
        assert_eq!(
            Command::parse("ADD ").unwrap(),
            Some(Command::Add(String::new()))
        );
    }
}
