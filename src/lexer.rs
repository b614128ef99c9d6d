//! Lexical splitting of one input line into shell words.
//!
//! Quoting only affects where word boundaries fall; the produced tokens
//! carry no quote characters and are not interpreted further here. In
//! particular `>` is an ordinary character at this stage — recognizing
//! redirection operators is the job of [`crate::redirect`].

use std::fmt;

/// Errors that can occur while splitting a line into words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexError {
    /// A closing quote (single or double) was not found before end of line.
    UnterminatedQuote,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnterminatedQuote => write!(f, "syntax error: unterminated quote"),
        }
    }
}

impl std::error::Error for LexError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    /// Between words; whitespace is skipped.
    Start,
    /// Accumulating an unquoted stretch of the current word.
    Word,
    /// Inside `'...'`; everything is literal.
    SingleQuote,
    /// Inside `"..."`; backslash escapes only `"` and `\`.
    DoubleQuote,
}

struct LexingFsm {
    input: Vec<char>,
    pos: usize,
    state: LexState,
    current: String,
    tokens: Vec<String>,
}

impl LexingFsm {
    fn new(line: &str) -> Self {
        LexingFsm {
            input: line.chars().collect(),
            pos: 0,
            state: LexState::Start,
            current: String::new(),
            tokens: Vec::new(),
        }
    }

    /// Run the machine over the whole line and return the collected words.
    ///
    /// Being in `Word` state at end of input means a token exists even if it
    /// is empty (`""` produces an empty word); `Start` means there is nothing
    /// left to emit. An open quote state is an error.
    fn make_tokens(mut self) -> Result<Vec<String>, LexError> {
        while let Some(ch) = self.read_char() {
            match self.state {
                LexState::Start => self.handle_start(ch),
                LexState::Word => self.handle_word(ch),
                LexState::SingleQuote => self.handle_single_quote(ch),
                LexState::DoubleQuote => self.handle_double_quote(ch),
            }
        }

        match self.state {
            LexState::SingleQuote | LexState::DoubleQuote => Err(LexError::UnterminatedQuote),
            LexState::Word => {
                self.tokens.push(std::mem::take(&mut self.current));
                Ok(self.tokens)
            }
            LexState::Start => Ok(self.tokens),
        }
    }

    fn read_char(&mut self) -> Option<char> {
        let ch = self.input.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn handle_start(&mut self, ch: char) {
        match ch {
            c if c.is_whitespace() => {}
            '\'' => self.state = LexState::SingleQuote,
            '"' => self.state = LexState::DoubleQuote,
            '\\' => {
                if let Some(next) = self.read_char() {
                    self.current.push(next);
                }
                self.state = LexState::Word;
            }
            c => {
                self.current.push(c);
                self.state = LexState::Word;
            }
        }
    }

    fn handle_word(&mut self, ch: char) {
        match ch {
            c if c.is_whitespace() => {
                self.tokens.push(std::mem::take(&mut self.current));
                self.state = LexState::Start;
            }
            '\'' => self.state = LexState::SingleQuote,
            '"' => self.state = LexState::DoubleQuote,
            // A trailing backslash at end of line escapes nothing and is dropped.
            '\\' => {
                if let Some(next) = self.read_char() {
                    self.current.push(next);
                }
            }
            c => self.current.push(c),
        }
    }

    fn handle_single_quote(&mut self, ch: char) {
        match ch {
            '\'' => self.state = LexState::Word,
            c => self.current.push(c),
        }
    }

    fn handle_double_quote(&mut self, ch: char) {
        match ch {
            '"' => self.state = LexState::Word,
            '\\' => match self.peek_char() {
                Some(next @ ('"' | '\\')) => {
                    self.read_char();
                    self.current.push(next);
                }
                // Backslash before anything else stays literal inside double quotes.
                _ => self.current.push('\\'),
            },
            c => self.current.push(c),
        }
    }
}

/// Split `line` into shell words, honoring quoting and escaping.
///
/// Empty or whitespace-only input yields an empty vector; callers treat that
/// as "nothing to execute". An unterminated quote is a syntax error rather
/// than being silently swallowed to end of line.
pub fn split_line(line: &str) -> Result<Vec<String>, LexError> {
    LexingFsm::new(line).make_tokens()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<String> {
        split_line(line).unwrap()
    }

    #[test]
    fn test_simple_command() {
        assert_eq!(words("echo hello"), vec!["echo", "hello"]);
    }

    #[test]
    fn test_empty_and_whitespace_only_input() {
        assert!(words("").is_empty());
        assert!(words("   \t  ").is_empty());
    }

    #[test]
    fn test_double_quotes_preserve_inner_whitespace() {
        assert_eq!(words("echo \"a  b\" c"), vec!["echo", "a  b", "c"]);
    }

    #[test]
    fn test_single_quotes_are_literal() {
        assert_eq!(words("echo 'hello   world'"), vec!["echo", "hello   world"]);
        // no escaping inside single quotes
        assert_eq!(words(r"echo '\n'"), vec!["echo", r"\n"]);
    }

    #[test]
    fn test_adjacent_segments_form_one_word() {
        assert_eq!(words(r#"echo a"b c"d"#), vec!["echo", "ab cd"]);
        assert_eq!(words("echo 'ab''cd'"), vec!["echo", "abcd"]);
    }

    #[test]
    fn test_quotes_can_produce_empty_word() {
        assert_eq!(words("echo ''"), vec!["echo", ""]);
        assert_eq!(words("echo \"\" x"), vec!["echo", "", "x"]);
    }

    #[test]
    fn test_backslash_escapes_outside_quotes() {
        assert_eq!(words(r"echo a\ b"), vec!["echo", "a b"]);
        assert_eq!(words(r"echo \'x\'"), vec!["echo", "'x'"]);
    }

    #[test]
    fn test_backslash_inside_double_quotes() {
        // only `"` and `\` are escapable
        assert_eq!(words(r#"echo "a\"b""#), vec!["echo", "a\"b"]);
        assert_eq!(words(r#"echo "a\\b""#), vec!["echo", r"a\b"]);
        // anything else keeps the backslash
        assert_eq!(words(r#"echo "a\nb""#), vec!["echo", r"a\nb"]);
    }

    #[test]
    fn test_trailing_backslash_is_dropped() {
        assert_eq!(words("echo a\\"), vec!["echo", "a"]);
    }

    #[test]
    fn test_unterminated_quote_is_an_error() {
        assert_eq!(split_line("echo 'oops"), Err(LexError::UnterminatedQuote));
        assert_eq!(split_line("echo \"oops"), Err(LexError::UnterminatedQuote));
    }

    #[test]
    fn test_redirect_chars_are_plain_text_here() {
        assert_eq!(words("echo hi > file.txt"), vec!["echo", "hi", ">", "file.txt"]);
        assert_eq!(words("echo hi 2>> log"), vec!["echo", "hi", "2>>", "log"]);
    }
}
