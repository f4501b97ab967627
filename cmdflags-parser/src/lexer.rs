//! A lexer for classifying raw argument tokens.

/// Defines a `Token` that has been read from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Token<'a> {
    /// A cluster of short flags with the leading hyphen stripped (e.g. `fg` from `-fg`).
    Cluster(&'a str),

    /// A long flag with the leading double hyphen stripped (e.g. `foo` from `--foo`).
    Long(&'a str),

    /// Anything else. Values take no part in flag resolution.
    Value(&'a str),
}

impl Token<'_> {
    /// Evaluate if the token string is a cluster of short flags (e.g. `-f`, `-fg`).
    ///
    /// A lone `-` is a value, not an empty cluster.
    #[inline(always)]
    pub fn is_short_cluster(input: &str) -> bool {
        input != "-" && input.starts_with('-') && !input.starts_with("--")
    }

    /// Evaluate if the token string is a long flag (e.g. `--foo`).
    ///
    /// A lone `--` is a value, not an empty flag.
    #[inline(always)]
    pub fn is_long_flag(input: &str) -> bool {
        input != "--" && input.starts_with("--")
    }

    /// Evaluate if the token string is a flag.
    #[inline(always)]
    pub fn is_flag(input: &str) -> bool {
        Self::is_short_cluster(input) || Self::is_long_flag(input)
    }
}

/// Defines a `Lexer` that is responsible for streaming tokens from the command line input.
///
/// A lexer acts like a forward iterator.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    argv: &'a [&'a str],
    cursor: usize,
}

impl<'a> Tokens<'a> {
    /// Create a new lexer from the command line input.
    pub fn new(argv: &'a [&'a str]) -> Self {
        Tokens { argv, cursor: 0 }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.argv.len() {
            return None;
        }

        let arg = self.argv[self.cursor];
        self.cursor += 1;

        // Long flag.
        if Token::is_long_flag(arg) {
            let (_, name) = arg.split_at(2);
            return Some(Token::Long(name));
        }

        // Short flag cluster.
        if Token::is_short_cluster(arg) {
            let (_, body) = arg.split_at(1);
            return Some(Token::Cluster(body));
        }

        Some(Token::Value(arg))
    }
}

/// Conversion of a command line input into a token stream.
pub trait IntoTokens<'a> {
    /// Build a token stream over the input.
    fn into_tokens(self) -> Tokens<'a>;
}

impl<'a> IntoTokens<'a> for Tokens<'a> {
    #[inline(always)]
    fn into_tokens(self) -> Tokens<'a> {
        self
    }
}

impl<'a> IntoTokens<'a> for &'a [&'a str] {
    #[inline(always)]
    fn into_tokens(self) -> Tokens<'a> {
        Tokens::new(self)
    }
}
