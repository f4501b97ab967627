//! A parser for resolving flag presence from a token stream.

use core::fmt;

use heapless::Vec;

use crate::flag::FlagDef;
use crate::lexer::{IntoTokens, Token};

/// Defines the possible errors that may occur during parsing of flags.
///
/// Unknown or malformed flags are never errors. They surface through
/// [`ParsedFlags::unknown_flags`] or are skipped as plain values.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// Insufficient space for recording flags.
    #[error("out of parser memory space")]
    OutOfMemory,
}

/// A flag-looking token that matches no declared flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnknownFlag<'a> {
    /// An unrecognized member of a short flag cluster (e.g. `z` from `-fz`).
    Short(char),

    /// An unrecognized long flag, kept verbatim (e.g. `bar` from `--bar`).
    Long(&'a str),
}

impl fmt::Display for UnknownFlag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownFlag::Short(c) => write!(f, "{}", c),
            UnknownFlag::Long(name) => f.write_str(name),
        }
    }
}

/// Lazily renders a set of unknown flags as a comma separated list, e.g. for a warning
/// sent back to the command sender.
///
/// An empty set renders as the literal `None`. Members render in the order they were
/// first seen, with no trailing separator.
pub struct UnknownFlagsList<'p, 'a> {
    flags: &'p [UnknownFlag<'a>],
}

impl fmt::Display for UnknownFlagsList<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.flags.is_empty() {
            return f.write_str("None");
        }

        for (i, flag) in self.flags.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }

            write!(f, "{}", flag)?;
        }

        Ok(())
    }
}

/// Defines the result of flag parsing. This is a simple key-value store that offers a
/// look-up of presence per declared flag, along with the set of flag-looking tokens that
/// matched no declaration.
///
/// The result is built once by [`ParsedFlags::try_parse`] and is read-only afterwards.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParsedFlags<'a, const FLAG_COUNT_MAX: usize = 8> {
    presence: Vec<(&'a str, bool), FLAG_COUNT_MAX>,
    unknown: Vec<UnknownFlag<'a>, FLAG_COUNT_MAX>,
}

impl<'a, const SIZE: usize> ParsedFlags<'a, SIZE> {
    /// Parse the command line input from a token stream. The result maps every declared
    /// flag to its presence.
    pub fn parse(argv: impl IntoTokens<'a>, flags: &[FlagDef<'a>]) -> Self {
        Self::try_parse(argv, flags).expect("cannot parse flags")
    }

    /// Try to parse the input arguments.
    ///
    /// Every declared flag gets a presence entry, `false` unless one of its forms was
    /// found. Short characters accumulate across all clusters of the input, so `-f -g`
    /// has the same effect as `-fg`. Repeated occurrences of a flag are ignored.
    pub fn try_parse(argv: impl IntoTokens<'a>, flags: &[FlagDef<'a>]) -> Result<Self, Error> {
        let tokens = argv.into_tokens();

        let mut out = Self::default();
        let mut seen_shorts: Vec<char, SIZE> = Vec::new();

        for token in tokens.clone() {
            match token {
                Token::Cluster(body) => {
                    for ch in body.chars() {
                        if seen_shorts.contains(&ch) {
                            continue;
                        }

                        if !flags.iter().any(|flag| flag.short() == ch) {
                            out.push_unknown(UnknownFlag::Short(ch))?;
                            continue;
                        }

                        if seen_shorts.push(ch).is_err() {
                            return Err(Error::OutOfMemory);
                        }
                    }
                }

                Token::Long(name) => {
                    if !flags.iter().any(|flag| flag.long().eq_ignore_ascii_case(name)) {
                        out.push_unknown(UnknownFlag::Long(name))?;
                    }
                }

                Token::Value(_) => {}
            }
        }

        // Presence is resolved against the raw tokens rather than an intermediate
        // collection, so repeated or mixed-case long flags cannot skew the outcome.
        for flag in flags {
            let passed = seen_shorts.contains(&flag.short())
                || tokens.clone().any(|token| match token {
                    Token::Long(name) => flag.long().eq_ignore_ascii_case(name),
                    _ => false,
                });

            if out.presence.push((flag.long(), passed)).is_err() {
                return Err(Error::OutOfMemory);
            }
        }

        Ok(out)
    }

    fn push_unknown(&mut self, flag: UnknownFlag<'a>) -> Result<(), Error> {
        if self.unknown.contains(&flag) {
            return Ok(());
        }

        if self.unknown.push(flag).is_err() {
            return Err(Error::OutOfMemory);
        }

        Ok(())
    }

    /// Evaluate if the flag with the given long name was passed.
    ///
    /// Names that were never declared evaluate to `false`. The look-up is an exact match
    /// on the declared name.
    pub fn was_passed(&self, long: &str) -> bool {
        self.presence
            .iter()
            .find(|(name, _)| *name == long)
            .map(|(_, passed)| *passed)
            .unwrap_or(false)
    }

    /// Evaluate if the given declared flag was passed, looked up by its long name.
    #[inline(always)]
    pub fn was_passed_flag(&self, flag: &FlagDef<'_>) -> bool {
        self.was_passed(flag.long())
    }

    /// The distinct flag-looking tokens that matched no declaration, in the order first
    /// seen.
    #[inline(always)]
    pub fn unknown_flags(&self) -> &[UnknownFlag<'a>] {
        &self.unknown
    }

    /// Check if any unknown flag was found.
    #[inline(always)]
    pub fn has_unknown_flags(&self) -> bool {
        !self.unknown.is_empty()
    }

    /// Render the unknown flags for display.
    pub fn format_unknown_flags(&self) -> UnknownFlagsList<'_, 'a> {
        UnknownFlagsList {
            flags: &self.unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use crate::lexer::Tokens;

    use super::*;

    const FLAGS: &[FlagDef<'static>] = &[FlagDef::new("goo", 'g'), FlagDef::new("foo", 'f')];

    #[test]
    fn it_should_default_every_flag_to_not_passed() {
        let parsed: ParsedFlags<'_, 8> = ParsedFlags::parse(Tokens::new(&[]), FLAGS);

        assert_that!(parsed.was_passed("goo"), eq(false));
        assert_that!(parsed.was_passed("foo"), eq(false));
        assert_that!(parsed.has_unknown_flags(), eq(false));
    }

    #[test]
    fn it_should_detect_short_flag() {
        let parsed: ParsedFlags<'_, 8> = ParsedFlags::parse(Tokens::new(&["-f"]), FLAGS);

        assert_that!(parsed.was_passed("foo"), eq(true));
        assert_that!(parsed.was_passed("goo"), eq(false));
        assert_that!(parsed.has_unknown_flags(), eq(false));
    }

    #[test]
    fn it_should_collect_unknown_short_flag() {
        let parsed: ParsedFlags<'_, 8> = ParsedFlags::parse(Tokens::new(&["-z"]), FLAGS);

        assert_that!(parsed.was_passed("foo"), eq(false));
        assert_that!(parsed.was_passed("goo"), eq(false));
        assert_that!(parsed.unknown_flags(), eq(&[UnknownFlag::Short('z')][..]));
    }

    #[test]
    fn it_should_treat_cluster_like_separate_short_flags() {
        let clustered: ParsedFlags<'_, 8> = ParsedFlags::parse(Tokens::new(&["-fg"]), FLAGS);
        let separate: ParsedFlags<'_, 8> = ParsedFlags::parse(Tokens::new(&["-f", "-g"]), FLAGS);

        for flag in FLAGS {
            assert_that!(clustered.was_passed_flag(flag), eq(true));
            assert_that!(
                clustered.was_passed_flag(flag),
                eq(separate.was_passed_flag(flag))
            );
        }
    }

    #[test]
    fn it_should_match_short_flags_case_sensitively() {
        let parsed: ParsedFlags<'_, 8> = ParsedFlags::parse(Tokens::new(&["-F"]), FLAGS);

        assert_that!(parsed.was_passed("foo"), eq(false));
        assert_that!(parsed.unknown_flags(), eq(&[UnknownFlag::Short('F')][..]));
    }

    #[test]
    fn it_should_match_long_flags_case_insensitively() {
        let parsed: ParsedFlags<'_, 8> = ParsedFlags::parse(Tokens::new(&["--FOO"]), FLAGS);

        assert_that!(parsed.was_passed("foo"), eq(true));
        assert_that!(parsed.has_unknown_flags(), eq(false));
    }

    #[test]
    fn it_should_ignore_repeated_flags() {
        let repeated: ParsedFlags<'_, 8> =
            ParsedFlags::parse(Tokens::new(&["--foo", "--foo", "-ff"]), FLAGS);
        let once: ParsedFlags<'_, 8> = ParsedFlags::parse(Tokens::new(&["--foo"]), FLAGS);

        assert_that!(repeated.was_passed("foo"), eq(true));
        assert_that!(repeated.was_passed("foo"), eq(once.was_passed("foo")));
        assert_that!(repeated.has_unknown_flags(), eq(false));
    }

    #[test]
    fn it_should_resolve_mixed_case_duplicate_long_flags_from_raw_input() {
        let parsed: ParsedFlags<'_, 8> = ParsedFlags::parse(Tokens::new(&["--Foo", "--foo"]), FLAGS);

        assert_that!(parsed.was_passed("foo"), eq(true));
        assert_that!(parsed.has_unknown_flags(), eq(false));
    }

    #[test]
    fn it_should_keep_unknown_long_flags_verbatim() {
        let parsed: ParsedFlags<'_, 8> = ParsedFlags::parse(Tokens::new(&["--Bar", "--bar"]), FLAGS);

        assert_that!(
            parsed.unknown_flags(),
            eq(&[UnknownFlag::Long("Bar"), UnknownFlag::Long("bar")][..])
        );
    }

    #[test]
    fn it_should_skip_irrelevant_tokens() {
        let noisy: ParsedFlags<'_, 8> =
            ParsedFlags::parse(Tokens::new(&["hello", "-", "-fz", "--", "world"]), FLAGS);
        let quiet: ParsedFlags<'_, 8> = ParsedFlags::parse(Tokens::new(&["-fz"]), FLAGS);

        assert_that!(noisy.was_passed("foo"), eq(quiet.was_passed("foo")));
        assert_that!(noisy.was_passed("goo"), eq(quiet.was_passed("goo")));
        assert_that!(noisy.unknown_flags(), eq(quiet.unknown_flags()));
    }

    #[test]
    fn it_should_return_false_for_undeclared_name() {
        let parsed: ParsedFlags<'_, 8> = ParsedFlags::parse(Tokens::new(&["--foo"]), FLAGS);

        assert_that!(parsed.was_passed("quux"), eq(false));
    }

    #[test]
    fn it_should_resolve_full_cluster() {
        let parsed: ParsedFlags<'_, 8> = ParsedFlags::parse(Tokens::new(&["-fg"]), FLAGS);

        assert_that!(parsed.was_passed("goo"), eq(true));
        assert_that!(parsed.was_passed("foo"), eq(true));
        assert_that!(parsed.has_unknown_flags(), eq(false));
    }

    #[test]
    fn it_should_split_mixed_input_into_presence_and_unknowns() {
        let parsed: ParsedFlags<'_, 8> = ParsedFlags::parse(Tokens::new(&["-fz", "--bar"]), FLAGS);

        assert_that!(parsed.was_passed("foo"), eq(true));
        assert_that!(parsed.was_passed("goo"), eq(false));
        assert_that!(
            parsed.unknown_flags(),
            eq(&[UnknownFlag::Short('z'), UnknownFlag::Long("bar")][..])
        );
    }

    #[test]
    fn it_should_render_empty_unknown_flags_as_none() {
        let parsed: ParsedFlags<'_, 8> = ParsedFlags::parse(Tokens::new(&["-fg"]), FLAGS);

        let rendered = std::format!("{}", parsed.format_unknown_flags());
        assert_that!(rendered.as_str(), eq("None"));
    }

    #[test]
    fn it_should_render_unknown_flags_as_comma_separated_list() {
        let parsed: ParsedFlags<'_, 8> = ParsedFlags::parse(Tokens::new(&["-fz", "--bar"]), FLAGS);

        let rendered = std::format!("{}", parsed.format_unknown_flags());
        assert_that!(rendered.as_str(), eq("z, bar"));
    }

    #[test]
    fn it_should_fail_when_out_of_space_for_unknown_flags() {
        let res: core::result::Result<ParsedFlags<'_, 2>, _> = ParsedFlags::try_parse(Tokens::new(&["-xyz"]), FLAGS);

        assert_that!(res.is_err(), eq(true));
        assert_that!(res.unwrap_err(), eq(&Error::OutOfMemory));
    }

    #[test]
    fn it_should_fail_when_out_of_space_for_declarations() {
        let res: core::result::Result<ParsedFlags<'_, 1>, _> = ParsedFlags::try_parse(Tokens::new(&["-f"]), FLAGS);

        assert_that!(res.is_err(), eq(true));
        assert_that!(res.unwrap_err(), eq(&Error::OutOfMemory));
    }

    #[test]
    fn it_should_parse_from_a_plain_slice() {
        let argv: &[&str] = &["--goo"];
        let parsed: ParsedFlags<'_, 8> = ParsedFlags::parse(argv, FLAGS);

        assert_that!(parsed.was_passed("goo"), eq(true));
    }
}
