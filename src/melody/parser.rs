// syn.wave -- synthesizing waveforms from musical notation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

use std::fmt;

use super::lexer::{Lexer, Span, Token};
use super::{Melody, MelodyEvent};
use crate::error::{Error, Result};
use crate::note::Note;

/// A violation of the melody grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    location: Span,
    kind: ParseErrorKind,
    fragment: String,
}

impl ParseError {
    pub fn location(&self) -> Span {
        self.location
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// The source text the error refers to.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ParseErrorKind {
    /// A note or chord is not followed by a duration.
    MissingDuration,
    /// The duration is not a non-negative number of seconds ending in `s`.
    InvalidDuration,
    /// A duration appears where a note or chord was expected.
    UnexpectedDuration,
    UnexpectedGroupClose,
    UnterminatedGroup,
    NestedGroup,
    EmptyGroup,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ParseErrorKind::MissingDuration => "missing duration after",
            ParseErrorKind::InvalidDuration => "invalid duration",
            ParseErrorKind::UnexpectedDuration => "duration without a note",
            ParseErrorKind::UnexpectedGroupClose => "unmatched",
            ParseErrorKind::UnterminatedGroup => "unterminated group",
            ParseErrorKind::NestedGroup => "nested group",
            ParseErrorKind::EmptyGroup => "empty group",
        };
        f.write_str(message)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}` at {}", self.kind, self.fragment, self.location)
    }
}

impl std::error::Error for ParseError {}

/// Parses `(pitch duration)*`, where a pitch is a note or a parenthesized group of notes.
///
/// Needs at most two tokens of lookahead: the pitch and the duration after it.
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<(Span, Token)>,
    current_token: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Lexer::tokenize(source),
            current_token: 0,
        }
    }

    pub fn parse(&mut self) -> Result<Melody> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event()? {
            events.push(event);
        }
        Ok(Melody { events })
    }

    pub fn next_event(&mut self) -> Result<Option<MelodyEvent>> {
        let (span, token) = match self.next_token() {
            Some(next) => next,
            None => return Ok(None),
        };
        let event = match token {
            Token::Note => {
                let note = self.parse_note(span)?;
                let duration = self.parse_duration(span)?;
                MelodyEvent::Note { note, duration }
            }
            Token::ParenOpen => {
                let (notes, group_span) = self.parse_group(span)?;
                let duration = self.parse_duration(group_span)?;
                MelodyEvent::Chord { notes, duration }
            }
            Token::Duration => return Err(self.error(span, ParseErrorKind::UnexpectedDuration)),
            Token::ParenClose => {
                return Err(self.error(span, ParseErrorKind::UnexpectedGroupClose))
            }
        };
        Ok(Some(event))
    }

    /// Parse the rest of a group after the opening parenthesis.
    /// Also returns the span of the whole group.
    fn parse_group(&mut self, open: Span) -> Result<(Vec<Note>, Span)> {
        let mut notes = Vec::new();
        loop {
            match self.peek_token() {
                Some((span, Token::Note)) => {
                    self.next_token();
                    notes.push(self.parse_note(span)?);
                }
                Some((close, Token::ParenClose)) => {
                    self.next_token();
                    let group = Span {
                        begin: open.begin,
                        end: close.end,
                    };
                    if notes.is_empty() {
                        return Err(self.error(group, ParseErrorKind::EmptyGroup));
                    }
                    return Ok((notes, group));
                }
                Some((span, Token::ParenOpen)) => {
                    return Err(self.error(span, ParseErrorKind::NestedGroup))
                }
                // a duration inside the group means the closing parenthesis is missing
                Some((span, Token::Duration)) => {
                    let group = Span {
                        begin: open.begin,
                        end: span.begin,
                    };
                    return Err(self.error(group, ParseErrorKind::UnterminatedGroup));
                }
                None => {
                    let group = Span {
                        begin: open.begin,
                        end: self.source.len(),
                    };
                    return Err(self.error(group, ParseErrorKind::UnterminatedGroup));
                }
            }
        }
    }

    fn parse_note(&self, span: Span) -> Result<Note> {
        self.text(span).parse()
    }

    /// Expect a duration token after the pitch at `pitch`.
    fn parse_duration(&mut self, pitch: Span) -> Result<f64> {
        match self.peek_token() {
            Some((span, Token::Duration)) => {
                self.next_token();
                let seconds = self
                    .text(span)
                    .strip_suffix('s')
                    .and_then(|number| number.parse::<f64>().ok())
                    .filter(|seconds| seconds.is_finite() && *seconds >= 0.0);
                seconds.ok_or_else(|| self.error(span, ParseErrorKind::InvalidDuration))
            }
            _ => Err(self.error(pitch, ParseErrorKind::MissingDuration)),
        }
    }

    fn peek_token(&self) -> Option<(Span, Token)> {
        self.tokens.get(self.current_token).copied()
    }

    fn next_token(&mut self) -> Option<(Span, Token)> {
        let token = self.peek_token();
        if token.is_some() {
            self.current_token += 1;
        }
        token
    }

    fn text(&self, span: Span) -> &'a str {
        &self.source[span.begin..span.end]
    }

    fn error(&self, location: Span, kind: ParseErrorKind) -> Error {
        Error::MalformedMelody {
            source: ParseError {
                location,
                kind,
                fragment: self.text(location).trim_end().to_string(),
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use expect_test::{expect, Expect};

    fn check_error(input: &str, output: Expect) {
        let err = Parser::new(input).parse().unwrap_err();
        output.assert_eq(&err.to_string());
    }

    fn note(name: &str) -> Note {
        name.parse().unwrap()
    }

    #[test]
    fn single_notes() {
        let melody = Parser::new("a4 0.4s e4 0.2s").parse().unwrap();
        assert_eq!(
            melody.events,
            vec![
                MelodyEvent::Note {
                    note: note("a4"),
                    duration: 0.4
                },
                MelodyEvent::Note {
                    note: note("e4"),
                    duration: 0.2
                },
            ]
        );
    }

    #[test]
    fn chord() {
        let melody = Parser::new("(g3 d5) 0.5s").parse().unwrap();
        assert_eq!(
            melody.events,
            vec![MelodyEvent::Chord {
                notes: vec![note("g3"), note("d5")],
                duration: 0.5
            }]
        );
    }

    #[test]
    fn mixed() {
        let melody = Parser::new("g4 0.2s b4 0.2s (g3 d5 g5) 0.5s").parse().unwrap();
        assert_eq!(melody.events.len(), 3);
        assert_eq!(melody.events[2].notes().len(), 3);
        assert!((melody.duration() - 0.9).abs() < 1e-12);
    }

    #[test]
    fn empty() {
        assert!(Parser::new("  ").parse().unwrap().events.is_empty());
    }

    #[test]
    fn missing_duration() {
        check_error(
            "a4 0.4s e4",
            expect![["Malformed melody: missing duration after `e4` at 8..10"]],
        );
        check_error(
            "a4 e4 0.2s",
            expect![["Malformed melody: missing duration after `a4` at 0..2"]],
        );
        check_error(
            "(a4 c4) b4",
            expect![["Malformed melody: missing duration after `(a4 c4)` at 0..7"]],
        );
    }

    #[test]
    fn invalid_duration() {
        check_error(
            "a4 0.4",
            expect![["Malformed melody: invalid duration `0.4` at 3..6"]],
        );
        check_error(
            "a4 0.x4s",
            expect![["Malformed melody: invalid duration `0.x4s` at 3..8"]],
        );
        check_error(
            "a4 -1s",
            expect![["Malformed melody: invalid duration `-1s` at 3..6"]],
        );
    }

    #[test]
    fn group_errors() {
        check_error(
            "(a4 c4 0.5s",
            expect![["Malformed melody: unterminated group `(a4 c4` at 0..7"]],
        );
        check_error(
            "() 0.5s",
            expect![["Malformed melody: empty group `()` at 0..2"]],
        );
        check_error(
            "(a4 (c4)) 0.5s",
            expect![["Malformed melody: nested group `(` at 4..5"]],
        );
        check_error(
            "a4 0.5s ) 0.5s",
            expect![["Malformed melody: unmatched `)` at 8..9"]],
        );
        check_error(
            "0.5s a4",
            expect![["Malformed melody: duration without a note `0.5s` at 0..4"]],
        );
    }

    #[test]
    fn unknown_note() {
        assert_eq!(
            Parser::new("a4 0.1s h2 0.1s").parse(),
            Err(Error::UnknownNote {
                name: "h2".into()
            })
        );
    }
}
