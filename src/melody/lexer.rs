// syn.wave -- synthesizing waveforms from musical notation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Implements the lexer for melody strings like `g4 0.2s (g3 d5 g5) 0.5s`.

use std::fmt;

/// Byte range of a token in the source text.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.begin, self.end)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Token {
    /// A word that should name a note, e.g. `a#4`.
    Note,
    /// A word starting like a number, e.g. `0.5s`.
    Duration,

    // Grouping of chords
    ParenOpen,
    ParenClose,
}

pub struct Lexer<'a> {
    input: &'a str,
    stream: std::str::CharIndices<'a>,
    /// Byte-offset where the current token started
    token_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            stream: input.char_indices(),
            token_start: 0,
        }
    }

    /// Lex the whole input at once.
    pub fn tokenize(input: &'a str) -> Vec<(Span, Token)> {
        let mut lexer = Lexer::new(input);
        std::iter::from_fn(|| lexer.next_token()).collect()
    }

    /// Return the byte-offset of the next character that would be read.
    pub fn current_offset(&self) -> usize {
        self.peek_char().map_or(self.input.len(), |(pos, _)| pos)
    }

    fn peek_char(&self) -> Option<(usize, char)> {
        self.stream.clone().next()
    }

    fn next_char(&mut self) -> Option<(usize, char)> {
        self.stream.next()
    }

    /// Indentify the next token. Every non-whitespace character is part of some token.
    pub fn next_token(&mut self) -> Option<(Span, Token)> {
        while let Some((pos, ch)) = self.next_char() {
            self.token_start = pos;
            let token = match ch {
                '(' => self.pack_token(Token::ParenOpen),
                ')' => self.pack_token(Token::ParenClose),
                _ if ch.is_whitespace() => continue,
                _ if charsets::is_number_start(ch) => self.lex_word(Token::Duration),
                _ => self.lex_word(Token::Note),
            };
            return Some(token);
        }
        None
    }

    /// Words extend up to the next whitespace or parenthesis.
    fn lex_word(&mut self, token: Token) -> (Span, Token) {
        while let Some((_, ch)) = self.peek_char() {
            if charsets::is_word_end(ch) {
                break;
            }
            self.next_char();
        }
        self.pack_token(token)
    }

    fn pack_token(&self, token: Token) -> (Span, Token) {
        (
            Span {
                begin: self.token_start,
                end: self.current_offset(),
            },
            token,
        )
    }
}

mod charsets {
    pub fn is_number_start(ch: char) -> bool {
        ch.is_ascii_digit() || ch == '.' || ch == '+' || ch == '-'
    }

    pub fn is_word_end(ch: char) -> bool {
        ch.is_whitespace() || ch == '(' || ch == ')'
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use expect_test::{expect, Expect};

    fn check(input: &str, output: Expect) {
        let tokens: Vec<_> = Lexer::tokenize(input)
            .into_iter()
            .map(|(span, token)| format!("{:?}({:?})", token, &input[span.begin..span.end]))
            .collect();
        output.assert_eq(&tokens.join(" "));
    }

    #[test]
    fn notes_and_durations() {
        check(
            "a4 0.4s e4 0.2s",
            expect![[r#"Note("a4") Duration("0.4s") Note("e4") Duration("0.2s")"#]],
        );
    }

    #[test]
    fn groups() {
        check(
            "g4 0.2s (g3 d5 g5) 0.5s",
            expect![[r#"Note("g4") Duration("0.2s") ParenOpen("(") Note("g3") Note("d5") Note("g5") ParenClose(")") Duration("0.5s")"#]],
        );
        check(
            "(a4)1s",
            expect![[r#"ParenOpen("(") Note("a4") ParenClose(")") Duration("1s")"#]],
        );
    }

    #[test]
    fn whitespace() {
        check("", expect![[""]]);
        check(" \n\t ", expect![[""]]);
        check(
            "\n  c#4\t.5s\n",
            expect![[r#"Note("c#4") Duration(".5s")"#]],
        );
    }

    #[test]
    fn unicode_spans() {
        let tokens = Lexer::tokenize("c♯6 1s");
        assert_eq!(
            tokens,
            vec![
                (Span { begin: 0, end: 5 }, Token::Note),
                (Span { begin: 6, end: 8 }, Token::Duration)
            ]
        );
    }
}
