// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Line parser for the host command protocol.
//!
//! Bytes are pushed in one at a time as they arrive on the serial link. A command is decoded when
//! its `\n` terminator is seen, before anything reaches the controller.

use crate::control::Gain;
use crate::protocol::messages::*;

enum State {
    Collecting,
    /// Line overflowed the buffer; drop bytes until the next terminator.
    Discarding,
}

pub struct Parser {
    state: State,
    buf: [u8; MAX_LINE_LEN],
    len: usize,
    /// A `\r` was seen; it is dropped if the terminator follows, kept otherwise.
    pending_cr: bool,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: State::Collecting,
            buf: [0; MAX_LINE_LEN],
            len: 0,
            pending_cr: false,
        }
    }

    /// Process a single incoming byte. Returns `Some` once a complete, non-empty line was seen.
    pub fn push(&mut self, byte: u8) -> Option<Result<Command, ParseError>> {
        match self.state {
            State::Collecting => {
                if byte == END_BYTE {
                    let len = self.len;
                    self.len = 0;
                    self.pending_cr = false;
                    return decode_line(&self.buf[..len]);
                }
                if core::mem::take(&mut self.pending_cr) {
                    if let Err(err) = self.store(b'\r') {
                        return Some(Err(err));
                    }
                }
                if byte == b'\r' {
                    self.pending_cr = true;
                } else if let Err(err) = self.store(byte) {
                    return Some(Err(err));
                }
            }
            State::Discarding => {
                if byte == END_BYTE {
                    self.state = State::Collecting;
                }
            }
        }
        None
    }

    fn store(&mut self, byte: u8) -> Result<(), ParseError> {
        if self.len == MAX_LINE_LEN {
            self.state = State::Discarding;
            self.len = 0;
            return Err(ParseError::Overflow);
        }
        self.buf[self.len] = byte;
        self.len += 1;
        Ok(())
    }
}

fn decode_line(bytes: &[u8]) -> Option<Result<Command, ParseError>> {
    let line = match core::str::from_utf8(bytes) {
        Ok(line) => line.trim(),
        Err(_) => return Some(Err(ParseError::UnknownCommand)),
    };
    if line.is_empty() {
        return None;
    }
    Some(decode(line))
}

/// Decode one command line (terminator already stripped).
pub fn decode(line: &str) -> Result<Command, ParseError> {
    match line {
        CMD_START => return Ok(Command::Start),
        CMD_STOP => return Ok(Command::Stop),
        _ => {}
    }

    let bytes = line.as_bytes();
    match bytes.first() {
        Some(&CMD_TARGET) => parse_value(&line[1..]).map(Command::SetTarget),
        Some(&CMD_GAIN) => {
            let gain = match bytes.get(1) {
                Some(b'p') => Gain::P,
                Some(b'i') => Gain::I,
                Some(b'd') => Gain::D,
                _ => return Err(ParseError::UnknownGain),
            };
            parse_value(&line[2..]).map(|value| Command::SetGain(gain, value))
        }
        _ => Err(ParseError::UnknownCommand),
    }
}

fn parse_value(s: &str) -> Result<f32, ParseError> {
    s.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(ParseError::InvalidNumber)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(parser: &mut Parser, bytes: &[u8]) -> Vec<Result<Command, ParseError>> {
        bytes.iter().filter_map(|&b| parser.push(b)).collect()
    }

    #[test]
    fn decodes_target() {
        assert_eq!(decode("b120.5"), Ok(Command::SetTarget(120.5)));
        assert_eq!(decode("b-3"), Ok(Command::SetTarget(-3.0)));
    }

    #[test]
    fn decodes_gains() {
        assert_eq!(decode("kp30"), Ok(Command::SetGain(Gain::P, 30.0)));
        assert_eq!(decode("ki0.25"), Ok(Command::SetGain(Gain::I, 0.25)));
        assert_eq!(decode("kd-1.5"), Ok(Command::SetGain(Gain::D, -1.5)));
    }

    #[test]
    fn decodes_start_stop() {
        assert_eq!(decode("start"), Ok(Command::Start));
        assert_eq!(decode("stop"), Ok(Command::Stop));
    }

    #[test]
    fn rejects_bad_lines() {
        assert_eq!(decode("x12"), Err(ParseError::UnknownCommand));
        assert_eq!(decode("kx1.0"), Err(ParseError::UnknownGain));
        assert_eq!(decode("k"), Err(ParseError::UnknownGain));
        assert_eq!(decode("b"), Err(ParseError::InvalidNumber));
        assert_eq!(decode("babc"), Err(ParseError::InvalidNumber));
        assert_eq!(decode("bnan"), Err(ParseError::InvalidNumber));
        assert_eq!(decode("kpinf"), Err(ParseError::InvalidNumber));
    }

    #[test]
    fn splits_stream_into_lines() {
        let mut parser = Parser::new();
        let out = feed(&mut parser, b"b10\r\nkp30\nstart\n");
        assert_eq!(
            out,
            vec![
                Ok(Command::SetTarget(10.0)),
                Ok(Command::SetGain(Gain::P, 30.0)),
                Ok(Command::Start),
            ]
        );
    }

    #[test]
    fn carriage_return_only_dropped_before_terminator() {
        let mut parser = Parser::new();
        assert_eq!(
            feed(&mut parser, b"b1\r0\n"),
            vec![Err(ParseError::InvalidNumber)]
        );
        assert_eq!(
            feed(&mut parser, b"b10\r\n"),
            vec![Ok(Command::SetTarget(10.0))]
        );
    }

    #[test]
    fn full_line_with_crlf_fits() {
        let mut parser = Parser::new();
        let mut line = b"b".to_vec();
        line.resize(MAX_LINE_LEN, b'1');
        line.extend_from_slice(b"\r\n");
        let out = feed(&mut parser, &line);
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], Ok(Command::SetTarget(_))));
    }

    #[test]
    fn empty_lines_are_ignored() {
        let mut parser = Parser::new();
        assert!(feed(&mut parser, b"\r\n\n  \n").is_empty());
    }

    #[test]
    fn nothing_until_terminator() {
        let mut parser = Parser::new();
        assert!(feed(&mut parser, b"b12").is_empty());
        assert_eq!(parser.push(b'\n'), Some(Ok(Command::SetTarget(12.0))));
    }

    #[test]
    fn overflow_discards_rest_of_line() {
        let mut parser = Parser::new();
        let mut line = vec![b'b'; MAX_LINE_LEN + 10];
        line.push(b'\n');
        let out = feed(&mut parser, &line);
        assert_eq!(out, vec![Err(ParseError::Overflow)]);

        // Next line parses normally.
        assert_eq!(feed(&mut parser, b"stop\n"), vec![Ok(Command::Stop)]);
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let mut parser = Parser::new();
        assert_eq!(
            feed(&mut parser, &[0xFF, 0xFE, b'\n']),
            vec![Err(ParseError::UnknownCommand)]
        );
    }
}
