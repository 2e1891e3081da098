// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// hOCR line parsing — textangle extraction, word tokenisation, and symbol
// classification for a single report line.

use once_cell::sync::Lazy;
use regex::Regex;

/// `textangle <digits>;` inside an hOCR `title` attribute.
static ANGLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"textangle (\d+);").expect("static regex"));

/// Text sitting directly between a closing `>` and the next `<`, without
/// whitespace.
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r">([^<\s]+)<").expect("static regex"));

/// A single letter from the Unicode L* categories. Combining marks and letter
/// numbers are not letters; digits and `_` are listed for clarity.
static SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}&&[^0-9_]]").expect("static regex"));

/// One candidate OCR line, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    /// Rotation hint in degrees. 0 when the line carries none.
    pub angle: i32,
    /// How many `textangle` attributes the line carried. More than one means
    /// the report is probably damaged; `angle` is taken from the first.
    pub angle_hints: usize,
    /// Word tokens in document order.
    pub words: Vec<String>,
}

impl LineRecord {
    /// Parse a raw report line. Never fails: unbalanced markup simply yields
    /// fewer words.
    pub fn parse(line: &str) -> Self {
        let mut angles = ANGLE_RE.captures_iter(line).map(|caps| parse_angle(&caps[1]));
        let first = angles.next();
        let angle_hints = usize::from(first.is_some()) + angles.count();

        let words = WORD_RE
            .captures_iter(line)
            .map(|caps| caps[1].to_string())
            .collect();

        Self {
            angle: first.unwrap_or(0),
            angle_hints,
            words,
        }
    }

    /// Total symbols across all words on the line.
    pub fn symbol_count(&self) -> u64 {
        self.words.iter().map(|word| symbol_count(word)).sum()
    }
}

/// Digit runs that overflow `i32` saturate; the decision step clamps anyway.
fn parse_angle(digits: &str) -> i32 {
    digits.parse::<i32>().unwrap_or(i32::MAX)
}

/// Whether `c` counts towards orientation confidence: any Unicode letter,
/// never a decimal digit or underscore.
pub fn is_symbol(c: char) -> bool {
    SYMBOL_RE.is_match(c.encode_utf8(&mut [0; 4]))
}

/// Number of symbol characters (not runs) in a word.
pub fn symbol_count(word: &str) -> u64 {
    SYMBOL_RE.find_iter(word).count() as u64
}
