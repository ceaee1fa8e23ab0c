//! `nom` recognizers for the entries of a comma-separated subscript.
//!
//! Each entry is tried against, in order: a range, an identifier, an
//! integer, a single-quoted string and a double-quoted string. The first
//! grammar that matches at the start of the remaining text wins.
use crate::ast::{Range, Selection};
use crate::error::JPathError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while_m_n, take_while1},
    character::complete::{char, one_of, satisfy},
    combinator::{map, map_res, opt, recognize},
    multi::fold_many0,
    sequence::{delimited, pair, preceded},
};

type Error<'a> = nom::error::Error<&'a str>;

// --- Numbers ---

/// Signed decimal integer without leading zeros (`0`, `-12`, but not `012`).
fn integer(input: &str) -> IResult<&str, i64> {
    map_res(
        recognize(pair(
            opt(char('-')),
            alt((
                tag("0"),
                recognize(pair(one_of("123456789"), take_while(|c: char| c.is_ascii_digit()))),
            )),
        )),
        |digits: &str| digits.parse::<i64>(),
    )
    .parse(input)
}

/// `start?:end?(:step?)?`
fn range(input: &str) -> IResult<&str, Range> {
    map(
        (
            opt(integer),
            char(':'),
            opt(integer),
            opt(preceded(char(':'), opt(integer))),
        ),
        |(start, _, end, step)| Range {
            start: start.unwrap_or(0),
            end,
            step: step.flatten().unwrap_or(1),
        },
    )
    .parse(input)
}

// --- Names ---

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_' || c == '$'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

// --- Quoted strings ---

enum Fragment<'a> {
    Literal(&'a str),
    Escaped(char),
    CodeUnit(u16),
}

fn code_unit(input: &str) -> IResult<&str, u16> {
    map_res(
        take_while_m_n(4, 4, |c: char| c.is_ascii_hexdigit()),
        |hex: &str| u16::from_str_radix(hex, 16),
    )
    .parse(input)
}

/// One piece of a string body delimited by `quote`. Only the delimiting
/// quote may be escaped.
fn fragment<'a>(quote: char) -> impl Parser<&'a str, Output = Fragment<'a>, Error = Error<'a>> {
    alt((
        map(
            take_while1(move |c: char| c != quote && c != '\\'),
            Fragment::Literal,
        ),
        preceded(
            char('\\'),
            alt((
                map(preceded(char('u'), code_unit), Fragment::CodeUnit),
                map(
                    satisfy(move |c| {
                        c == quote || matches!(c, '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't')
                    }),
                    |c| Fragment::Escaped(unescape(c)),
                ),
            )),
        ),
    ))
}

fn unescape(c: char) -> char {
    match c {
        'b' => '\u{8}',
        'f' => '\u{c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        other => other,
    }
}

/// Accumulates a string body; `\uXXXX` units are buffered so that a
/// surrogate pair split across two escapes decodes to one character.
#[derive(Default)]
struct Unescaped {
    text: String,
    units: Vec<u16>,
}

impl Unescaped {
    fn push(mut self, piece: Fragment<'_>) -> Self {
        match piece {
            Fragment::CodeUnit(unit) => self.units.push(unit),
            Fragment::Literal(s) => {
                self.flush_units();
                self.text.push_str(s);
            }
            Fragment::Escaped(c) => {
                self.flush_units();
                self.text.push(c);
            }
        }
        self
    }

    fn flush_units(&mut self) {
        self.text.extend(
            char::decode_utf16(self.units.drain(..))
                .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
        );
    }

    fn finish(mut self) -> String {
        self.flush_units();
        self.text
    }
}

/// Decodes a quoted string, returning its literal text.
fn quoted<'a>(quote: char) -> impl Parser<&'a str, Output = String, Error = Error<'a>> {
    map(
        delimited(
            char(quote),
            fold_many0(fragment(quote), Unescaped::default, Unescaped::push),
            char(quote),
        ),
        Unescaped::finish,
    )
}

fn skip_quoted<'a>(quote: char) -> impl Parser<&'a str, Output = &'a str, Error = Error<'a>> {
    recognize(delimited(
        char(quote),
        fold_many0(fragment(quote), || (), |(), _| ()),
        char(quote),
    ))
}

/// Length in bytes of the well-formed quoted literal at the start of
/// `input`, quotes included. `None` if `input` does not open with a quote
/// or the literal is never closed.
pub(crate) fn quoted_literal_len(input: &str) -> Option<usize> {
    alt((skip_quoted('\''), skip_quoted('"')))
        .parse(input)
        .ok()
        .map(|(_, literal)| literal.len())
}

// --- Comma lists ---

fn entry(input: &str) -> IResult<&str, Selection> {
    alt((
        map(range, Selection::Range),
        map(identifier, |name: &str| Selection::Name(name.to_string())),
        map(integer, Selection::Index),
        map(quoted('\''), Selection::Name),
        map(quoted('"'), Selection::Name),
    ))
    .parse(input)
}

/// Expands a comma-separated subscript into its entries.
///
/// Returns `Ok(None)` when some entry matches none of the grammars, and an
/// `InvalidCharacter` error when an entry is followed by anything but a
/// comma or the end of the subscript.
pub(crate) fn expand_list(subscript: &str) -> Result<Option<Vec<Selection>>, JPathError> {
    let mut selections = Vec::new();
    let mut rest = subscript;
    loop {
        let Ok((remaining, selection)) = entry(rest) else {
            return Ok(None);
        };
        selections.push(selection);

        let mut chars = remaining.chars();
        match chars.next() {
            None => return Ok(Some(selections)),
            Some(',') => rest = chars.as_str(),
            Some(character) => {
                return Err(JPathError::InvalidCharacter {
                    character,
                    subscript: rest.to_string(),
                });
            }
        }
    }
}
