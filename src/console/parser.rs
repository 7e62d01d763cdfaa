//! Command line parser
//!
//! Splits a submitted line into command and arguments, resolves the command
//! in the table and converts every argument according to the command's
//! pattern. Pure: no I/O, no session mutation.

use core::num::IntErrorKind;

use heapless::Vec;

use crate::config::{
    MAX_ARGS, MAX_BYTE, MAX_INT, MAX_PARM_LEN, MAX_SHORT, MIN_BYTE, MIN_INT, MIN_SHORT,
};
use super::commands::{CommandId, CommandTable};
use super::pattern::{self, Modifier, PatternToken, TypeCode};
use super::ConsoleError;

/// Bounded string parameter
pub type ParamString = heapless::String<MAX_PARM_LEN>;

/// One converted parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Unused,
    Float(f32),
    Long(i64),
    Int(i32),
    Short(i16),
    /// `%c` characters and `b`-modified integers
    Char(u8),
    String(ParamString),
}

impl Param {
    /// Integer value, sign-extending bytes
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(v) => Some(*v),
            Self::Int(v) => Some(i64::from(*v)),
            Self::Short(v) => Some(i64::from(*v)),
            Self::Char(v) => Some(i64::from(*v as i8)),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        self.as_long().map(|v| v as i32)
    }

    pub fn as_short(&self) -> Option<i16> {
        self.as_long().map(|v| v as i16)
    }

    pub fn as_byte(&self) -> Option<u8> {
        self.as_long().map(|v| v as u8)
    }

    pub fn as_word(&self) -> Option<u16> {
        self.as_long().map(|v| v as u16)
    }

    pub fn as_dword(&self) -> Option<u32> {
        self.as_long().map(|v| v as u32)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_long().map(|v| v != 0)
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(char::from(*c)),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Converted parameters of one line, in argument order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    items: Vec<Param, MAX_ARGS>,
}

static UNUSED: Param = Param::Unused;

impl Params {
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Parameter `i` (0-based); [`Param::Unused`] past the end
    pub fn get(&self, i: usize) -> &Param {
        self.items.get(i).unwrap_or(&UNUSED)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.items.iter()
    }

    pub fn bool_at(&self, i: usize) -> Option<bool> {
        self.get(i).as_bool()
    }

    pub fn byte_at(&self, i: usize) -> Option<u8> {
        self.get(i).as_byte()
    }

    pub fn char_at(&self, i: usize) -> Option<char> {
        self.get(i).as_char()
    }

    pub fn short_at(&self, i: usize) -> Option<i16> {
        self.get(i).as_short()
    }

    pub fn int_at(&self, i: usize) -> Option<i32> {
        self.get(i).as_int()
    }

    pub fn word_at(&self, i: usize) -> Option<u16> {
        self.get(i).as_word()
    }

    pub fn long_at(&self, i: usize) -> Option<i64> {
        self.get(i).as_long()
    }

    pub fn dword_at(&self, i: usize) -> Option<u32> {
        self.get(i).as_dword()
    }

    pub fn float_at(&self, i: usize) -> Option<f32> {
        self.get(i).as_float()
    }

    pub fn str_at(&self, i: usize) -> Option<&str> {
        self.get(i).as_str()
    }

    fn push(&mut self, p: Param) {
        // Patterns are capped at MAX_ARGS when the table is built.
        let _ = self.items.push(p);
    }
}

/// Parse an integer in `base`: optional sign, optional `0x` for hex, digits.
fn parse_integer(arg: &str, base: u32, index: usize) -> Result<i64, ConsoleError> {
    let (negative, digits) = match arg.as_bytes().first() {
        Some(b'-') => (true, &arg[1..]),
        Some(b'+') => (false, &arg[1..]),
        _ => (false, arg),
    };

    let digits = if base == 16 {
        digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits)
    } else {
        digits
    };

    // from_str_radix accepts its own sign, which would allow "--1" or "+-1".
    if digits.is_empty() || digits.starts_with(&['+', '-'][..]) {
        return Err(ConsoleError::ArgumentFormat(index));
    }

    let magnitude = u64::from_str_radix(digits, base).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => ConsoleError::ArgumentRange(index),
        _ => ConsoleError::ArgumentFormat(index),
    })?;

    if negative {
        if magnitude > 1u64 << 63 {
            return Err(ConsoleError::ArgumentRange(index));
        }
        Ok((magnitude as i64).wrapping_neg())
    } else {
        i64::try_from(magnitude).map_err(|_| ConsoleError::ArgumentRange(index))
    }
}

fn check_range(value: i64, min: i64, max: i64, index: usize) -> Result<i64, ConsoleError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ConsoleError::ArgumentRange(index))
    }
}

/// Convert one argument according to its pattern token.
///
/// `index` is the 1-based argument position reported in errors.
pub fn convert(token: &PatternToken, arg: &str, index: usize) -> Result<Param, ConsoleError> {
    match token.kind {
        TypeCode::Integer { base, .. } => {
            let value = parse_integer(arg, base, index)?;
            Ok(match token.modifier {
                Modifier::Byte => Param::Char(check_range(value, MIN_BYTE, MAX_BYTE, index)? as u8),
                Modifier::Short => {
                    Param::Short(check_range(value, MIN_SHORT, MAX_SHORT, index)? as i16)
                }
                Modifier::None => Param::Int(check_range(value, MIN_INT, MAX_INT, index)? as i32),
                Modifier::Long => Param::Long(value),
            })
        }
        TypeCode::Float => arg
            .parse::<f32>()
            .map(Param::Float)
            .map_err(|_| ConsoleError::ArgumentFormat(index)),
        TypeCode::Char => match arg.as_bytes() {
            [c] => Ok(Param::Char(*c)),
            _ => Err(ConsoleError::ArgumentFormat(index)),
        },
        TypeCode::String => {
            let mut s = ParamString::new();
            s.push_str(arg).map_err(|_| ConsoleError::ArgumentRange(index))?;
            Ok(Param::String(s))
        }
    }
}

/// Outcome of parsing one submitted line
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    /// Table index of the best-guess command, kept even when the argument
    /// count is wrong so a syntax line can be printed
    pub index: Option<usize>,
    /// Resolved command id; `None` when unknown or the argument count is wrong
    pub id: Option<CommandId>,
    /// Parameters the pattern expects
    pub expected: usize,
    /// Arguments found on the line
    pub found: usize,
    pub params: Params,
    /// First error detected on the line
    pub error: Option<ConsoleError>,
}

impl ParsedLine {
    fn unknown() -> Self {
        Self {
            index: None,
            id: None,
            expected: 0,
            found: 0,
            params: Params::new(),
            error: Some(ConsoleError::UnknownCommand),
        }
    }

    /// True when the command can be executed
    pub fn is_valid(&self) -> bool {
        self.id.is_some() && self.error.is_none()
    }
}

/// Parse a command line against the table, scoped to `active` subsystem
pub fn parse_line(table: &CommandTable, line: &str, active: Option<usize>) -> ParsedLine {
    let (name, rest) = line.split_once(' ').unwrap_or((line, ""));

    let Some(index) = table.find_by_name(name, active) else {
        return ParsedLine::unknown();
    };
    let Some(cmd) = table.get(index) else {
        return ParsedLine::unknown();
    };

    let expected = pattern::count(cmd.pattern);
    let found = rest.split_whitespace().count();

    let mut parsed = ParsedLine {
        index: Some(index),
        id: None,
        expected,
        found,
        params: Params::new(),
        error: None,
    };

    if found != expected && !(cmd.id == CommandId::HELP && found == 0) {
        parsed.error = Some(ConsoleError::ArgumentCount { expected, found });
        return parsed;
    }

    parsed.id = Some(cmd.id);

    let pairs = pattern::tokens(cmd.pattern).zip(rest.split_whitespace());
    for (i, (token, arg)) in pairs.enumerate() {
        let Some(token) = token else {
            parsed.error = Some(ConsoleError::ArgumentFormat(i + 1));
            break;
        };
        match convert(&token, arg, i + 1) {
            Ok(p) => parsed.params.push(p),
            Err(e) => {
                parsed.error = Some(e);
                break;
            }
        }
    }

    parsed
}
