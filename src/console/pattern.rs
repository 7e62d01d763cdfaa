//! Parameter pattern tokens
//!
//! A command pattern is a whitespace separated list of tokens such as
//! `"%i %bx %s"`. Each token is an optional `%`, an optional width modifier
//! and a type code.

use crate::config::MAX_ARGS;

/// Width modifier of an integer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// No modifier: native int
    None,
    /// `b`: byte
    Byte,
    /// `h`: short
    Short,
    /// `l`: long
    Long,
}

/// Conversion type of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCode {
    /// `d`, `i`, `u`, `o`, `x` with their number base
    Integer { code: u8, base: u32 },
    /// `e`, `f`, `g`
    Float,
    /// `c`
    Char,
    /// `s`
    String,
}

/// One parsed pattern token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternToken {
    pub modifier: Modifier,
    pub kind: TypeCode,
}

impl PatternToken {
    /// Parse a single token like `%d`, `%hx`, `s`
    pub fn parse(token: &str) -> Option<Self> {
        let bytes = token.as_bytes();
        let bytes = match bytes.first() {
            Some(b'%') => &bytes[1..],
            _ => bytes,
        };

        let (modifier, code) = match bytes {
            [code] => (Modifier::None, *code),
            [m, code] => {
                let modifier = match *m {
                    b'b' => Modifier::Byte,
                    b'h' => Modifier::Short,
                    b'l' => Modifier::Long,
                    _ => return None,
                };
                (modifier, *code)
            }
            _ => return None,
        };

        let kind = match code {
            b'd' | b'i' | b'u' => TypeCode::Integer { code, base: 10 },
            b'o' => TypeCode::Integer { code, base: 8 },
            b'x' => TypeCode::Integer { code, base: 16 },
            b'e' | b'f' | b'g' => TypeCode::Float,
            b'c' => TypeCode::Char,
            b's' => TypeCode::String,
            _ => return None,
        };

        // Width modifiers only make sense for integers.
        if modifier != Modifier::None && !matches!(kind, TypeCode::Integer { .. }) {
            return None;
        }

        Some(Self { modifier, kind })
    }

    /// Type name used in help output
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            TypeCode::Integer { code: b'd' | b'i', .. } => match self.modifier {
                Modifier::None | Modifier::Short => "int",
                Modifier::Byte => "shortint",
                Modifier::Long => "longint",
            },
            TypeCode::Integer { .. } => match self.modifier {
                Modifier::None | Modifier::Short => "word",
                Modifier::Byte => "byte",
                Modifier::Long => "dword",
            },
            TypeCode::Float => "float",
            TypeCode::Char => "char",
            TypeCode::String => "string",
        }
    }

    /// Radix marker appended to unsigned type names (`[o]`, `[h]`)
    pub fn radix_suffix(&self) -> &'static str {
        match self.kind {
            TypeCode::Integer { code: b'o', .. } => "[o]",
            TypeCode::Integer { code: b'x', .. } => "[h]",
            _ => "",
        }
    }
}

/// Iterate over the tokens of a pattern string
///
/// Unparsable tokens yield `None`; [`CommandTable::new`](super::CommandTable::new)
/// refuses tables containing them.
pub fn tokens(pattern: &str) -> impl Iterator<Item = Option<PatternToken>> + '_ {
    pattern.split_whitespace().map(PatternToken::parse)
}

/// Number of parameters a pattern expects
pub fn count(pattern: &str) -> usize {
    pattern.split_whitespace().count()
}

/// Check a whole pattern
pub fn is_valid(pattern: &str) -> bool {
    count(pattern) <= MAX_ARGS && tokens(pattern).all(|t| t.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_modified() {
        let t = PatternToken::parse("%i").unwrap();
        assert_eq!(t.modifier, Modifier::None);
        assert_eq!(t.kind, TypeCode::Integer { code: b'i', base: 10 });

        let t = PatternToken::parse("%bx").unwrap();
        assert_eq!(t.modifier, Modifier::Byte);
        assert_eq!(t.kind, TypeCode::Integer { code: b'x', base: 16 });

        let t = PatternToken::parse("lo").unwrap();
        assert_eq!(t.modifier, Modifier::Long);
        assert_eq!(t.kind, TypeCode::Integer { code: b'o', base: 8 });
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(PatternToken::parse("").is_none());
        assert!(PatternToken::parse("%").is_none());
        assert!(PatternToken::parse("%q").is_none());
        assert!(PatternToken::parse("%zd").is_none());
        assert!(PatternToken::parse("%bs").is_none());
        assert!(PatternToken::parse("%bdd").is_none());
    }

    #[test]
    fn test_type_names() {
        let name = |t: &str| {
            let t = PatternToken::parse(t).unwrap();
            (t.type_name(), t.radix_suffix())
        };
        assert_eq!(name("%d"), ("int", ""));
        assert_eq!(name("%hd"), ("int", ""));
        assert_eq!(name("%bd"), ("shortint", ""));
        assert_eq!(name("%li"), ("longint", ""));
        assert_eq!(name("%u"), ("word", ""));
        assert_eq!(name("%bu"), ("byte", ""));
        assert_eq!(name("%lx"), ("dword", "[h]"));
        assert_eq!(name("%o"), ("word", "[o]"));
        assert_eq!(name("%g"), ("float", ""));
        assert_eq!(name("%c"), ("char", ""));
        assert_eq!(name("%s"), ("string", ""));
    }

    #[test]
    fn test_pattern_validity() {
        assert!(is_valid(""));
        assert!(is_valid("%i  %s"));
        assert_eq!(count("%i  %s"), 2);
        assert!(!is_valid("%i %k"));
        assert!(!is_valid("%i %i %i %i %i %i %i %i %i"));
    }
}
