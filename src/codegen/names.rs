//! Java identifier and package name validation.

use lazy_static::lazy_static;
use phf::phf_set;
use regex::Regex;

use crate::error::{Error, Result};

lazy_static! {
    /// ASCII subset of the JLS identifier grammar.
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap();

    /// A type as written in a declaration: `int`, `String[]`, `java.util.List<String>`.
    static ref TYPE_NAME: Regex =
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$.<>,?\[\] ]*$").unwrap();
}

/// Keywords and literals that can never be identifiers.
static RESERVED: phf::Set<&'static str> = phf_set! {
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char",
    "class", "const", "continue", "default", "do", "double", "else", "enum",
    "extends", "final", "finally", "float", "for", "goto", "if", "implements",
    "import", "instanceof", "int", "interface", "long", "native", "new",
    "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "true", "false", "null",
    "_",
};

pub fn is_reserved(word: &str) -> bool {
    RESERVED.contains(word)
}

pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name) && !is_reserved(name)
}

pub(crate) fn check_identifier(kind: &'static str, name: &str) -> Result<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier {
            kind,
            value: name.to_string(),
        })
    }
}

/// Dotted package name. The empty string is the unnamed package.
pub(crate) fn check_package(name: &str) -> Result<()> {
    if name.is_empty() || name.split('.').all(is_identifier) {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier {
            kind: "package",
            value: name.to_string(),
        })
    }
}

pub(crate) fn check_type(name: &str) -> Result<()> {
    let balanced = name.matches('<').count() == name.matches('>').count()
        && name.matches('[').count() == name.matches(']').count();
    if TYPE_NAME.is_match(name) && balanced {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier {
            kind: "type",
            value: name.to_string(),
        })
    }
}
