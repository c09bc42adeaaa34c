//! Identifiers of schema assets (tables, columns, indexes, constraints).
//!
//! An identifier remembers which of its dot separated parts were given
//! quoted. Quoting for output is decided per part by the
//! [`Platform`]: explicitly quoted parts, reserved keywords and names with
//! characters outside the bare identifier set are quoted, everything else
//! is emitted as written.

use std::fmt;

use crate::platform::Platform;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct NamePart {
    name: String,
    quoted: bool,
}

/// A possibly namespaced, possibly quoted name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    parts: Vec<NamePart>,
}

impl Identifier {
    /// Parses a name such as `users`, `` `select` `` or `"schema"."table"`.
    ///
    /// Backticks, double quotes and square brackets all mark a part as
    /// quoted. A doubled quote character inside a quoted part is an
    /// escaped quote.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            parts: parse_parts(name),
        }
    }

    /// The unquoted name, parts joined with `.`.
    #[must_use]
    pub fn name(&self) -> String {
        self.parts
            .iter()
            .map(|part| part.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// The last part of the name, without namespace.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.parts.last().map_or("", |part| part.name.as_str())
    }

    /// The namespace (everything before the last part), if any.
    #[must_use]
    pub fn namespace(&self) -> Option<String> {
        if self.parts.len() < 2 {
            return None;
        }
        let (_, namespace) = self.parts.split_last()?;
        Some(
            namespace
                .iter()
                .map(|part| part.name.as_str())
                .collect::<Vec<_>>()
                .join("."),
        )
    }

    /// Whether any part of the name was given quoted.
    #[must_use]
    pub fn is_quoted(&self) -> bool {
        self.parts.iter().any(|part| part.quoted)
    }

    /// Lowercase unquoted name, the key used for case-insensitive lookups.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.name().to_lowercase()
    }

    /// Whether two identifiers name the same asset (case-insensitive).
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.normalized() == Self::new(other).normalized()
    }

    /// Renders the name for `platform`, quoting the parts that need it.
    #[must_use]
    pub fn quoted_name<P: Platform + ?Sized>(&self, platform: &P) -> String {
        self.parts
            .iter()
            .map(|part| {
                if part.quoted || platform.requires_quoting(&part.name) {
                    platform.quote_single_identifier(&part.name)
                } else {
                    part.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&String> for Identifier {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

fn parse_parts(input: &str) -> Vec<NamePart> {
    let mut parts = Vec::new();
    let mut chars = input.chars().peekable();
    loop {
        let part = match chars.peek().copied() {
            Some(open @ ('`' | '"' | '[')) => {
                chars.next();
                let close = if open == '[' { ']' } else { open };
                let mut name = String::new();
                while let Some(c) = chars.next() {
                    if c == close {
                        if close != ']' && chars.peek() == Some(&close) {
                            chars.next();
                            name.push(c);
                            continue;
                        }
                        break;
                    }
                    name.push(c);
                }
                NamePart { name, quoted: true }
            }
            _ => {
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if c == '.' {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }
                NamePart {
                    name,
                    quoted: false,
                }
            }
        };
        parts.push(part);
        // Skip to the next separator; stray characters after a closing quote are dropped.
        loop {
            match chars.next() {
                Some('.') => break,
                None => return parts,
                Some(_) => {}
            }
        }
    }
}
