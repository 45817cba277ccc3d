//! Flag resolution against a single scope.

use std::fmt;

use crate::{CliSpec, FlagId, FlagSpec, Scope};

/// A flag name as written on the command line, without dashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlagName<'a> {
    Long(&'a str),
    Short(&'a str),
    Char(char),
}

impl FlagName<'_> {
    fn matches(&self, flag: &FlagSpec) -> bool {
        match *self {
            FlagName::Long(name) => flag.full_name == name,
            FlagName::Short(name) => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => flag.short_name == Some(c),
                    _ => false,
                }
            }
            FlagName::Char(c) => flag.short_name == Some(c),
        }
    }
}

impl fmt::Display for FlagName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagName::Long(name) => write!(f, "--{name}"),
            FlagName::Short(name) => write!(f, "-{name}"),
            FlagName::Char(c) => write!(f, "-{c}"),
        }
    }
}

/// Finds the first flag in `scope` matching `name` exactly.
///
/// No prefix matching and no case folding. Short names must be exactly one
/// character to match anything.
pub(crate) fn resolve(spec: &CliSpec, scope: Scope, name: FlagName<'_>) -> Option<FlagId> {
    spec.flags(scope)?
        .iter()
        .position(|flag| name.matches(flag))
        .map(|index| FlagId { scope, index })
}
