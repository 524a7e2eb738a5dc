//! Builder mode flags
//!
//! Modes are written as letter strings on the command line of the driver,
//! e.g. `"CG"`; each letter enables one flag.

use crate::error::ModeParseError;
use bitflags::bitflags;
use std::fmt;
use std::str::FromStr;

bitflags! {
    /// Options controlling how the program is built
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BuilderMode: u32 {
        /// Check invariants of every function node as it is created
        const SANITY_CHECK_FUNCTIONS = 1 << 0;
        /// Report each created function at info level
        const PRINT_FUNCTIONS = 1 << 1;
        /// Fully specialize generic functions with concrete type arguments
        const INSTANTIATE_GENERICS = 1 << 2;
    }
}

const MODE_LETTERS: [(char, BuilderMode); 3] = [
    ('C', BuilderMode::SANITY_CHECK_FUNCTIONS),
    ('F', BuilderMode::PRINT_FUNCTIONS),
    ('G', BuilderMode::INSTANTIATE_GENERICS),
];

impl FromStr for BuilderMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mode = BuilderMode::empty();
        for c in s.chars() {
            let (_, flag) = MODE_LETTERS
                .iter()
                .find(|(letter, _)| *letter == c)
                .ok_or_else(|| ModeParseError {
                    mode: s.to_string(),
                    flag: c,
                })?;
            mode |= *flag;
        }
        Ok(mode)
    }
}

impl fmt::Display for BuilderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (letter, flag) in MODE_LETTERS {
            if self.contains(flag) {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}
