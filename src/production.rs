use crate::expansion::Expansion;
use crate::parser::{parse_str, MACBEGIN, MACEND};
use crate::{Error, Result};

use std::fmt;

/// One alternative of a macro: literal text interleaved with references.
///
/// A production always starts and ends with a terminal, which may be empty,
/// so it holds exactly one more terminal than it does nonterminals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub(crate) terminals: Vec<String>,
    pub(crate) nonterminals: Vec<Expansion>,
}

impl Production {
    /// Builds a production from its parts, checking the count invariant
    pub fn new(terminals: Vec<String>, nonterminals: Vec<Expansion>) -> Result<Production> {
        let p = Production {
            terminals,
            nonterminals,
        };
        p.check()?;
        Ok(p)
    }

    /// A production made of a single piece of literal text
    pub fn literal<S: Into<String>>(s: S) -> Production {
        Production {
            terminals: vec![s.into()],
            nonterminals: Vec::new(),
        }
    }

    /// Parses a production line
    ///
    /// # Examples
    /// ```
    /// use macrogen::Production;
    /// # fn main() -> macrogen::Result<()> {
    /// let p = Production::parse("  the ${noun|plural} are here ")?;
    /// assert_eq!(p.terminals(), ["the ", " are here"]);
    /// assert_eq!(p.nonterminals().len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse<S: AsRef<str>>(source: S) -> Result<Production> {
        parse_str(source.as_ref())
    }

    /// The literal fragments
    pub fn terminals(&self) -> &[String] {
        &self.terminals
    }

    /// The references between the literal fragments
    pub fn nonterminals(&self) -> &[Expansion] {
        &self.nonterminals
    }

    /// True once nothing is left to expand
    pub fn is_literal(&self) -> bool {
        self.nonterminals.is_empty() && self.terminals.len() == 1
    }

    /// Fails with [`Error::InvalidProductionError`] unless there is exactly
    /// one more terminal than there are nonterminals
    ///
    /// [`Error::InvalidProductionError`]: enum.Error.html#variant.InvalidProductionError
    pub fn check(&self) -> Result<()> {
        if self.terminals.len() == self.nonterminals.len() + 1 {
            Ok(())
        } else {
            Err(Error::InvalidProductionError {
                terminals: self.terminals.len(),
                nonterminals: self.nonterminals.len(),
            })
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.check().is_err() {
            return write!(f, "(invalid production)");
        }
        write!(f, "({}", self.terminals[0])?;
        for (nt, t) in self.nonterminals.iter().zip(&self.terminals[1..]) {
            write!(f, "{}{}{}{}", MACBEGIN, nt, MACEND, t)?;
        }
        write!(f, ")")
    }
}
