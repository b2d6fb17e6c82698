use rand::Rng;
use tracing::{debug, trace};

use crate::expansion::{pipe_key, Base, Expansion};
use crate::{Error, MacroTable, Production, Result};

/// A trait for types that can be expanded into an output string
pub trait Expand {
    /// Given a macro table, rewrites every reference until only literal
    /// text is left, producing the output string or an error
    fn expand<R: ?Sized + Rng>(&self, table: &MacroTable, rng: &mut R) -> Result<String>;
}

impl Expand for Production {
    fn expand<R: ?Sized + Rng>(&self, table: &MacroTable, rng: &mut R) -> Result<String> {
        let mut prod = self.clone();
        let mut rounds = 0;
        while !prod.is_literal() {
            if let Some(limit) = table.round_limit() {
                if rounds >= limit {
                    return Err(Error::RoundLimitError(limit));
                }
            }
            prod = remove_empty(expand_once(&prod, table, rng)?)?;
            rounds += 1;
            trace!(round = rounds, production = %prod, "rewrote production");
        }
        debug!(rounds, "expansion finished");
        Ok(prod.terminals.into_iter().next().unwrap_or_default())
    }
}

impl Expand for Expansion {
    fn expand<R: ?Sized + Rng>(&self, table: &MacroTable, rng: &mut R) -> Result<String> {
        let prod = Production {
            terminals: vec![String::new(), String::new()],
            nonterminals: vec![self.clone()],
        };
        prod.expand(table, rng)
    }
}

/// Resolves one reference to the production that replaces it
fn resolve<R: ?Sized + Rng>(nt: &Expansion, table: &MacroTable, rng: &mut R) -> Result<Production> {
    match (&nt.base, &nt.pipe) {
        (Base::Empty, None) => Ok(Production::literal("")),
        (Base::Macro(name), None) => table.choose_base(name, rng).map(Clone::clone),
        (base, Some(pipe)) => {
            let template = table.choose(&pipe_key(pipe), rng)?;
            Ok(apply_pipe(template, base))
        }
    }
}

/// Substitutes `base` for every placeholder in a pipe macro's production.
///
/// Placeholders keep their own pipe, so pipes can chain.
fn apply_pipe(template: &Production, base: &Base) -> Production {
    let nonterminals = template
        .nonterminals
        .iter()
        .map(|e| match e.base {
            Base::Empty => Expansion {
                base: base.clone(),
                pipe: e.pipe.clone(),
            },
            Base::Macro(_) => e.clone(),
        })
        .collect();
    Production {
        terminals: template.terminals.clone(),
        nonterminals,
    }
}

/// Does one round of rewriting on a production.
///
/// Every reference is replaced by a randomly chosen alternative of the macro
/// it names, bracketed by two empty references. The result still has to go
/// through [`remove_empty`].
///
/// [`remove_empty`]: fn.remove_empty.html
pub fn expand_once<R: ?Sized + Rng>(
    prod: &Production,
    table: &MacroTable,
    rng: &mut R,
) -> Result<Production> {
    prod.check()?;

    let mut terminals = vec![prod.terminals[0].clone()];
    let mut nonterminals = Vec::with_capacity(prod.nonterminals.len() * 3);
    for (nt, after) in prod.nonterminals.iter().zip(&prod.terminals[1..]) {
        let child = resolve(nt, table, rng)?;
        terminals.extend(child.terminals);
        // The empties glue the terminals on either side of the child
        nonterminals.push(Expansion::empty());
        nonterminals.extend(child.nonterminals);
        nonterminals.push(Expansion::empty());
        terminals.push(after.clone());
    }

    Production::new(terminals, nonterminals)
}

/// Drops every unpiped reference to the empty sentinel, fusing the terminals
/// on either side of it
pub fn remove_empty(prod: Production) -> Result<Production> {
    prod.check()?;

    let mut rest = prod.terminals.into_iter();
    let mut terminals: Vec<String> = rest.next().into_iter().collect();
    let mut nonterminals = Vec::new();
    for (nt, t) in prod.nonterminals.into_iter().zip(rest) {
        if nt.is_glue() {
            if let Some(last) = terminals.last_mut() {
                last.push_str(&t);
            }
        } else {
            nonterminals.push(nt);
            terminals.push(t);
        }
    }

    Production::new(terminals, nonterminals)
}
