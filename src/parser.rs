use pest::Parser;
use pest_derive::Parser;

use crate::expansion::Expansion;
use crate::production::Production;
use crate::{Error, Result};

/// Opens a macro reference
pub(crate) const MACBEGIN: &str = "${";
/// Closes a macro reference
pub(crate) const MACEND: &str = "}";

#[derive(Parser)]
#[grammar = "production.pest"]
struct ProductionParser;

/// Parses one production line.
///
/// Surrounding whitespace is trimmed first. The only way a line can fail to
/// parse is a `${` with no `}` after it.
pub(crate) fn parse_str(raw: &str) -> Result<Production> {
    let mut pairs = ProductionParser::parse(Rule::production, raw.trim())
        .map_err(|_| Error::UnclosedMacroError(raw.to_string()))?;

    let mut terminals = Vec::new();
    let mut nonterminals = Vec::new();
    if let Some(production) = pairs.next() {
        for pair in production.into_inner() {
            match pair.as_rule() {
                Rule::terminal => terminals.push(pair.as_str().to_string()),
                Rule::reference => {
                    let body = pair.into_inner().next().map_or("", |b| b.as_str());
                    nonterminals.push(Expansion::parse(body));
                }
                _ => {}
            }
        }
    }

    Production::new(terminals, nonterminals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expansion::Base;
    use proptest::prelude::*;

    #[test]
    fn parse_literal() -> Result<()> {
        let p = parse_str("  just some text\t")?;
        assert_eq!(p, Production::literal("just some text"));
        Ok(())
    }

    #[test]
    fn parse_empty_line() -> Result<()> {
        assert_eq!(parse_str("")?, Production::literal(""));
        Ok(())
    }

    #[test]
    fn parse_references() -> Result<()> {
        let p = parse_str("this is some ${text} with ${more|loud} at the end")?;
        assert_eq!(
            p.terminals(),
            ["this is some ", " with ", " at the end"]
        );
        assert_eq!(
            p.nonterminals(),
            [
                Expansion::new("text"),
                Expansion::new("more").with_pipe("loud")
            ]
        );
        Ok(())
    }

    #[test]
    fn parse_starts_and_ends_with_reference() -> Result<()> {
        let p = parse_str("${a}${b}")?;
        assert_eq!(p.terminals(), ["", "", ""]);
        assert_eq!(p.nonterminals(), [Expansion::new("a"), Expansion::new("b")]);
        Ok(())
    }

    #[test]
    fn parse_placeholder() -> Result<()> {
        let p = parse_str("${}!!")?;
        assert_eq!(p.terminals(), ["", "!!"]);
        assert_eq!(p.nonterminals()[0].base(), &Base::Empty);
        Ok(())
    }

    #[test]
    fn references_do_not_nest() -> Result<()> {
        let p = parse_str("${a${b}c}")?;
        assert_eq!(p.nonterminals(), [Expansion::new("a${b")]);
        assert_eq!(p.terminals(), ["", "c}"]);
        Ok(())
    }

    #[test]
    fn stray_delimiters_are_text() -> Result<()> {
        let p = parse_str("costs $5 {or so}")?;
        assert_eq!(p, Production::literal("costs $5 {or so}"));
        Ok(())
    }

    #[test]
    fn unclosed_macro() {
        let res = parse_str("hello ${world");
        assert_eq!(res, Err(Error::UnclosedMacroError("hello ${world".into())));

        let res = parse_str("${a} and ${b");
        assert!(matches!(res, Err(Error::UnclosedMacroError(_))));
    }

    proptest! {
        #[test]
        fn literal_lines_parse_to_one_terminal(s in "[^$]*") {
            let p = parse_str(&s).unwrap();
            prop_assert!(p.nonterminals().is_empty());
            prop_assert_eq!(p.terminals(), [s.trim().to_string()]);
        }

        #[test]
        fn parsed_productions_keep_counts(
            parts in prop::collection::vec(("[a-z ]{0,4}", "[a-z|]{0,4}"), 0..6),
            tail in "[a-z ]{0,4}",
        ) {
            let mut line = String::new();
            for (text, body) in &parts {
                line.push_str(text);
                line.push_str("${");
                line.push_str(body);
                line.push('}');
            }
            line.push_str(&tail);
            let p = parse_str(&line).unwrap();
            prop_assert_eq!(p.nonterminals().len(), parts.len());
            prop_assert_eq!(p.terminals().len(), parts.len() + 1);
        }
    }
}
