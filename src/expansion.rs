use std::fmt;

/// Character separating a reference's base from its pipe macro, and the
/// prefix under which pipe macros are stored in a [`MacroTable`]
///
/// [`MacroTable`]: struct.MacroTable.html
pub const PIPE: char = '|';

/// Returns the table key a pipe macro named `name` is stored under
pub(crate) fn pipe_key(name: &str) -> String {
    format!("{}{}", PIPE, name)
}

/// The thing a reference expands before any pipe is applied
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Base {
    /// Contributes no text. Glues its neighbouring terminals together, and
    /// inside a pipe macro marks where the piped-in value goes.
    Empty,
    /// An ordinary macro name
    Macro(String),
}

impl Base {
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Base::Empty)
    }
}

impl From<&str> for Base {
    fn from(s: &str) -> Base {
        if s.is_empty() {
            Base::Empty
        } else {
            Base::Macro(s.to_string())
        }
    }
}

/// A macro reference (`${base}` or `${base|pipe}`) inside a production
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Expansion {
    pub(crate) base: Base,
    pub(crate) pipe: Option<String>,
}

impl Expansion {
    /// Creates a plain reference to the macro `name`
    pub fn new<S: Into<String>>(name: S) -> Expansion {
        Expansion {
            base: Base::Macro(name.into()),
            pipe: None,
        }
    }

    /// Creates a reference to the empty sentinel
    pub(crate) fn empty() -> Expansion {
        Expansion {
            base: Base::Empty,
            pipe: None,
        }
    }

    /// Pipes this reference through the pipe macro `pipe`
    pub fn with_pipe<S: Into<String>>(mut self, pipe: S) -> Expansion {
        let pipe = pipe.into();
        self.pipe = if pipe.is_empty() { None } else { Some(pipe) };
        self
    }

    /// Parses the body of a reference (the text between `${` and `}`).
    ///
    /// The body is split at the first `|`; everything after it names the pipe
    /// macro. Any string is a valid body, so this never fails.
    ///
    /// # Examples
    /// ```
    /// use macrogen::{Base, Expansion};
    ///
    /// let e = Expansion::parse("name|excited");
    /// assert_eq!(e.base(), &Base::Macro("name".into()));
    /// assert_eq!(e.pipe(), Some("excited"));
    /// assert_eq!(Expansion::parse("").base(), &Base::Empty);
    /// ```
    pub fn parse(body: &str) -> Expansion {
        match body.split_once(PIPE) {
            Some((base, pipe)) => Expansion::from_parts(base, pipe),
            None => Expansion {
                base: Base::from(body),
                pipe: None,
            },
        }
    }

    fn from_parts(base: &str, pipe: &str) -> Expansion {
        Expansion {
            base: Base::from(base),
            pipe: None,
        }
        .with_pipe(pipe)
    }

    /// The base of this reference
    pub fn base(&self) -> &Base {
        &self.base
    }

    /// The pipe macro name, if this reference is piped
    pub fn pipe(&self) -> Option<&str> {
        self.pipe.as_deref()
    }

    /// True for an unpiped reference to the empty sentinel
    pub(crate) fn is_glue(&self) -> bool {
        self.base.is_empty() && self.pipe.is_none()
    }
}

impl fmt::Display for Expansion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Base::Macro(ref name) = self.base {
            write!(f, "{}", name)?;
        }
        if let Some(ref pipe) = self.pipe {
            write!(f, "{}{}", PIPE, pipe)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain() {
        assert_eq!(Expansion::parse("noun"), Expansion::new("noun"));
    }

    #[test]
    fn parse_piped() {
        let e = Expansion::parse("noun|plural");
        assert_eq!(e, Expansion::new("noun").with_pipe("plural"));
        assert_eq!(e.to_string(), "noun|plural");
    }

    #[test]
    fn parse_splits_at_first_pipe() {
        let e = Expansion::parse("a|b|c");
        assert_eq!(e.base(), &Base::Macro("a".into()));
        assert_eq!(e.pipe(), Some("b|c"));
    }

    #[test]
    fn parse_empty_parts() {
        assert_eq!(Expansion::parse(""), Expansion::empty());

        let e = Expansion::parse("|upper");
        assert_eq!(e.base(), &Base::Empty);
        assert_eq!(e.pipe(), Some("upper"));
        assert!(!e.is_glue());
        assert!(Expansion::empty().is_glue());

        // An empty pipe name means no pipe at all
        assert_eq!(Expansion::parse("a|"), Expansion::new("a"));
    }

    #[test]
    fn empty_sentinel_is_not_a_name() {
        assert_eq!(Expansion::parse("EMPTY").base(), &Base::Macro("EMPTY".into()));
        assert_eq!(Expansion::empty().to_string(), "");
    }

    #[test]
    fn pipe_keys() {
        assert_eq!(pipe_key("excited"), "|excited");
    }
}
