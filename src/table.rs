use rand::{seq::SliceRandom, Rng};
use std::collections::BTreeMap;
use std::io::BufRead;
use tracing::debug;

use crate::expand::Expand;
use crate::expansion::PIPE;
use crate::record::{parse_cookie_jar, parse_records, Record};
use crate::{Error, Production, Result};

/// A complete set of macros, ready to generate text.
///
/// See the [`crate-level documentation`] for a usage overview.
///
/// [`crate-level documentation`]: index.html
#[derive(Debug, Clone, Default)]
pub struct MacroTable {
    map: BTreeMap<String, Vec<Production>>,
    entry: Option<String>,
    round_limit: Option<usize>,
}

impl MacroTable {
    /// Builds a table from cookie-jar records.
    ///
    /// Empty records are skipped. The first line of every other record names
    /// the macro and each remaining line is one alternative. The last record
    /// becomes the entry macro.
    pub fn from_records<I>(records: I) -> Result<MacroTable>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut table = MacroTable::default();
        for record in records {
            let mut lines = record.0.into_iter();
            let key = match lines.next() {
                Some(name) => name.trim().to_string(),
                // A list may start or end with a stray %%
                None => continue,
            };
            let productions = lines
                .map(Production::parse)
                .collect::<Result<Vec<_>>>()?;
            table.insert(key, productions);
        }
        debug!(
            macros = table.map.len(),
            entry = ?table.entry,
            "built macro table"
        );
        Ok(table)
    }

    /// Creates a new table from a cookie-jar source string
    ///
    /// # Examples
    /// ```
    /// use macrogen::MacroTable;
    /// # use macrogen::Result;
    /// # fn main() -> Result<()> {
    /// let jar = "
    /// name
    /// world
    /// %%
    /// greeting
    /// hello, ${name}!
    /// ";
    /// let table = MacroTable::from_cookie_jar(jar)?;
    /// assert_eq!(table.entry(), Some("greeting"));
    /// assert_eq!(table.generate(&mut rand::thread_rng())?, "hello, world!");
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_cookie_jar<S: AsRef<str>>(s: S) -> Result<MacroTable> {
        MacroTable::from_records(parse_records(s))
    }

    /// Creates a new table by reading a cookie-jar file to completion
    pub fn from_reader<B: BufRead>(reader: B) -> Result<MacroTable> {
        MacroTable::from_records(parse_cookie_jar(reader)?)
    }

    /// Creates a new table from an input map of names to alternative lists.
    ///
    /// The last name produced by the iterator becomes the entry macro, so
    /// pass something ordered.
    ///
    /// # Examples
    /// ```
    /// # use macrogen::Result;
    /// # fn main() -> Result<()> {
    /// let map = vec![ ("name", vec![ "world" ]),
    ///                 ("|loud", vec![ "${}!!" ]),
    ///                 ("greet", vec![ "hello ${name|loud}" ]) ];
    /// let table = macrogen::MacroTable::from_map(map)?;
    /// assert_eq!(table.generate(&mut rand::thread_rng())?, "hello world!!");
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_map<I, K, C, S>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<String>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = MacroTable::default();
        for (k, v) in iter {
            let productions = v
                .into_iter()
                .map(Production::parse)
                .collect::<Result<Vec<_>>>()?;
            table.insert(k.into(), productions);
        }
        Ok(table)
    }

    /// Creates a new table from a JSON object mapping names to alternatives.
    ///
    /// Each value is either a list of strings or a single string. Key order is
    /// kept, so the last key is the entry macro.
    ///
    /// # Examples
    /// ```
    /// # use macrogen::Result;
    /// # fn main() -> Result<()> {
    /// let table = macrogen::MacroTable::from_json(r#"{
    ///     "tool": "macrogen",
    ///     "description": ["fun", "handy"],
    ///     "origin": ["${tool} is ${description}"]
    /// }"#)?;
    /// let out = table.generate(&mut rand::thread_rng())?;
    /// assert!(out == "macrogen is fun" || out == "macrogen is handy");
    /// # Ok(())
    /// # }
    /// ```
    #[cfg(feature = "json")]
    pub fn from_json<S: AsRef<str>>(s: S) -> Result<MacroTable> {
        use serde_json::{Map, Value};

        let source: Map<String, Value> = serde_json::from_str(s.as_ref())?;
        let mut entries = Vec::with_capacity(source.len());
        for (key, value) in source.into_iter() {
            let alternatives: Vec<String> = match value {
                Value::String(s) => vec![s],
                other => serde_json::from_value(other)?,
            };
            entries.push((key, alternatives));
        }
        MacroTable::from_map(entries)
    }

    fn insert(&mut self, key: String, productions: Vec<Production>) {
        self.entry = Some(key.clone());
        self.map.insert(key, productions);
    }

    /// Sets the entry macro, then returns the modified table
    pub fn with_entry<S: Into<String>>(mut self, s: S) -> MacroTable {
        self.set_entry(s);
        self
    }

    /// Sets the entry macro
    pub fn set_entry<S: Into<String>>(&mut self, s: S) {
        self.entry = Some(s.into());
    }

    /// The macro generation starts from, if any macro was defined
    pub fn entry(&self) -> Option<&str> {
        self.entry.as_deref()
    }

    /// Caps the number of rewrite rounds a single expansion may take, then
    /// returns the modified table
    ///
    /// # Examples
    /// ```
    /// use macrogen::{Error, MacroTable};
    /// # fn main() -> macrogen::Result<()> {
    /// let table = MacroTable::from_cookie_jar("forever\nand ${forever}")?
    ///     .with_round_limit(100);
    /// let res = table.generate(&mut rand::thread_rng());
    /// assert_eq!(res, Err(Error::RoundLimitError(100)));
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_round_limit(mut self, rounds: usize) -> MacroTable {
        self.set_round_limit(Some(rounds));
        self
    }

    /// Caps the number of rewrite rounds a single expansion may take.
    ///
    /// `None`, the default, lets a self-referential grammar run forever.
    pub fn set_round_limit(&mut self, rounds: Option<usize>) {
        self.round_limit = rounds;
    }

    pub(crate) fn round_limit(&self) -> Option<usize> {
        self.round_limit
    }

    /// The alternatives defined for `name`, if it exists
    pub fn get(&self, name: &str) -> Option<&[Production]> {
        self.map.get(name).map(Vec::as_slice)
    }

    /// Number of macros, pipe macros included
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True if no macro is defined
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Picks one alternative of the macro stored under `key` uniformly at
    /// random
    pub(crate) fn choose<R: ?Sized + Rng>(&self, key: &str, rng: &mut R) -> Result<&Production> {
        let productions = self
            .map
            .get(key)
            .ok_or_else(|| Error::UndefinedMacroError(key.to_string()))?;
        productions
            .choose(rng)
            .ok_or_else(|| Error::EmptyMacroError(key.to_string()))
    }

    /// Picks a random alternative of an ordinary macro.
    ///
    /// Pipe macro keys cannot be expanded this way.
    pub(crate) fn choose_base<R: ?Sized + Rng>(&self, name: &str, rng: &mut R) -> Result<&Production> {
        if name.starts_with(PIPE) {
            return Err(Error::MalformedFunctionCallError(name.to_string()));
        }
        self.choose(name, rng)
    }

    /// Produces an output string by expanding the entry macro
    pub fn generate<R: ?Sized + Rng>(&self, rng: &mut R) -> Result<String> {
        match self.entry {
            Some(ref entry) => self.expand(entry, rng),
            None => Err(Error::MissingEntryError),
        }
    }

    /// Produces an output string by expanding the macro `name`
    pub fn expand<R: ?Sized + Rng>(&self, name: &str, rng: &mut R) -> Result<String> {
        self.choose_base(name, rng)?.expand(self, rng)
    }
}
