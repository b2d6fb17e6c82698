#![warn(missing_docs)]
//! Grammar-driven random text generation
//!
//! A grammar is a set of named macros, each with one or more alternative
//! productions. Generating text means expanding the entry macro: every
//! `${name}` reference is replaced by a randomly chosen alternative of `name`,
//! over and over, until only literal text is left.
//!
//! Grammars are usually written in cookie-jar format. Records are separated
//! by lines starting with `%%`, `#` starts a comment, and blank lines are
//! ignored. The first line of a record names the macro and every other line
//! is one alternative. The macro defined last is the entry macro.
//!
//! ```
//! # use macrogen::Result;
//! # fn main() -> Result<()> {
//! let source = "
//! %%
//! animal
//! fox
//! dog      # a good boy
//! %%
//! colour
//! red
//! brown
//! %%
//! sentence
//! the ${colour} ${animal} jumps
//! ";
//!
//! let table = macrogen::from_cookie_jar(source)?;
//! let text = table.generate(&mut rand::thread_rng())?;
//! assert!(text.starts_with("the ") && text.ends_with(" jumps"));
//! # Ok(())
//! # }
//! ```
//!
//! or, even shorter:
//!
//! ```
//! # use macrogen::Result;
//! # fn main() -> Result<()> {
//! let text = macrogen::generate("name\nworld\n%%\ngreeting\nhello, ${name}")?;
//! assert_eq!(text, "hello, world");
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipes
//!
//! A reference can be piped through another macro with `${name|pipe}`. Pipe
//! macros are defined under their name prefixed with `|`, and an empty
//! reference `${}` inside them marks where the piped-in value goes:
//!
//! ```
//! # use macrogen::Result;
//! # fn main() -> Result<()> {
//! let source = "
//! name
//! hi
//! %%
//! |excited
//! ${}!!
//! %%
//! greet
//! ${name|excited}
//! ";
//! assert_eq!(macrogen::generate(source)?, "hi!!");
//! # Ok(())
//! # }
//! ```
//!
//! A pipe macro's own references with a name are expanded normally, and an
//! empty reference with a pipe (`${|other}`) chains into another pipe.
//!
//! ## Termination
//!
//! Nothing stops a macro from referring to itself. A grammar where every
//! alternative of some macro leads back to it never finishes expanding. Use
//! [`MacroTable::with_round_limit`] to turn that into an error instead.
//!
//! [`MacroTable::with_round_limit`]: struct.MacroTable.html#method.with_round_limit

mod error;
pub use crate::error::Error;
mod expand;
pub use crate::expand::{expand_once, remove_empty, Expand};
mod expansion;
pub use crate::expansion::{Base, Expansion, PIPE};
mod output;
pub use crate::output::emit;
mod parser;
mod production;
pub use crate::production::Production;
mod record;
pub use crate::record::{parse_cookie_jar, parse_records, Record};
mod table;
pub use crate::table::MacroTable;

/// Creates a new macro table from a cookie-jar source string
pub fn from_cookie_jar<S: AsRef<str>>(s: S) -> Result<MacroTable> {
    MacroTable::from_cookie_jar(s)
}

/// Creates a new macro table from a JSON object of names to alternatives
#[cfg(feature = "json")]
pub fn from_json<S: AsRef<str>>(s: S) -> Result<MacroTable> {
    MacroTable::from_json(s)
}

/// Creates a new macro table from a cookie-jar source string, then uses it to
/// create a random output string
pub fn generate<S: AsRef<str>>(s: S) -> Result<String> {
    from_cookie_jar(s)?.generate(&mut rand::thread_rng())
}

/// A convenience type for a `Result` of `T` or [`Error`]
///
/// [`Error`]: enum.Error.html
pub type Result<T> = ::std::result::Result<T, Error>;
