use rand::Rng;
use std::io::Write;
use tracing::debug;

use crate::{Error, MacroTable, Result};

/// Expands the entry macro `count` times, writing each result to `out` on
/// its own line.
///
/// Generation stops at the first error; lines already written stay written.
/// Returns the number of lines written.
///
/// # Examples
/// ```
/// # use macrogen::{emit, MacroTable, Result};
/// # fn main() -> Result<()> {
/// let table = MacroTable::from_cookie_jar("word\nhey")?;
/// let mut out = Vec::new();
/// emit(&table, 3, &mut rand::thread_rng(), &mut out)?;
/// assert_eq!(out, b"hey\nhey\nhey\n");
/// # Ok(())
/// # }
/// ```
pub fn emit<R, W>(table: &MacroTable, count: usize, rng: &mut R, out: &mut W) -> Result<usize>
where
    R: ?Sized + Rng,
    W: ?Sized + Write,
{
    for i in 0..count {
        let line = table.generate(rng)?;
        writeln!(out, "{}", line).map_err(|e| Error::OutputError(e.to_string()))?;
        debug!(index = i, "emitted output");
    }
    out.flush().map_err(|e| Error::OutputError(e.to_string()))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::io;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_one_line_per_output() -> Result<()> {
        let table = MacroTable::from_cookie_jar("d\n1\n2\n%%\nn\n${d}${d}")?;
        let mut out = Vec::new();
        let written = emit(&table, 5, &mut StdRng::seed_from_u64(1), &mut out)?;
        assert_eq!(written, 5);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.len() == 2));
        Ok(())
    }

    #[test]
    fn zero_outputs() -> Result<()> {
        let table = MacroTable::default();
        let mut out = Vec::new();
        assert_eq!(emit(&table, 0, &mut rand::thread_rng(), &mut out)?, 0);
        assert!(out.is_empty());
        Ok(())
    }

    #[test]
    fn stops_at_first_error() {
        let table = MacroTable::from_cookie_jar("a\n${gone}").unwrap();
        let mut out = Vec::new();
        let res = emit(&table, 3, &mut rand::thread_rng(), &mut out);
        assert_eq!(res, Err(Error::UndefinedMacroError("gone".into())));
        assert!(out.is_empty());
    }

    #[test]
    fn write_failures() {
        let table = MacroTable::from_cookie_jar("a\nb").unwrap();
        let res = emit(&table, 1, &mut rand::thread_rng(), &mut Broken);
        assert!(matches!(res, Err(Error::OutputError(_))));
    }
}
