use crate::Result;

use std::io::BufRead;

/// Starts a comment running to the end of the line
pub(crate) const COMMENT: char = '#';
/// A line starting with this closes the current record
pub(crate) const RECSEP: &str = "%%";

/// A group of lines between two record separators.
///
/// Lines are comment-stripped and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record(pub(crate) Vec<String>);

impl Record {
    /// The lines of this record
    pub fn lines(&self) -> &[String] {
        &self.0
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT) {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Reads `reader` to completion as a cookie-jar file, splitting it into
/// records.
///
/// Every separator closes a record, even an empty one, and whatever follows
/// the last separator is emitted as a final record. Bytes that are not valid
/// UTF-8 are replaced rather than rejected.
pub fn parse_cookie_jar<B: BufRead>(reader: B) -> Result<Vec<Record>> {
    let mut lines = Vec::new();
    for line in reader.split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        lines.push(String::from_utf8_lossy(&line).into_owned());
    }
    Ok(split_records(lines))
}

/// Splits an in-memory cookie-jar source into records
pub fn parse_records<S: AsRef<str>>(source: S) -> Vec<Record> {
    split_records(source.as_ref().lines())
}

fn split_records<I, S>(lines: I) -> Vec<Record>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut records = Vec::new();
    let mut current = Record::default();

    for line in lines {
        let line = strip_comment(line.as_ref());
        if line.starts_with(RECSEP) {
            records.push(std::mem::take(&mut current));
        } else if !line.is_empty() {
            current.0.push(line.to_string());
        }
    }

    // Finish off the last record
    records.push(current);
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(lines: &[&str]) -> Record {
        Record(lines.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn splits_on_separators() {
        let src = "a\nb\n%%\nc\nd\n";
        assert_eq!(parse_records(src), vec![record(&["a", "b"]), record(&["c", "d"])]);
    }

    #[test]
    fn keeps_empty_records() {
        let src = "%%\nfoo\nbar\n%%";
        assert_eq!(
            parse_records(src),
            vec![record(&[]), record(&["foo", "bar"]), record(&[])]
        );
    }

    #[test]
    fn strips_comments_and_blank_lines() {
        let src = "# header comment\nname # trailing\n\nalt one\n#\n%% separator text\nx";
        assert_eq!(
            parse_records(src),
            vec![record(&["name ", "alt one"]), record(&["x"])]
        );
    }

    #[test]
    fn comment_before_separator_hides_it() {
        let src = "a\n#%%\nb";
        assert_eq!(parse_records(src), vec![record(&["a", "b"])]);
    }

    #[test]
    fn reader_and_str_agree() -> Result<()> {
        let src = "%%\ngreet\nhello ${name} # comment\n%%\nname\nworld\r\n";
        let from_reader = parse_cookie_jar(src.as_bytes())?;
        assert_eq!(from_reader, parse_records(src));
        assert_eq!(from_reader[2], record(&["name", "world"]));
        Ok(())
    }

    #[test]
    fn invalid_utf8_is_replaced() -> Result<()> {
        let src: &[u8] = b"name\nbad \xff byte\n%%\nnext\nok";
        let records = parse_cookie_jar(src)?;
        assert_eq!(
            records,
            vec![record(&["name", "bad \u{fffd} byte"]), record(&["next", "ok"])]
        );
        Ok(())
    }

    #[test]
    fn empty_input() -> Result<()> {
        assert_eq!(parse_cookie_jar("".as_bytes())?, vec![Record::default()]);
        Ok(())
    }
}
