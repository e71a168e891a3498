//! Iteration over the elements of a comma-separated header.
//!
//! All lines of one header form a single logical list. Each element is handed to a parser as the
//! remainder of its line, starting at the element. The parser returns whatever it did not consume,
//! and the search for the next element resumes from the first comma in that remainder. A parser
//! that gives up halfway through an element therefore only loses that element.

use crate::header::HeaderValue;

/// Advances to the start of the next element.
///
/// Anything in `rest` before the next comma is discarded, as are empty elements. When the current
/// line runs out, the search continues on the next line. Returns `None` once every line has been
/// exhausted.
pub(crate) fn next_element<'header, Lines>(
    rest: &'header str,
    lines: &mut Lines,
) -> Option<&'header str>
where
    Lines: Iterator<Item = &'header str>,
{
    let mut rest = match rest.find(',') {
        Some(index) => &rest[index..],
        None => "",
    };

    loop {
        rest = rest.trim_start_matches(|c| c == ',' || c == ' ' || c == '\t');

        if !rest.is_empty() {
            return Some(rest);
        }

        rest = lines.next()?;
    }
}

/// Parses every element of a header with `parse`.
///
/// `parse` receives the input starting at an element and returns the entry it read, if any, along
/// with the input it did not consume. Returns `None` if there are no lines at all, and an empty
/// list if the lines hold no elements.
pub(crate) fn parse_elements<'header, Values, Entry, Parse>(
    values: Values,
    mut parse: Parse,
) -> Option<Vec<Entry>>
where
    Values: Iterator<Item = &'header HeaderValue>,
    Parse: FnMut(&'header str) -> (Option<Entry>, &'header str),
{
    let mut lines = values.map(HeaderValue::as_str).peekable();
    lines.peek()?;

    let mut entries = Vec::new();
    let mut rest = "";

    while let Some(element) = next_element(rest, &mut lines) {
        let (entry, remaining) = parse(element);
        entries.extend(entry);
        rest = remaining;
    }

    Some(entries)
}
