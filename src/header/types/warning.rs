use chrono::{DateTime, Utc};
use std::convert::{Infallible, TryFrom};
use std::fmt::{self, Display, Formatter};

use crate::header::common::date::{format_http_date, parse_http_date};
use crate::header::elements;
use crate::header::{HeaderName, HeaderValue, TypedHeader};
use crate::log::trace;
use crate::syntax;

/// The `"Warning"` typed header as described by
/// [[RFC7234, Section 5.5](https://tools.ietf.org/html/rfc7234#section-5.5)].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Warning(pub Vec<WarningEntry>);

entry_list!(Warning, WarningEntry);

/// One element of the `"Warning"` header.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct WarningEntry {
    /// The three digit warning code.
    pub code: u16,

    /// The host (and optionally port) or pseudonym of the server adding the warning. Use `"-"` when
    /// the agent is unknown, an empty agent is written as is.
    pub agent: String,

    /// The warning text, unescaped.
    pub text: String,

    /// The date the warning was generated, if one was given and could be parsed.
    pub date: Option<DateTime<Utc>>,
}

impl WarningEntry {
    /// Constructs an entry with no date.
    pub fn new<Agent, Text>(code: u16, agent: Agent, text: Text) -> Self
    where
        Agent: Into<String>,
        Text: Into<String>,
    {
        WarningEntry {
            code,
            agent: agent.into(),
            text: text.into(),
            date: None,
        }
    }

    /// Sets the warning date.
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    fn parse(element: &str) -> (Option<WarningEntry>, &str) {
        let (code, rest) = syntax::number(element);
        let code = match code.and_then(|code| u16::try_from(code).ok()) {
            Some(code) if code <= 999 => code,
            _ => {
                trace!("skipping warning element without a valid code");
                return (None, rest);
            }
        };

        let (rest, separated) = syntax::consume(rest, b' ');

        if !separated {
            trace!("skipping warning element {} without an agent", code);
            return (None, rest);
        }

        let (agent, rest) = syntax::chomp(rest);

        if agent.is_empty() {
            trace!("skipping warning element {} without an agent", code);
            return (None, rest);
        }

        let (text, rest) = syntax::quoted(rest);
        let (rest, separated) = syntax::consume(rest, b' ');
        let (date, rest) = if separated {
            let (date, rest) = syntax::quoted(rest);
            match parse_http_date(&date) {
                Ok(date) => (Some(date), rest),
                Err(_) => {
                    trace!("dropping malformed warning date {:?}", date);
                    (None, rest)
                }
            }
        } else {
            (None, rest)
        };

        let entry = WarningEntry {
            code,
            agent: agent.to_string(),
            text: text.into_owned(),
            date,
        };
        (Some(entry), rest)
    }
}

impl Display for WarningEntry {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{} {} ", self.code, self.agent)?;
        syntax::write_quoted(formatter, &self.text)?;

        if let Some(date) = self.date {
            write!(formatter, " \"{}\"", format_http_date(&date))?;
        }

        Ok(())
    }
}

impl TypedHeader for Warning {
    type DecodeError = Infallible;

    /// Returns the statically assigned [`HeaderName`] for this header.
    fn header_name() -> &'static HeaderName {
        &HeaderName::Warning
    }

    /// Converts the raw header values to the [`Warning`] header type. Based on the syntax provided
    /// by [[RFC7234, Section 5.5](https://tools.ietf.org/html/rfc7234#section-5.5)], this header
    /// has the following syntax:
    ///
    /// ```text
    /// Warning       = 1#warning-value
    /// warning-value = warn-code SP warn-agent SP warn-text [ SP warn-date ]
    /// warn-code  = 3DIGIT
    /// warn-agent = ( uri-host [ ":" port ] ) / pseudonym
    /// warn-text  = quoted-string
    /// warn-date  = DQUOTE HTTP-date DQUOTE
    /// ```
    ///
    /// Decoding never fails. Elements without a code, or without an agent after exactly one space,
    /// are skipped. A missing or unterminated text is read as far as it goes, and a date that does
    /// not parse is left out.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use std::convert::TryFrom;
    ///
    /// use httpfield::header::types::{Warning, WarningEntry};
    /// use httpfield::{HeaderValue, TypedHeader};
    ///
    /// let raw_header = vec![HeaderValue::try_from(
    ///     r#"199 - "good" "Sat, 06 Jul 2019 05:45:48 GMT", 299 gw1 "something is wrong""#,
    /// )
    /// .unwrap()];
    /// let date = Utc.with_ymd_and_hms(2019, 7, 6, 5, 45, 48).unwrap();
    ///
    /// assert_eq!(
    ///     Warning::decode(&mut raw_header.iter()).unwrap(),
    ///     Some(Warning(vec![
    ///         WarningEntry::new(199, "-", "good").with_date(date),
    ///         WarningEntry::new(299, "gw1", "something is wrong"),
    ///     ]))
    /// );
    /// ```
    fn decode<'header, Iter>(values: &mut Iter) -> Result<Option<Self>, Self::DecodeError>
    where
        Iter: Iterator<Item = &'header HeaderValue>,
    {
        Ok(elements::parse_elements(values, WarningEntry::parse).map(Warning))
    }

    /// Converts the [`Warning`] type to a single raw header value.
    ///
    /// # Examples
    ///
    /// ```
    /// use httpfield::header::types::{Warning, WarningEntry};
    /// use httpfield::TypedHeader;
    ///
    /// let typed_header = Warning::from(WarningEntry::new(299, "-", "something is \"fishy\""));
    /// let mut raw_header = vec![];
    /// typed_header.encode(&mut raw_header);
    ///
    /// assert_eq!(raw_header, vec![r#"299 - "something is \"fishy\"""#]);
    /// ```
    fn encode<Target>(&self, values: &mut Target)
    where
        Target: Extend<HeaderValue>,
    {
        super::encode_joined(self.iter(), values);
    }
}

#[cfg(test)]
mod test {
    use chrono::{TimeZone, Utc};
    use std::convert::TryFrom;

    use crate::header::types::{Warning, WarningEntry};
    use crate::header::{HeaderValue, TypedHeader};

    fn decode(lines: &[&str]) -> Option<Warning> {
        let values = lines
            .iter()
            .map(|line| HeaderValue::try_from(*line).unwrap())
            .collect::<Vec<_>>();
        Warning::decode(&mut values.iter()).unwrap()
    }

    fn entry(code: u16, agent: &str, text: &str) -> WarningEntry {
        WarningEntry::new(code, agent, text)
    }

    #[test]
    fn test_warning_decode() {
        let date = Utc.with_ymd_and_hms(2019, 7, 6, 5, 45, 48).unwrap();
        let tests = vec![
            (r#"299 - "good""#, vec![entry(299, "-", "good")]),
            (
                r#"299 example.net:80 "good""#,
                vec![entry(299, "example.net:80", "good")],
            ),
            (
                r#"299 [fe80::a%25en1]:80 "good""#,
                vec![entry(299, "[fe80::a%25en1]:80", "good")],
            ),
            (
                r#"214 [v9.a51c00de,route=51]:8080 "converted from 5D media!""#,
                vec![entry(
                    214,
                    "[v9.a51c00de,route=51]:8080",
                    "converted from 5D media!",
                )],
            ),
            (
                r#"199 - "good", 299 - "better""#,
                vec![entry(199, "-", "good"), entry(299, "-", "better")],
            ),
            (
                r#"199 - "good" , 299 - "better""#,
                vec![entry(199, "-", "good"), entry(299, "-", "better")],
            ),
            (
                r#"299 - "good" "Sat, 06 Jul 2019 05:45:48 GMT""#,
                vec![entry(299, "-", "good").with_date(date)],
            ),
            (
                r#"199 - "good" "Sat, 06 Jul 2019 05:45:48 GMT",299 - "better""#,
                vec![
                    entry(199, "-", "good").with_date(date),
                    entry(299, "-", "better"),
                ],
            ),
            (
                "199 - \"good\" \"Sat, 06 Jul 2019 05:45:48 GMT\"\t,299 - \"better\"",
                vec![
                    entry(199, "-", "good").with_date(date),
                    entry(299, "-", "better"),
                ],
            ),
            (
                r#"299 - "with \"escaped\" quotes""#,
                vec![entry(299, "-", r#"with "escaped" quotes"#)],
            ),
            (
                r#"299 - "\"escaped\" quotes""#,
                vec![entry(299, "-", r#""escaped" quotes"#)],
            ),
            (
                r#"299 - "with \"escaped\"""#,
                vec![entry(299, "-", r#"with "escaped""#)],
            ),
            (
                r#"299 - "a, b", 199 - "c""#,
                vec![entry(299, "-", "a, b"), entry(199, "-", "c")],
            ),
        ];

        for (line, expected) in tests {
            assert_eq!(decode(&[line]), Some(Warning(expected)), "{}", line);
        }
    }

    #[test]
    fn test_warning_decode_malformed() {
        let tests = vec![
            ("299", vec![]),
            ("299 -", vec![entry(299, "-", "")]),
            ("299 - unquoted", vec![entry(299, "-", "")]),
            (r#"299  - "two spaces""#, vec![entry(299, "-", "two spaces")]),
            (r#"?????,299 - "good""#, vec![entry(299, "-", "good")]),
            (
                r#"299  bad, 299 - "good""#,
                vec![entry(299, "bad", ""), entry(299, "-", "good")],
            ),
            (r#"299 - "good" "bad date""#, vec![entry(299, "-", "good")]),
            (r#"299 - "unterminated"#, vec![entry(299, "-", "unterminated")]),
            (
                r#"299 - "unterminated\""#,
                vec![entry(299, "-", r#"unterminated""#)],
            ),
            (r#"1000 - "too big", 199 - "ok""#, vec![entry(199, "-", "ok")]),
            (r#"299-"no space", 199 - "ok""#, vec![entry(199, "-", "ok")]),
            (r#"299 , 199 - "ok""#, vec![entry(199, "-", "ok")]),
            (
                r#"214 funky,reg-name "WAT""#,
                vec![entry(214, "funky", "")],
            ),
        ];

        for (line, expected) in tests {
            assert_eq!(decode(&[line]), Some(Warning(expected)), "{}", line);
        }
    }

    #[test]
    fn test_warning_absent_and_empty() {
        assert_eq!(decode(&[]), None);
        assert_eq!(decode(&[""]), Some(Warning::new()));
    }

    #[test]
    fn test_warning_encode() {
        let date = Utc.with_ymd_and_hms(2019, 7, 6, 5, 45, 48).unwrap();
        let mut raw_header = vec![];
        Warning(vec![
            entry(199, "gw1", "good").with_date(date),
            entry(299, "-", r"back\slash"),
        ])
        .encode(&mut raw_header);

        assert_eq!(
            raw_header,
            vec![r#"199 gw1 "good" "Sat, 06 Jul 2019 05:45:48 GMT", 299 - "back\\slash""#]
        );
        assert_eq!(
            Warning::decode(&mut raw_header.iter()).unwrap(),
            Some(Warning(vec![
                entry(199, "gw1", "good").with_date(date),
                entry(299, "-", r"back\slash"),
            ]))
        );
    }

    #[test]
    fn test_warning_encode_empty_agent() {
        let mut raw_header = vec![];
        Warning::from(entry(299, "", "x")).encode(&mut raw_header);
        assert_eq!(raw_header, vec![r#"299  "x""#]);
    }
}
