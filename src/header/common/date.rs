//! HTTP-date as described by
//! [[RFC7231, Section 7.1.1.1](https://tools.ietf.org/html/rfc7231#section-7.1.1.1)].

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::error::Error;
use std::fmt::{self, Display, Formatter};

const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";
const RFC850_DATE: &str = "%A, %d-%b-%y %H:%M:%S GMT";
const ASCTIME_DATE: &str = "%a %b %e %H:%M:%S %Y";

/// A generic error type indicating that the parsing of the datetime failed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DateTimeError;

impl Display for DateTimeError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "invalid date time")
    }
}

impl Error for DateTimeError {}

/// Parses an HTTP-date in any of the three accepted forms.
///
/// ```text
/// HTTP-date    = IMF-fixdate / obs-date
/// IMF-fixdate  = day-name "," SP date1 SP time-of-day SP GMT
///              ; Sun, 06 Nov 1994 08:49:37 GMT
/// rfc850-date  = day-name-l "," SP date2 SP time-of-day SP GMT
///              ; Sunday, 06-Nov-94 08:49:37 GMT
/// asctime-date = day-name SP date3 SP time-of-day SP year
///              ; Sun Nov  6 08:49:37 1994
/// ```
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
///
/// use httpfield::header::common::parse_http_date;
///
/// let expected = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();
/// assert_eq!(parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT"), Ok(expected));
/// assert_eq!(parse_http_date("Sunday, 06-Nov-94 08:49:37 GMT"), Ok(expected));
/// assert_eq!(parse_http_date("Sun Nov  6 08:49:37 1994"), Ok(expected));
/// assert!(parse_http_date("yesterday").is_err());
/// ```
pub fn parse_http_date(value: &str) -> Result<DateTime<Utc>, DateTimeError> {
    let value = value.trim();

    [IMF_FIXDATE, RFC850_DATE, ASCTIME_DATE]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|date_time| Utc.from_utc_datetime(&date_time))
        .ok_or(DateTimeError)
}

/// Formats a date as an IMF-fixdate, the only form a sender may generate.
pub fn format_http_date(date_time: &DateTime<Utc>) -> String {
    date_time.format(IMF_FIXDATE).to_string()
}
