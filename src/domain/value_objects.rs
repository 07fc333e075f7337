//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;
use std::str::FromStr;

/// Characters left as-is inside a geo URI query: alphanumerics and the
/// unreserved marks `-_.!~*'()`. Everything else is percent-encoded.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const GEO_SCHEME: &str = "geo:";
const ORIGIN: &str = "0,0";

/// A geo URI asking a map application to search for some text.
///
/// Renders as `geo:0,0?q=<encoded query>`; the `0,0` position tells the
/// map application to place the result itself.
///
/// # Examples
/// ```
/// use geo_address::GeoUri;
///
/// let uri = GeoUri::for_query("Main St 1");
/// assert_eq!(uri.to_string(), "geo:0,0?q=Main%20St%201");
/// assert_eq!(uri.to_string().parse::<GeoUri>().unwrap().query(), "Main St 1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoUri {
    query: String,
}

impl GeoUri {
    pub fn for_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    /// The decoded search text.
    pub fn query(&self) -> &str {
        &self.query
    }
}

impl fmt::Display for GeoUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}?q={}",
            GEO_SCHEME,
            ORIGIN,
            utf8_percent_encode(&self.query, QUERY_ENCODE_SET)
        )
    }
}

impl FromStr for GeoUri {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(GEO_SCHEME)
            .ok_or_else(|| format!("not a geo URI: {:?}", s))?;
        let (_, params) = rest
            .split_once('?')
            .ok_or_else(|| format!("geo URI has no query: {:?}", s))?;
        let encoded = params
            .split('&')
            .find_map(|param| param.strip_prefix("q="))
            .ok_or_else(|| format!("geo URI has no q parameter: {:?}", s))?;
        let query = percent_decode_str(encoded)
            .decode_utf8()
            .map_err(|e| format!("geo URI query is not UTF-8: {}", e))?;

        Ok(Self::for_query(query.into_owned()))
    }
}
