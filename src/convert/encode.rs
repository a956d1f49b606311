//! Request encoding for the conversion service
//!
//! Links are percent-encoded individually with nothing left unescaped except
//! the unreserved set, then joined with `|`. The query string encodes every
//! value again but keeps `%` literal, so already-escaped link bytes pass
//! through unchanged while the `|` separator goes out as `%7C`.

use crate::config::ConversionParams;
use crate::links::LinkList;
use crate::ConvertError;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Separator placed between encoded links
pub const LINK_SEPARATOR: &str = "|";

/// Everything except `A-Z a-z 0-9 - _ . ~`
const LINK_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Like [`LINK_SET`] but leaves `%` alone
const QUERY_SET: &AsciiSet = &LINK_SET.remove(b'%');

/// Percent-encodes each link and joins them with [`LINK_SEPARATOR`]
///
/// # Example
///
/// ```
/// use subgist::convert::encode_links;
/// use subgist::links::LinkList;
///
/// let links = LinkList::parse("vmess://abc\nvless://def");
/// assert_eq!(encode_links(&links), "vmess%3A%2F%2Fabc|vless%3A%2F%2Fdef");
/// ```
pub fn encode_links(links: &LinkList) -> String {
    links
        .iter()
        .map(|link| utf8_percent_encode(link, LINK_SET).to_string())
        .collect::<Vec<_>>()
        .join(LINK_SEPARATOR)
}

/// Serializes the conversion parameters followed by `url=<encoded links>`
pub fn build_query(params: &ConversionParams, encoded_links: &str) -> String {
    params
        .iter()
        .chain(std::iter::once(("url", encoded_links)))
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY_SET),
                utf8_percent_encode(value, QUERY_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Builds the full conversion request URL `<base_url>?<query>`
///
/// The base URL is only validated here; the query is appended verbatim so
/// that the encoding above is exactly what goes on the wire.
pub fn build_request_url(
    base_url: &str,
    params: &ConversionParams,
    links: &LinkList,
) -> Result<String, ConvertError> {
    Url::parse(base_url).map_err(|source| ConvertError::InvalidBaseUrl {
        url: base_url.to_string(),
        source,
    })?;

    let query = build_query(params, &encode_links(links));
    Ok(format!("{}?{}", base_url, query))
}
