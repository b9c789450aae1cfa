//! URL query-string form of a serialized filter
//!
//! `status=eq%3AActive&priority=in%3AHigh%2CCritical&_logic=or`

use super::codec::SerializedQuery;
use super::condition::{Combinator, FilterSet};
use super::engine::FilterEngine;

/// Reserved parameter carrying the combinator; omitted for AND
pub const LOGIC_PARAM: &str = "_logic";

/// Flatten a serialized query into URL query parameters (no leading '?')
pub fn to_query_string(query: &SerializedQuery, combinator: Combinator) -> String {
    let mut params: Vec<String> = query
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect();

    if combinator == Combinator::Or {
        params.push(format!("{}=or", LOGIC_PARAM));
    }

    params.join("&")
}

/// Parse URL query parameters back into a serialized query and combinator.
///
/// Pairs that are empty or fail to decode are skipped.
pub fn parse_query_string(raw: &str) -> (SerializedQuery, Combinator) {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    let mut query = SerializedQuery::new();
    let mut combinator = Combinator::And;

    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let (Ok(key), Ok(value)) = (decode(key), decode(value)) else {
            tracing::debug!("Skipping undecodable query parameter: {}", pair);
            continue;
        };
        if key.is_empty() {
            continue;
        }

        if key == LOGIC_PARAM {
            combinator = Combinator::parse(&value).unwrap_or_default();
        } else {
            query.insert(key, value);
        }
    }

    (query, combinator)
}

fn decode(part: &str) -> Result<String, std::string::FromUtf8Error> {
    // '+' is a space in form-encoded queries
    urlencoding::decode(&part.replace('+', " ")).map(|s| s.into_owned())
}

impl<'a> FilterEngine<'a> {
    /// Serialize a filter set straight to URL query parameters
    pub fn to_query_string(&self, filter_set: &FilterSet) -> String {
        to_query_string(&self.serialize(filter_set), filter_set.combinator)
    }

    /// Hydrate a filter set from URL query parameters
    pub fn from_query_string(&self, raw: &str) -> FilterSet {
        let (query, combinator) = parse_query_string(raw);
        let mut filter_set = self.deserialize(&query);
        filter_set.set_combinator(combinator);
        filter_set
    }
}
