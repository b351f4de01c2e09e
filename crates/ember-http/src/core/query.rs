use std::collections::BTreeMap;

use url::Url;
use url::form_urlencoded;

use crate::data::Params;
use crate::error::Result;

/// Multi-valued query, keys kept sorted so encoding is deterministic.
pub type QueryValues = BTreeMap<String, Vec<String>>;

/// Parse `raw_url` and merge `params` into its query.
///
/// Text and record parameters are appended to existing values, mappings
/// replace them. The merged query is re-encoded with sorted keys; a URL
/// whose query ends up empty loses its `?`.
pub fn build_query(raw_url: &str, params: Option<&Params>) -> Result<Url> {
    let mut url = Url::parse(raw_url)?;
    let Some(params) = params else {
        return Ok(url);
    };

    let mut values = parse_query(url.query().unwrap_or(""));
    merge(&mut values, params);

    let encoded = encode(&values);
    url.set_query((!encoded.is_empty()).then_some(encoded.as_str()));
    Ok(url)
}

pub fn parse_query(query: &str) -> QueryValues {
    let mut values = QueryValues::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        values
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    values
}

pub fn merge(values: &mut QueryValues, params: &Params) {
    match params {
        Params::Text(text) => {
            for (key, value) in parse_query(text) {
                values.entry(key).or_default().extend(value);
            }
        }
        Params::Map(pairs) => {
            for (key, value) in pairs {
                values.insert(key.clone(), vec![value.clone()]);
            }
        }
        Params::Record(pairs) => {
            for (key, value) in pairs {
                values
                    .entry(key.clone())
                    .or_default()
                    .push(value.clone());
            }
        }
    }
}

pub fn encode(values: &QueryValues) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, list) in values {
        for value in list {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}
