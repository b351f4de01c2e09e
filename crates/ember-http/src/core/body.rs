use std::collections::BTreeMap;

use bytes::Bytes;
use url::form_urlencoded;

use crate::data::Body;

/// Serialize a plain body. Form fields are encoded with sorted keys; a
/// repeated key keeps its last value.
pub fn encode_body(body: &Body) -> Bytes {
    match body {
        Body::Text(text) => Bytes::from(text.clone()),
        Body::Bytes(bytes) => bytes.clone(),
        Body::Form(pairs) => {
            let fields: BTreeMap<&str, &str> = pairs
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(fields)
                .finish();
            Bytes::from(encoded)
        }
    }
}
