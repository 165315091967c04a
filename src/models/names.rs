use serde::Serialize;

/// Reverse-resolution outcome for one address. `basename` is `null` both when the
/// address has no primary name and when the lookup failed; only `error` tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameRecord {
    pub address: String,
    pub basename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameLookupResponse {
    pub results: Vec<NameRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_name_serializes_as_null_without_error() {
        let record = NameRecord {
            address: "0xabc".to_string(),
            basename: None,
            error: None,
        };
        let encoded = serde_json::to_value(&record).expect("encodes");
        assert!(encoded["basename"].is_null());
        assert!(encoded.get("error").is_none());
    }
}
