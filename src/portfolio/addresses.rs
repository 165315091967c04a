/// Splits a comma-separated query value into trimmed, non-empty entries in input order.
pub fn parse_address_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Prefixes `0x` when the address does not already carry it.
pub fn normalize_address(address: &str) -> String {
    let trimmed = address.trim();
    if trimmed.starts_with("0x") {
        trimmed.to_string()
    } else {
        format!("0x{trimmed}")
    }
}

pub fn join_addresses(addresses: &[String]) -> String {
    addresses.join(",")
}
