//! Mock "estimated value" for collectibles.
//!
//! This is a deterministic placeholder derived from the contract address and
//! token id so listings have a stable ordering. It is not a price and must not
//! be presented as one.

const SCORE_MODULUS: u64 = 10_000;

/// `(sum of UTF-16 code units of the contract) × (token id) mod 10000 / 100`.
///
/// The token id is read as hex (optional `0x`), then as decimal when the hex
/// reading is absent or zero, then defaults to zero. Ids of any width are
/// reduced modulo 10000 while parsing so the result is exact.
pub fn estimated_value(contract_address: &str, token_id: &str) -> f64 {
    let contract_hash: u64 = contract_address.encode_utf16().map(u64::from).sum();
    let factor = token_id_factor(token_id);
    let score = (contract_hash % SCORE_MODULUS) * factor % SCORE_MODULUS;
    score as f64 / 100.0
}

fn token_id_factor(token_id: &str) -> u64 {
    let trimmed = token_id.trim_start();
    let hex_body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if let Some(reading) = leading_digits(hex_body, 16) {
        if reading.nonzero {
            return reading.residue;
        }
    }
    match leading_digits(trimmed, 10) {
        Some(reading) if reading.nonzero => reading.residue,
        _ => 0,
    }
}

struct DigitReading {
    residue: u64,
    nonzero: bool,
}

/// Reads the longest digit prefix in `radix`; `None` when there is none.
fn leading_digits(text: &str, radix: u32) -> Option<DigitReading> {
    let mut residue = 0u64;
    let mut nonzero = false;
    let mut seen = false;
    for ch in text.chars() {
        let Some(digit) = ch.to_digit(radix) else { break };
        seen = true;
        nonzero |= digit != 0;
        residue = (residue * u64::from(radix) + u64::from(digit)) % SCORE_MODULUS;
    }
    seen.then_some(DigitReading { residue, nonzero })
}
