use serde::{Deserialize, Serialize};

/// Farcaster profile as returned by the social-graph search and bulk lookup endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarcasterUser {
    pub fid: u64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub custody_address: String,
    #[serde(default)]
    pub pfp_url: Option<String>,
    #[serde(default)]
    pub verified_addresses: Option<VerifiedAddresses>,
    #[serde(default)]
    pub follower_count: Option<u64>,
    #[serde(default)]
    pub following_count: Option<u64>,
    #[serde(default)]
    pub verified_accounts: Option<Vec<VerifiedAccount>>,
    #[serde(default)]
    pub power_badge: Option<bool>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VerifiedAddresses {
    #[serde(default)]
    pub eth_addresses: Vec<String>,
    #[serde(default)]
    pub sol_addresses: Vec<String>,
    #[serde(default)]
    pub primary: PrimaryAddresses,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PrimaryAddresses {
    #[serde(default)]
    pub eth_address: Option<String>,
    #[serde(default)]
    pub sol_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedAccount {
    pub platform: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserProfile {
    #[serde(default)]
    pub bio: Option<UserBio>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserBio {
    #[serde(default)]
    pub text: Option<String>,
}

impl FarcasterUser {
    fn verified_eth(&self) -> &[String] {
        self.verified_addresses
            .as_ref()
            .map(|verified| verified.eth_addresses.as_slice())
            .unwrap_or_default()
    }

    /// Verified addresses followed by the custody address when it is not already listed.
    /// Holdings (tokens, NFTs, comparison) are always looked up across this set.
    pub fn holding_addresses(&self) -> Vec<String> {
        let mut addresses = self.verified_eth().to_vec();
        if !self.custody_address.is_empty() && !addresses.contains(&self.custody_address) {
            addresses.push(self.custody_address.clone());
        }
        addresses
    }

    /// Verified addresses, or the custody address alone when none are verified.
    pub fn name_addresses(&self) -> Vec<String> {
        let verified = self.verified_eth();
        if !verified.is_empty() {
            return verified.to_vec();
        }
        if self.custody_address.is_empty() {
            Vec::new()
        } else {
            vec![self.custody_address.clone()]
        }
    }

    pub fn primary_address(&self) -> &str {
        self.verified_addresses
            .as_ref()
            .and_then(|verified| verified.primary.eth_address.as_deref())
            .unwrap_or(&self.custody_address)
    }

    pub fn bio(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .and_then(|profile| profile.bio.as_ref())
            .and_then(|bio| bio.text.as_deref())
            .filter(|text| !text.trim().is_empty())
    }

    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.username
        } else {
            &self.display_name
        }
    }

    /// Upper-cased first character of the label, `?` when the profile has neither name.
    pub fn initial(&self) -> String {
        self.label()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }

    pub fn x_account(&self) -> Option<&VerifiedAccount> {
        self.verified_accounts
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|account| account.platform == "x")
    }

    pub fn other_accounts(&self) -> impl Iterator<Item = &VerifiedAccount> {
        self.verified_accounts
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|account| account.platform != "x")
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UserSearchResponse {
    #[serde(default)]
    pub result: UserSearchResult,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UserSearchResult {
    #[serde(default)]
    pub users: Vec<FarcasterUser>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct BulkUsersResponse {
    #[serde(default)]
    pub users: Vec<FarcasterUser>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(value: serde_json::Value) -> FarcasterUser {
        serde_json::from_value(value).expect("user decodes")
    }

    #[test]
    fn holding_addresses_append_custody_once() {
        let u = user(json!({
            "fid": 3,
            "username": "dwr",
            "display_name": "Dan",
            "custody_address": "0xcustody",
            "verified_addresses": {
                "eth_addresses": ["0xaaa", "0xbbb"],
                "sol_addresses": [],
                "primary": {"eth_address": "0xbbb"}
            }
        }));
        assert_eq!(u.holding_addresses(), vec!["0xaaa", "0xbbb", "0xcustody"]);
        assert_eq!(u.name_addresses(), vec!["0xaaa", "0xbbb"]);
        assert_eq!(u.primary_address(), "0xbbb");

        let listed = user(json!({
            "fid": 4,
            "custody_address": "0xaaa",
            "verified_addresses": {"eth_addresses": ["0xaaa"]}
        }));
        assert_eq!(listed.holding_addresses(), vec!["0xaaa"]);
    }

    #[test]
    fn unverified_user_falls_back_to_custody() {
        let u = user(json!({"fid": 9, "username": "solo", "custody_address": "0xc"}));
        assert_eq!(u.holding_addresses(), vec!["0xc"]);
        assert_eq!(u.name_addresses(), vec!["0xc"]);
        assert_eq!(u.primary_address(), "0xc");
        assert_eq!(u.initial(), "S");
        assert!(u.bio().is_none());
    }

    #[test]
    fn verified_accounts_split_x_from_others() {
        let u = user(json!({
            "fid": 1,
            "verified_accounts": [
                {"platform": "github", "username": "octo"},
                {"platform": "x", "username": "bird"}
            ],
            "profile": {"bio": {"text": "builder"}}
        }));
        assert_eq!(u.x_account().map(|a| a.username.as_str()), Some("bird"));
        assert_eq!(u.other_accounts().count(), 1);
        assert_eq!(u.bio(), Some("builder"));
        assert_eq!(u.initial(), "?");
    }

    #[test]
    fn search_envelope_tolerates_missing_result() {
        let parsed: UserSearchResponse = serde_json::from_value(json!({})).expect("decodes");
        assert!(parsed.result.users.is_empty());
    }
}
