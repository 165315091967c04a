pub mod holdings;
pub mod layout;
pub mod nft;
pub mod panel;
pub mod profile;
