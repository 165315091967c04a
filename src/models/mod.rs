pub mod collectible;
pub mod identity;
pub mod names;
pub mod token;
