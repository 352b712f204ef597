pub mod achievements;
pub mod client;
pub mod roster;
