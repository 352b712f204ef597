pub mod achievements;
pub mod competitor;
pub mod directory;

pub use achievements::*;
pub use competitor::*;
pub use directory::*;
