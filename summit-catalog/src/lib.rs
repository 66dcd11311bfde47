pub mod experience;
pub mod seed;

pub use experience::{Experience, NewExperience};
pub use seed::seed_catalog;
