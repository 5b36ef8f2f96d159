pub mod location;
pub mod season;
