pub mod assign;
pub mod complete;
pub mod details;
pub mod list;
