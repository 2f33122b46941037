pub mod list;
pub mod merge;
