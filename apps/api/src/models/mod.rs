pub mod records;
pub mod resume;
