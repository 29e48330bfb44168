mod school_repository;

pub use school_repository::{MySqlSchoolRepository, SchoolRepository};
