//! Schools feature: recording schools and listing them by distance.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/addSchool` | Validate and store a school |
//! | GET | `/api/listSchools?latitude=&longitude=` | All schools, nearest first |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{MySqlSchoolRepository, SchoolRepository};
pub use services::SchoolService;
