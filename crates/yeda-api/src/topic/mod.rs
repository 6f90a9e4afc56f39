//! Topic browsing, search, and creation endpoints.

pub mod routes;

pub use routes::routes;
