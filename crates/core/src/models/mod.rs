//! Wire models for the listing API.
//!
//! Field names follow the API's JSON contract (Spanish column names such as
//! `titulo` and `es_principal`) so that serde maps structs 1:1 onto requests
//! and responses. Optional relational columns serialize as explicit `null` -
//! the backend treats an absent key and an empty string differently, and the
//! only safe "no value" marker for a foreign key is `null`.

pub mod agent;
pub mod catalog;
pub mod dashboard;
pub mod property;
pub mod user;

pub use agent::Agent;
pub use catalog::{CatalogItem, CatalogSet};
pub use dashboard::{
    AgentCaptureCount, CityCount, CountByName, DashboardStats, ImageCoverage, MostVisited,
    PriceStats, RecentActivity,
};
pub use property::{Property, PropertyImage};
pub use user::{AdminUser, User};
