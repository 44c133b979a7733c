//! Route handlers, one module per resource.

pub mod breathing;
pub mod health;
pub mod hobbies;
pub mod insights;
pub mod journal;
pub mod mood;
pub mod users;

use serde::Deserialize;

/// `?limit=` on list endpoints; absent means everything.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}
