//! External-facing projections of stored entities.
//! These are the shapes the HTTP layer serializes; they are computed from
//! the persisted rows at read time and never hold derived state that could
//! go stale between requests.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Projection of a user account.
///
/// The password hash and any other internal columns are deliberately
/// absent; the api token doubles as the bearer credential for subsequent
/// requests.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UserProfile {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub api_token: String,
}

/// Projection of a post, including the fields derived from its relations.
///
/// `author` is resolved through the owning user and `likes` is the count
/// of like rows referencing the post, both freshly computed per call.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PostView {
    pub id: i32,
    pub title: String,
    pub caption: Option<String>,
    pub img_url: String,
    pub author: String,
    pub likes: u64,
    pub created_at: DateTime<Utc>,
}

/// Projection of a product in the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub img_url: String,
    pub price: Decimal,
}
