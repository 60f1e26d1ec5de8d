//! This file serves as the root for all SeaORM entity modules.
//! The data model mirrors the relational schema: three first-class entities
//! (user, post, product) and three association tables (like, cart_item,
//! follow) whose composite keys encode the many-to-many semantics.

pub mod cart_item;
pub mod follow;
pub mod like;
pub mod post;
pub mod product;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::cart_item::Entity as CartItem;
    pub use super::follow::Entity as Follow;
    pub use super::like::Entity as Like;
    pub use super::post::Entity as Post;
    pub use super::product::Entity as Product;
    pub use super::user::Entity as User;
}
