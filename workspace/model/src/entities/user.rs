use sea_orm::entity::prelude::*;

/// A registered member of the site.
///
/// `password_hash` holds the salted one-way hash; the raw password is never
/// persisted. `api_token` is the bearer credential minted once at signup and
/// never rotated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    #[sea_orm(unique)]
    pub api_token: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Posts authored by this user.
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
    #[sea_orm(has_many = "super::like::Entity")]
    Like,
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItem,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

/// Products in this user's cart.
impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        super::cart_item::Relation::Product.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::cart_item::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
