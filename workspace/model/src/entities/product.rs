use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// An item offered in the storefront.
///
/// Products have no owner; they are only tied to users through cart rows.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub img_url: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItem,
}

/// Users holding this product in their cart.
impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        super::cart_item::Relation::User.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::cart_item::Relation::Product.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
