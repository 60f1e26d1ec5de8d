use model::entities::{cart_item, product, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QuerySelect, RelationTrait, Set, TransactionTrait,
};
use tracing::{debug, info, instrument};

use crate::error::{Result, StoreError};

/// Put a product in a user's cart. Adding it twice is a no-op.
#[instrument(skip(db))]
pub async fn add(db: &DatabaseConnection, user_id: i32, product_id: i32) -> Result<()> {
    let txn = db.begin().await?;

    if user::Entity::find_by_id(user_id).one(&txn).await?.is_none() {
        return Err(StoreError::NotFound("user"));
    }
    if product::Entity::find_by_id(product_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(StoreError::NotFound("product"));
    }

    let existing = cart_item::Entity::find_by_id((user_id, product_id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        debug!("Product already in cart");
        return Ok(());
    }

    cart_item::ActiveModel {
        user_id: Set(user_id),
        product_id: Set(product_id),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(user_id, product_id, "Cart item added");
    Ok(())
}

/// Take a product out of a user's cart; a missing row is a no-op.
#[instrument(skip(db))]
pub async fn remove(db: &DatabaseConnection, user_id: i32, product_id: i32) -> Result<()> {
    cart_item::Entity::delete_many()
        .filter(cart_item::Column::UserId.eq(user_id))
        .filter(cart_item::Column::ProductId.eq(product_id))
        .exec(db)
        .await?;

    Ok(())
}

/// The products currently in a user's cart.
pub async fn contents(db: &DatabaseConnection, user_id: i32) -> Result<Vec<product::Model>> {
    Ok(product::Entity::find()
        .join(JoinType::InnerJoin, cart_item::Relation::Product.def().rev())
        .filter(cart_item::Column::UserId.eq(user_id))
        .all(db)
        .await?)
}
