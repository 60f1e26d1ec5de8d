use model::entities::product;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::{debug, info, instrument};

use crate::error::{Result, StoreError};

/// Field values for a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub img_url: String,
    pub description: Option<String>,
    pub price: Decimal,
}

/// In-place field changes applied by [`update`].
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub img_url: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

fn check_price(price: Decimal) -> Result<Decimal> {
    if price.is_sign_negative() {
        return Err(StoreError::Validation(format!(
            "Price must not be negative, got {price}"
        )));
    }
    Ok(price.round_dp(2))
}

#[instrument(skip(db, new_product), fields(name = %new_product.name))]
pub async fn create(db: &DatabaseConnection, new_product: NewProduct) -> Result<product::Model> {
    debug!("Creating product");

    let price = check_price(new_product.price)?;

    let product = product::ActiveModel {
        name: Set(new_product.name),
        img_url: Set(new_product.img_url),
        description: Set(new_product.description),
        price: Set(price),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(product_id = product.id, "Product created");
    Ok(product)
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<product::Model>> {
    Ok(product::Entity::find_by_id(id).one(db).await?)
}

pub async fn all(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Ok(product::Entity::find().all(db).await?)
}

#[instrument(skip(db, changes))]
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    changes: ProductChanges,
) -> Result<product::Model> {
    let existing = product::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(StoreError::NotFound("product"))?;

    let mut active: product::ActiveModel = existing.into();
    if let Some(name) = changes.name {
        active.name = Set(name);
    }
    if let Some(img_url) = changes.img_url {
        active.img_url = Set(img_url);
    }
    if let Some(description) = changes.description {
        active.description = Set(Some(description));
    }
    if let Some(price) = changes.price {
        active.price = Set(check_price(price)?);
    }

    let updated = active.update(db).await?;
    info!(product_id = updated.id, "Product updated");
    Ok(updated)
}

/// Delete a product; cart rows referencing it go with it through the
/// cascade.
#[instrument(skip(db))]
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
    let result = product::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(StoreError::NotFound("product"));
    }

    info!(product_id = id, "Product deleted");
    Ok(())
}
