use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use model::entities::{post, product};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, Set};

use crate::users::{self, NewUser};

/// In-memory SQLite database with the full schema and cascade rules active.
pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    db.execute_unprepared("PRAGMA foreign_keys = ON;")
        .await
        .expect("Failed to enable foreign keys");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn fixture_user(db: &DatabaseConnection, name: &str) -> model::entities::user::Model {
    users::create(
        db,
        NewUser {
            username: name.to_string(),
            email: format!("{name}@x.com"),
            password: "pw".to_string(),
        },
    )
    .await
    .expect("Failed to create fixture user")
}

pub async fn fixture_post(db: &DatabaseConnection, author_id: i32, title: &str) -> post::Model {
    post::ActiveModel {
        title: Set(title.to_string()),
        img_url: Set("img.png".to_string()),
        caption: Set(None),
        created_at: Set(Utc::now()),
        user_id: Set(author_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create fixture post")
}

pub async fn fixture_product(db: &DatabaseConnection, name: &str) -> product::Model {
    product::ActiveModel {
        name: Set(name.to_string()),
        img_url: Set("product.png".to_string()),
        description: Set(None),
        price: Set(Decimal::new(999, 2)),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create fixture product")
}
