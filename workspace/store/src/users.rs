use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use model::entities::user;
use rand::rngs::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::{Result, StoreError};

/// Field values for a new user. The password arrives in plaintext and is
/// hashed before anything touches the database.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::PasswordHash(e.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Mint the bearer credential: 128 random bits, hex encoded.
fn mint_api_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Create a user.
///
/// Username and email are pre-checked inside the same transaction as the
/// insert so a conflict never mutates the store, and the two cases fail
/// with distinct messages.
#[instrument(skip(db, new_user), fields(username = %new_user.username))]
pub async fn create(db: &DatabaseConnection, new_user: NewUser) -> Result<user::Model> {
    debug!("Creating user");

    let txn = db.begin().await?;

    if user::Entity::find()
        .filter(user::Column::Username.eq(new_user.username.as_str()))
        .one(&txn)
        .await?
        .is_some()
    {
        return Err(StoreError::Conflict {
            field: "username",
            message: "Please choose a different username.".to_string(),
        });
    }

    if user::Entity::find()
        .filter(user::Column::Email.eq(new_user.email.as_str()))
        .one(&txn)
        .await?
        .is_some()
    {
        return Err(StoreError::Conflict {
            field: "email",
            message: "That email is already in use.".to_string(),
        });
    }

    let password_hash = hash_password(&new_user.password)?;

    let user = user::ActiveModel {
        username: Set(new_user.username),
        email: Set(new_user.email),
        password_hash: Set(password_hash),
        api_token: Set(mint_api_token()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(user_id = user.id, "User created");
    Ok(user)
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<user::Model>> {
    Ok(user::Entity::find_by_id(id).one(db).await?)
}

pub async fn find_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<user::Model>> {
    Ok(user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?)
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<user::Model>> {
    Ok(user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?)
}

/// Resolve a bearer token to its user.
pub async fn find_by_token(db: &DatabaseConnection, token: &str) -> Result<Option<user::Model>> {
    Ok(user::Entity::find()
        .filter(user::Column::ApiToken.eq(token))
        .one(db)
        .await?)
}

/// Resolve username/password credentials to a user, or `None` when either
/// the username is unknown or the password does not verify.
#[instrument(skip(db, password))]
pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<Option<user::Model>> {
    let Some(user) = find_by_username(db, username).await? else {
        return Ok(None);
    };

    if verify_password(password, &user.password_hash) {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

/// Delete a user. Posts, likes, cart rows and follow edges referencing the
/// user are removed by the foreign key cascades.
#[instrument(skip(db))]
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
    let result = user::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(StoreError::NotFound("user"));
    }

    info!(user_id = id, "User deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_db;
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn create_hashes_password_and_mints_token() {
        let db = setup_db().await;

        let alice = create(
            &db,
            NewUser {
                username: "alice".to_string(),
                email: "alice@x.com".to_string(),
                password: "pw1".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(alice.username, "alice");
        assert_eq!(alice.email, "alice@x.com");
        // The raw password never lands in the row
        assert_ne!(alice.password_hash, "pw1");
        assert!(verify_password("pw1", &alice.password_hash));
        assert!(!verify_password("wrong", &alice.password_hash));
        // 128 bits, hex encoded
        assert_eq!(alice.api_token.len(), 32);

        let by_token = find_by_token(&db, &alice.api_token).await.unwrap().unwrap();
        assert_eq!(by_token.id, alice.id);

        // The other point lookups resolve the same row
        let by_email = find_by_email(&db, "alice@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, alice.id);
        let by_id = find_by_id(&db, alice.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "alice");
        assert!(find_by_username(&db, "nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_and_email_fail_distinctly() {
        let db = setup_db().await;

        create(
            &db,
            NewUser {
                username: "bob".to_string(),
                email: "bob@x.com".to_string(),
                password: "pw".to_string(),
            },
        )
        .await
        .unwrap();

        let same_username = create(
            &db,
            NewUser {
                username: "bob".to_string(),
                email: "bob2@x.com".to_string(),
                password: "pw".to_string(),
            },
        )
        .await;
        assert!(matches!(
            same_username,
            Err(StoreError::Conflict { field: "username", .. })
        ));

        let same_email = create(
            &db,
            NewUser {
                username: "bob2".to_string(),
                email: "bob@x.com".to_string(),
                password: "pw".to_string(),
            },
        )
        .await;
        assert!(matches!(
            same_email,
            Err(StoreError::Conflict { field: "email", .. })
        ));

        // Neither conflict mutated the store
        let count = model::entities::prelude::User::find().count(&db).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn authenticate_checks_credentials() {
        let db = setup_db().await;

        create(
            &db,
            NewUser {
                username: "carol".to_string(),
                email: "carol@x.com".to_string(),
                password: "secret".to_string(),
            },
        )
        .await
        .unwrap();

        assert!(authenticate(&db, "carol", "secret").await.unwrap().is_some());
        assert!(authenticate(&db, "carol", "nope").await.unwrap().is_none());
        assert!(authenticate(&db, "nobody", "secret").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_missing_user_is_not_found() {
        let db = setup_db().await;

        let result = delete(&db, 999).await;
        assert!(matches!(result, Err(StoreError::NotFound("user"))));
    }
}
