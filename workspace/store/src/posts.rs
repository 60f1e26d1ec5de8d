use chrono::Utc;
use model::entities::{post, user};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info, instrument};

use crate::error::{Result, StoreError};

/// Field values for a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub img_url: String,
    pub caption: Option<String>,
    pub user_id: i32,
}

/// In-place field changes applied by [`update`]. `None` leaves a field
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub img_url: Option<String>,
    pub caption: Option<String>,
}

/// Create a post. The author is pre-checked so a dangling `user_id` fails
/// with a clear error instead of a raw constraint violation.
#[instrument(skip(db, new_post), fields(user_id = new_post.user_id))]
pub async fn create(db: &DatabaseConnection, new_post: NewPost) -> Result<post::Model> {
    debug!(title = %new_post.title, "Creating post");

    let txn = db.begin().await?;

    if user::Entity::find_by_id(new_post.user_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(StoreError::NotFound("user"));
    }

    let post = post::ActiveModel {
        title: Set(new_post.title),
        img_url: Set(new_post.img_url),
        caption: Set(new_post.caption),
        created_at: Set(Utc::now()),
        user_id: Set(new_post.user_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(post_id = post.id, "Post created");
    Ok(post)
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<post::Model>> {
    Ok(post::Entity::find_by_id(id).one(db).await?)
}

/// All posts, newest first.
pub async fn all(db: &DatabaseConnection) -> Result<Vec<post::Model>> {
    Ok(post::Entity::find()
        .order_by_desc(post::Column::CreatedAt)
        .all(db)
        .await?)
}

/// Apply field changes to a post and persist them.
#[instrument(skip(db, changes))]
pub async fn update(db: &DatabaseConnection, id: i32, changes: PostChanges) -> Result<post::Model> {
    let existing = post::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(StoreError::NotFound("post"))?;

    let mut active: post::ActiveModel = existing.into();
    if let Some(title) = changes.title {
        active.title = Set(title);
    }
    if let Some(img_url) = changes.img_url {
        active.img_url = Set(img_url);
    }
    if let Some(caption) = changes.caption {
        active.caption = Set(Some(caption));
    }

    let updated = active.update(db).await?;
    info!(post_id = updated.id, "Post updated");
    Ok(updated)
}

/// Delete a post; its like rows go with it through the cascade.
#[instrument(skip(db))]
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
    let result = post::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(StoreError::NotFound("post"));
    }

    info!(post_id = id, "Post deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_user, setup_db};
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn create_requires_existing_author() {
        let db = setup_db().await;

        let missing_author = create(
            &db,
            NewPost {
                title: "Hi".to_string(),
                img_url: "img.png".to_string(),
                caption: None,
                user_id: 42,
            },
        )
        .await;
        assert!(matches!(missing_author, Err(StoreError::NotFound("user"))));
        assert_eq!(post::Entity::find().count(&db).await.unwrap(), 0);

        let alice = fixture_user(&db, "alice").await;
        let post = create(
            &db,
            NewPost {
                title: "Hi".to_string(),
                img_url: "img.png".to_string(),
                caption: None,
                user_id: alice.id,
            },
        )
        .await
        .unwrap();
        assert_eq!(post.user_id, alice.id);
        assert!(post.caption.is_none());
    }

    #[tokio::test]
    async fn update_changes_only_supplied_fields() {
        let db = setup_db().await;
        let bob = fixture_user(&db, "bob").await;

        let post = create(
            &db,
            NewPost {
                title: "Draft".to_string(),
                img_url: "draft.png".to_string(),
                caption: Some("first".to_string()),
                user_id: bob.id,
            },
        )
        .await
        .unwrap();

        let updated = update(
            &db,
            post.id,
            PostChanges {
                caption: Some("second".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.title, "Draft");
        assert_eq!(updated.img_url, "draft.png");
        assert_eq!(updated.caption.as_deref(), Some("second"));

        let missing = update(&db, 999, PostChanges::default()).await;
        assert!(matches!(missing, Err(StoreError::NotFound("post"))));
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let db = setup_db().await;
        let carol = fixture_user(&db, "carol").await;
        let post = create(
            &db,
            NewPost {
                title: "Gone soon".to_string(),
                img_url: "x.png".to_string(),
                caption: None,
                user_id: carol.id,
            },
        )
        .await
        .unwrap();

        delete(&db, post.id).await.unwrap();
        assert!(find_by_id(&db, post.id).await.unwrap().is_none());

        let again = delete(&db, post.id).await;
        assert!(matches!(again, Err(StoreError::NotFound("post"))));
    }
}
