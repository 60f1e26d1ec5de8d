use model::entities::{follow, like, post, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QuerySelect, RelationTrait, Set, TransactionTrait,
};
use tracing::{debug, info, instrument};

use crate::error::{Result, StoreError};

/// Add a follow edge from `follower_id` to `followed_id`.
///
/// Following someone twice is a no-op; the composite key would reject the
/// duplicate row anyway. Following yourself is rejected outright.
#[instrument(skip(db))]
pub async fn follow(db: &DatabaseConnection, follower_id: i32, followed_id: i32) -> Result<()> {
    if follower_id == followed_id {
        return Err(StoreError::Validation(
            "A user cannot follow themselves".to_string(),
        ));
    }

    let txn = db.begin().await?;

    for id in [follower_id, followed_id] {
        if user::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(StoreError::NotFound("user"));
        }
    }

    let existing = follow::Entity::find_by_id((follower_id, followed_id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        debug!("Follow edge already present");
        return Ok(());
    }

    follow::ActiveModel {
        follower_id: Set(follower_id),
        followed_id: Set(followed_id),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(follower_id, followed_id, "Follow added");
    Ok(())
}

/// Remove a follow edge; removing an absent edge is a no-op.
#[instrument(skip(db))]
pub async fn unfollow(db: &DatabaseConnection, follower_id: i32, followed_id: i32) -> Result<()> {
    follow::Entity::delete_many()
        .filter(follow::Column::FollowerId.eq(follower_id))
        .filter(follow::Column::FollowedId.eq(followed_id))
        .exec(db)
        .await?;

    Ok(())
}

/// Users that `user_id` follows.
pub async fn following(db: &DatabaseConnection, user_id: i32) -> Result<Vec<user::Model>> {
    Ok(user::Entity::find()
        .join(JoinType::InnerJoin, follow::Relation::Followed.def().rev())
        .filter(follow::Column::FollowerId.eq(user_id))
        .all(db)
        .await?)
}

/// Users that follow `user_id`; the other directional view over the same
/// table.
pub async fn followers(db: &DatabaseConnection, user_id: i32) -> Result<Vec<user::Model>> {
    Ok(user::Entity::find()
        .join(JoinType::InnerJoin, follow::Relation::Follower.def().rev())
        .filter(follow::Column::FollowedId.eq(user_id))
        .all(db)
        .await?)
}

/// Record that a user likes a post. At most one like per (user, post):
/// liking twice is a no-op, and the composite key is the hard guard.
#[instrument(skip(db))]
pub async fn like(db: &DatabaseConnection, user_id: i32, post_id: i32) -> Result<()> {
    let txn = db.begin().await?;

    if user::Entity::find_by_id(user_id).one(&txn).await?.is_none() {
        return Err(StoreError::NotFound("user"));
    }
    if post::Entity::find_by_id(post_id).one(&txn).await?.is_none() {
        return Err(StoreError::NotFound("post"));
    }

    let existing = like::Entity::find_by_id((user_id, post_id)).one(&txn).await?;
    if existing.is_some() {
        debug!("Like already present");
        return Ok(());
    }

    like::ActiveModel {
        user_id: Set(user_id),
        post_id: Set(post_id),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(user_id, post_id, "Like added");
    Ok(())
}

/// Delete the like row for (user, post); a missing row is a no-op.
#[instrument(skip(db))]
pub async fn unlike(db: &DatabaseConnection, user_id: i32, post_id: i32) -> Result<()> {
    like::Entity::delete_many()
        .filter(like::Column::UserId.eq(user_id))
        .filter(like::Column::PostId.eq(post_id))
        .exec(db)
        .await?;

    Ok(())
}

/// Users holding a like on the given post.
pub async fn likers(db: &DatabaseConnection, post_id: i32) -> Result<Vec<user::Model>> {
    Ok(user::Entity::find()
        .join(JoinType::InnerJoin, like::Relation::User.def().rev())
        .filter(like::Column::PostId.eq(post_id))
        .all(db)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_post, fixture_user, setup_db};
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn follow_is_directional_and_idempotent() {
        let db = setup_db().await;
        let alice = fixture_user(&db, "alice").await;
        let bob = fixture_user(&db, "bob").await;

        follow(&db, alice.id, bob.id).await.unwrap();
        // Idempotent: a second call adds nothing
        follow(&db, alice.id, bob.id).await.unwrap();
        assert_eq!(follow::Entity::find().count(&db).await.unwrap(), 1);

        let alice_following = following(&db, alice.id).await.unwrap();
        assert_eq!(alice_following.len(), 1);
        assert_eq!(alice_following[0].id, bob.id);

        let bob_followers = followers(&db, bob.id).await.unwrap();
        assert_eq!(bob_followers.len(), 1);
        assert_eq!(bob_followers[0].id, alice.id);

        // Asymmetric: bob does not follow alice
        assert!(following(&db, bob.id).await.unwrap().is_empty());
        assert!(followers(&db, alice.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unfollow_removes_both_views() {
        let db = setup_db().await;
        let alice = fixture_user(&db, "alice").await;
        let bob = fixture_user(&db, "bob").await;

        follow(&db, alice.id, bob.id).await.unwrap();
        unfollow(&db, alice.id, bob.id).await.unwrap();

        assert!(following(&db, alice.id).await.unwrap().is_empty());
        assert!(followers(&db, bob.id).await.unwrap().is_empty());

        // Removing an absent edge is a no-op
        unfollow(&db, alice.id, bob.id).await.unwrap();
    }

    #[tokio::test]
    async fn self_follow_is_rejected() {
        let db = setup_db().await;
        let alice = fixture_user(&db, "alice").await;

        let result = follow(&db, alice.id, alice.id).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert_eq!(follow::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn follow_requires_existing_users() {
        let db = setup_db().await;
        let alice = fixture_user(&db, "alice").await;

        let result = follow(&db, alice.id, 999).await;
        assert!(matches!(result, Err(StoreError::NotFound("user"))));
    }

    #[tokio::test]
    async fn like_is_a_set_not_a_multiset() {
        let db = setup_db().await;
        let alice = fixture_user(&db, "alice").await;
        let bob = fixture_user(&db, "bob").await;
        let post = fixture_post(&db, alice.id, "Hi").await;

        like(&db, bob.id, post.id).await.unwrap();
        like(&db, bob.id, post.id).await.unwrap();
        assert_eq!(like::Entity::find().count(&db).await.unwrap(), 1);

        let who = likers(&db, post.id).await.unwrap();
        assert_eq!(who.len(), 1);
        assert_eq!(who[0].id, bob.id);
    }

    #[tokio::test]
    async fn unlike_without_like_is_a_noop() {
        let db = setup_db().await;
        let alice = fixture_user(&db, "alice").await;
        let bob = fixture_user(&db, "bob").await;
        let post = fixture_post(&db, alice.id, "Hi").await;

        unlike(&db, bob.id, post.id).await.unwrap();
        assert_eq!(like::Entity::find().count(&db).await.unwrap(), 0);

        like(&db, bob.id, post.id).await.unwrap();
        unlike(&db, bob.id, post.id).await.unwrap();
        assert_eq!(like::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn like_requires_existing_post() {
        let db = setup_db().await;
        let alice = fixture_user(&db, "alice").await;

        let result = like(&db, alice.id, 999).await;
        assert!(matches!(result, Err(StoreError::NotFound("post"))));
    }
}
