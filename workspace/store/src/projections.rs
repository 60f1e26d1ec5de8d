use common::{PostView, ProductView, UserProfile};
use model::entities::{like, post, product, user};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use crate::error::{Result, StoreError};

/// Project a user row into its external shape. The password hash stays
/// behind.
pub fn user_profile(user: &user::Model) -> UserProfile {
    UserProfile {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        api_token: user.api_token.clone(),
    }
}

/// Project a post row, resolving the author's username and counting the
/// like rows at read time. Nothing here is cached on the post row, so the
/// view always reflects the latest committed state.
pub async fn post_view(db: &DatabaseConnection, post: &post::Model) -> Result<PostView> {
    let author = user::Entity::find_by_id(post.user_id)
        .one(db)
        .await?
        .ok_or(StoreError::NotFound("user"))?;

    let likes = like::Entity::find()
        .filter(like::Column::PostId.eq(post.id))
        .count(db)
        .await?;

    Ok(PostView {
        id: post.id,
        title: post.title.clone(),
        caption: post.caption.clone(),
        img_url: post.img_url.clone(),
        author: author.username,
        likes,
        created_at: post.created_at,
    })
}

/// Project a product row into its external shape.
pub fn product_view(product: &product::Model) -> ProductView {
    ProductView {
        id: product.id,
        name: product.name.clone(),
        description: product.description.clone(),
        img_url: product.img_url.clone(),
        price: product.price,
    }
}
