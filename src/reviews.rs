use std::{future::Future, time::Duration};

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, sea_query::Expr,
};

use crate::{entities::review, models::Review};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
    #[error("review {review_id} not found for movie {movie_id}")]
    NotFound { review_id: i32, movie_id: i32 },
    #[error("database statement exceeded {0:?}")]
    Timeout(Duration),
}

/// Reviews table access. Every lookup and mutation is scoped by movie id as well as review id.
#[derive(Clone)]
pub struct ReviewStore {
    db: DatabaseConnection,
    timeout: Duration,
}

impl ReviewStore {
    /// `timeout` bounds each statement, including the wait for a pooled connection.
    pub fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    pub async fn list_by_movie(&self, movie_id: i32) -> Result<Vec<Review>, StoreError> {
        let reviews = bounded(
            self.timeout,
            review::Entity::find()
                .filter(review::Column::MovieId.eq(movie_id))
                .order_by_asc(review::Column::Id)
                .all(&self.db),
        )
        .await?;
        Ok(reviews)
    }

    pub async fn get_by_id(&self, review_id: i32, movie_id: i32) -> Result<Review, StoreError> {
        bounded(
            self.timeout,
            review::Entity::find()
                .filter(review::Column::Id.eq(review_id))
                .filter(review::Column::MovieId.eq(movie_id))
                .one(&self.db),
        )
        .await?
        .ok_or(StoreError::NotFound { review_id, movie_id })
    }

    pub async fn add(
        &self,
        name: &str,
        score: f64,
        content: &str,
        movie_id: i32,
    ) -> Result<Review, StoreError> {
        let model = review::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            score: Set(score),
            content: Set(content.to_string()),
            movie_id: Set(movie_id),
        };
        let created = bounded(self.timeout, model.insert(&self.db)).await?;
        tracing::debug!(review_id = created.id, movie_id, "review added");
        Ok(created)
    }

    /// Rewrites score and content only; name and movie stay as created.
    pub async fn update(
        &self,
        review_id: i32,
        movie_id: i32,
        score: f64,
        content: &str,
    ) -> Result<(), StoreError> {
        let res = bounded(
            self.timeout,
            review::Entity::update_many()
                .col_expr(review::Column::Score, Expr::value(score))
                .col_expr(review::Column::Content, Expr::value(content.to_string()))
                .filter(review::Column::Id.eq(review_id))
                .filter(review::Column::MovieId.eq(movie_id))
                .exec(&self.db),
        )
        .await?;

        if res.rows_affected == 0 {
            return Err(StoreError::NotFound { review_id, movie_id });
        }
        tracing::debug!(review_id, movie_id, "review updated");
        Ok(())
    }

    pub async fn delete(&self, review_id: i32, movie_id: i32) -> Result<(), StoreError> {
        let res = bounded(
            self.timeout,
            review::Entity::delete_many()
                .filter(review::Column::Id.eq(review_id))
                .filter(review::Column::MovieId.eq(movie_id))
                .exec(&self.db),
        )
        .await?;

        if res.rows_affected == 0 {
            return Err(StoreError::NotFound { review_id, movie_id });
        }
        tracing::debug!(review_id, movie_id, "review deleted");
        Ok(())
    }
}

async fn bounded<T>(
    limit: Duration,
    statement: impl Future<Output = Result<T, sea_orm::DbErr>>,
) -> Result<T, StoreError> {
    match tokio::time::timeout(limit, statement).await {
        Ok(res) => Ok(res?),
        Err(_) => {
            tracing::warn!(?limit, "database statement timed out");
            Err(StoreError::Timeout(limit))
        },
    }
}
