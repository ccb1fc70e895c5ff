use sqlx::PgPool;

use crate::error::AppResult;
use crate::models::{CursorModel, PhotoModel, VoteModel};

use super::store::{plan_vote, recount, PhotoListKind, PhotoPage, PhotoStore, VoteChange};

const PHOTO_COLUMNS: &str = "p.id, p.user_id, p.description, p.created_at, p.flagged, p.available, \
     p.number_votes, p.number_positive_votes, p.lower_true_popularity, p.upper_true_popularity";

const VOTE_COLUMNS: &str = "id, photo_id, user_id, vote, created_at";

pub struct PgPhotoStore {
    pool: PgPool,
}

impl PgPhotoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Splits a `limit + 1` row fetch into a page and the next position.
fn into_page(mut rows: Vec<PhotoModel>, start: i64, limit: usize) -> PhotoPage {
    let more = rows.len() > limit;
    rows.truncate(limit);
    PhotoPage {
        next_position: more.then_some(start + limit as i64),
        photos: rows,
    }
}

#[tonic::async_trait]
impl PhotoStore for PgPhotoStore {
    async fn get_photo(&self, photo_id: i64) -> AppResult<Option<PhotoModel>> {
        let photo = sqlx::query_as::<_, PhotoModel>(&format!(
            "SELECT {} FROM photos p WHERE p.id = $1",
            PHOTO_COLUMNS
        ))
        .bind(photo_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(photo)
    }

    async fn insert_photo(
        &self,
        description: &str,
        user_id: &str,
        available: bool,
    ) -> AppResult<PhotoModel> {
        let photo = sqlx::query_as::<_, PhotoModel>(&format!(
            r#"
            WITH p AS (
                INSERT INTO photos (user_id, description, available)
                VALUES ($1, $2, $3)
                RETURNING *
            )
            SELECT {} FROM p
            "#,
            PHOTO_COLUMNS
        ))
        .bind(user_id)
        .bind(description)
        .bind(available)
        .fetch_one(&self.pool)
        .await?;
        Ok(photo)
    }

    async fn set_available(&self, photo_id: i64) -> AppResult<bool> {
        let result = sqlx::query("UPDATE photos SET available = TRUE WHERE id = $1")
            .bind(photo_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_description(&self, photo_id: i64, description: &str) -> AppResult<bool> {
        let result = sqlx::query("UPDATE photos SET description = $2 WHERE id = $1")
            .bind(photo_id)
            .bind(description)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_photo_and_children(&self, photo_id: i64) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM votes WHERE photo_id = $1")
            .bind(photo_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM flags WHERE photo_id = $1")
            .bind(photo_id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(photo_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_flag(&self, photo_id: i64, user_id: &str) -> AppResult<Option<usize>> {
        let mut tx = self.pool.begin().await?;
        let photo: Option<(i64,)> = sqlx::query_as("SELECT id FROM photos WHERE id = $1 FOR UPDATE")
            .bind(photo_id)
            .fetch_optional(&mut *tx)
            .await?;
        if photo.is_none() {
            return Ok(None);
        }

        sqlx::query(
            r#"
            INSERT INTO flags (photo_id, user_id) VALUES ($1, $2)
            ON CONFLICT (photo_id, user_id) DO NOTHING
            "#,
        )
        .bind(photo_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
        let (count,): (i64,) = sqlx::query_as("SELECT count(*) FROM flags WHERE photo_id = $1")
            .bind(photo_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Some(count as usize))
    }

    async fn set_flagged(&self, photo_id: i64) -> AppResult<bool> {
        let result = sqlx::query("UPDATE photos SET flagged = TRUE WHERE id = $1")
            .bind(photo_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_vote(&self, photo_id: i64, user_id: &str) -> AppResult<Option<VoteModel>> {
        let vote = sqlx::query_as::<_, VoteModel>(&format!(
            "SELECT {} FROM votes WHERE photo_id = $1 AND user_id = $2",
            VOTE_COLUMNS
        ))
        .bind(photo_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(vote)
    }

    async fn vote_for_photo(
        &self,
        photo_id: i64,
        vote: i32,
        user_id: &str,
        confidence: f64,
    ) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        // The photo row lock serializes votes on the same photo
        let counters: Option<(i64, i64)> = sqlx::query_as(
            "SELECT number_votes, number_positive_votes FROM photos WHERE id = $1 FOR UPDATE",
        )
        .bind(photo_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((number_votes, positives)) = counters else {
            return Ok(false);
        };

        let existing = sqlx::query_as::<_, VoteModel>(&format!(
            "SELECT {} FROM votes WHERE photo_id = $1 AND user_id = $2",
            VOTE_COLUMNS
        ))
        .bind(photo_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let (change, old_vote) = plan_vote(existing.as_ref(), vote);
        match change {
            VoteChange::Unchanged => return Ok(true),
            VoteChange::Insert => {
                sqlx::query("INSERT INTO votes (photo_id, user_id, vote) VALUES ($1, $2, $3)")
                    .bind(photo_id)
                    .bind(user_id)
                    .bind(vote)
                    .execute(&mut *tx)
                    .await?;
            }
            VoteChange::Update(vote_id) => {
                sqlx::query("UPDATE votes SET vote = $2, created_at = now() WHERE id = $1")
                    .bind(vote_id)
                    .bind(vote)
                    .execute(&mut *tx)
                    .await?;
            }
            VoteChange::Delete(vote_id) => {
                sqlx::query("DELETE FROM votes WHERE id = $1")
                    .bind(vote_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        let (number_votes, positives, bounds) =
            recount(number_votes, positives, old_vote, vote, confidence);
        sqlx::query(
            r#"
            UPDATE photos
            SET number_votes = $2, number_positive_votes = $3,
                lower_true_popularity = $4, upper_true_popularity = $5
            WHERE id = $1
            "#,
        )
        .bind(photo_id)
        .bind(number_votes)
        .bind(positives)
        .bind(bounds.0)
        .bind(bounds.1)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::debug!(
            "Vote recorded: photo={}, user={}, old={}, new={}, votes={}, positives={}",
            photo_id,
            user_id,
            old_vote,
            vote,
            number_votes,
            positives
        );
        Ok(true)
    }

    async fn list_photos(
        &self,
        kind: PhotoListKind,
        user_id: &str,
        start: i64,
        limit: usize,
    ) -> AppResult<PhotoPage> {
        let start = start.max(0);
        let fetch = limit as i64 + 1;

        match kind {
            PhotoListKind::Stream => {
                let rows = sqlx::query_as::<_, PhotoModel>(&format!(
                    r#"
                    SELECT {} FROM photos p
                    WHERE p.available
                    ORDER BY p.upper_true_popularity DESC, p.id DESC
                    OFFSET $1 LIMIT $2
                    "#,
                    PHOTO_COLUMNS
                ))
                .bind(start)
                .bind(fetch)
                .fetch_all(&self.pool)
                .await?;
                Ok(into_page(rows, start, limit))
            }
            PhotoListKind::Mine => {
                let rows = sqlx::query_as::<_, PhotoModel>(&format!(
                    r#"
                    SELECT {} FROM photos p
                    WHERE p.available AND p.user_id = $3
                    ORDER BY p.created_at DESC, p.id DESC
                    OFFSET $1 LIMIT $2
                    "#,
                    PHOTO_COLUMNS
                ))
                .bind(start)
                .bind(fetch)
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;
                Ok(into_page(rows, start, limit))
            }
            PhotoListKind::Likes => {
                // Paged over the votes; unavailable photos are dropped from the page
                let votes: Vec<(i64,)> = sqlx::query_as(
                    r#"
                    SELECT photo_id FROM votes
                    WHERE user_id = $3
                    ORDER BY created_at DESC, id DESC
                    OFFSET $1 LIMIT $2
                    "#,
                )
                .bind(start)
                .bind(fetch)
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

                let more = votes.len() > limit;
                let ids: Vec<i64> = votes.into_iter().take(limit).map(|(id,)| id).collect();

                let rows = sqlx::query_as::<_, PhotoModel>(&format!(
                    r#"
                    SELECT {} FROM unnest($1::bigint[]) WITH ORDINALITY AS liked(photo_id, ord)
                    JOIN photos p ON p.id = liked.photo_id
                    WHERE p.available
                    ORDER BY liked.ord
                    "#,
                    PHOTO_COLUMNS
                ))
                .bind(ids.as_slice())
                .fetch_all(&self.pool)
                .await?;

                Ok(PhotoPage {
                    photos: rows,
                    next_position: more.then_some(start + limit as i64),
                })
            }
        }
    }

    async fn insert_cursor(&self, user_id: &str, position: i64) -> AppResult<i64> {
        let (id,): (i64,) =
            sqlx::query_as("INSERT INTO cursors (user_id, position) VALUES ($1, $2) RETURNING id")
                .bind(user_id)
                .bind(position)
                .fetch_one(&self.pool)
                .await?;
        Ok(id)
    }

    async fn take_cursor(&self, cursor_id: i64) -> AppResult<Option<CursorModel>> {
        let cursor = sqlx::query_as::<_, CursorModel>(
            "DELETE FROM cursors WHERE id = $1 RETURNING id, user_id, position, created_at",
        )
        .bind(cursor_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(id: i64) -> PhotoModel {
        PhotoModel::new(id, "u".to_string(), String::new(), true)
    }

    #[test]
    fn test_into_page_with_more_rows() {
        let page = into_page(vec![photo(1), photo(2), photo(3)], 10, 2);
        assert_eq!(page.photos.len(), 2);
        assert_eq!(page.next_position, Some(12));
    }

    #[test]
    fn test_into_page_last_page() {
        let page = into_page(vec![photo(1)], 10, 2);
        assert_eq!(page.photos.len(), 1);
        assert_eq!(page.next_position, None);
    }

    const CONFIDENCE: f64 = 0.95;

    /// Runs against a real database when `DATABASE_URL` is set:
    /// `cargo test -- --ignored`.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    #[ignore]
    async fn test_postgres_store_round_trip() {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping");
            return;
        };
        let store = std::sync::Arc::new(PgPhotoStore::new(
            crate::db::create_pool(&url).await.unwrap(),
        ));
        let run = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let owner = format!("owner-{}", run);

        let photo = store.insert_photo("lake", &owner, false).await.unwrap();
        assert!(!photo.available);
        assert!(store.set_available(photo.id).await.unwrap());
        assert!(store.update_description(photo.id, "lake at dusk").await.unwrap());

        let voters: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                let user = format!("voter-{}-{}", run, i);
                let photo_id = photo.id;
                tokio::spawn(async move {
                    store.vote_for_photo(photo_id, 1, &user, CONFIDENCE).await
                })
            })
            .collect();
        for voter in voters {
            assert!(voter.await.unwrap().unwrap());
        }
        let voter = format!("voter-{}-0", run);
        store.vote_for_photo(photo.id, -1, &voter, CONFIDENCE).await.unwrap();

        let p = store.get_photo(photo.id).await.unwrap().unwrap();
        assert_eq!(p.description, "lake at dusk");
        assert_eq!((p.number_votes, p.number_positive_votes), (20, 19));
        assert_eq!(store.vote_value(photo.id, &voter).await.unwrap(), -1);

        let likes = store.list_photos(PhotoListKind::Likes, &voter, 0, 5).await.unwrap();
        assert_eq!(likes.photos[0].id, photo.id);
        let mine = store.list_photos(PhotoListKind::Mine, &owner, 0, 5).await.unwrap();
        assert_eq!(mine.photos.len(), 1);

        assert_eq!(store.insert_flag(photo.id, "bob").await.unwrap(), Some(1));
        assert_eq!(store.insert_flag(photo.id, "bob").await.unwrap(), Some(1));
        assert_eq!(store.insert_flag(photo.id, "carol").await.unwrap(), Some(2));
        assert!(store.set_flagged(photo.id).await.unwrap());

        let cursor = store.insert_cursor(&owner, 40).await.unwrap();
        assert_eq!(store.take_cursor(cursor).await.unwrap().unwrap().position, 40);
        assert!(store.take_cursor(cursor).await.unwrap().is_none());

        assert!(store.delete_photo_and_children(photo.id).await.unwrap());
        assert!(store.get_photo(photo.id).await.unwrap().is_none());
        assert!(store.find_vote(photo.id, &voter).await.unwrap().is_none());
        assert_eq!(store.insert_flag(photo.id, "bob").await.unwrap(), None);
    }
}
