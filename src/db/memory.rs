use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::AppResult;
use crate::models::{CursorModel, FlagModel, PhotoModel, VoteModel};

use super::store::{plan_vote, recount, PhotoListKind, PhotoPage, PhotoStore, VoteChange};

#[derive(Default)]
struct Tables {
    next_id: i64,
    photos: BTreeMap<i64, PhotoModel>,
    votes: Vec<VoteModel>,
    flags: Vec<FlagModel>,
    cursors: HashMap<i64, CursorModel>,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-process store used when no database is configured, and by tests.
#[derive(Default)]
pub struct MemoryPhotoStore {
    tables: RwLock<Tables>,
}

impl MemoryPhotoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn page_of(mut matched: Vec<PhotoModel>, start: i64, limit: usize) -> PhotoPage {
    let start = start.max(0) as usize;
    let total = matched.len();
    let photos: Vec<PhotoModel> = if start >= total {
        Vec::new()
    } else {
        matched.drain(start..).take(limit).collect()
    };
    let end = start + photos.len();
    PhotoPage {
        next_position: (end < total).then_some(end as i64),
        photos,
    }
}

#[tonic::async_trait]
impl PhotoStore for MemoryPhotoStore {
    async fn get_photo(&self, photo_id: i64) -> AppResult<Option<PhotoModel>> {
        Ok(self.tables.read().await.photos.get(&photo_id).cloned())
    }

    async fn insert_photo(
        &self,
        description: &str,
        user_id: &str,
        available: bool,
    ) -> AppResult<PhotoModel> {
        let mut tables = self.tables.write().await;
        let id = tables.allocate_id();
        let photo = PhotoModel::new(id, user_id.to_string(), description.to_string(), available);
        tables.photos.insert(id, photo.clone());
        Ok(photo)
    }

    async fn set_available(&self, photo_id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(match tables.photos.get_mut(&photo_id) {
            Some(photo) => {
                photo.available = true;
                true
            }
            None => false,
        })
    }

    async fn update_description(&self, photo_id: i64, description: &str) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(match tables.photos.get_mut(&photo_id) {
            Some(photo) => {
                photo.description = description.to_string();
                true
            }
            None => false,
        })
    }

    async fn delete_photo_and_children(&self, photo_id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        tables.votes.retain(|v| v.photo_id != photo_id);
        tables.flags.retain(|f| f.photo_id != photo_id);
        Ok(tables.photos.remove(&photo_id).is_some())
    }

    async fn insert_flag(&self, photo_id: i64, user_id: &str) -> AppResult<Option<usize>> {
        let mut tables = self.tables.write().await;
        if !tables.photos.contains_key(&photo_id) {
            return Ok(None);
        }
        let already = tables
            .flags
            .iter()
            .any(|f| f.photo_id == photo_id && f.user_id == user_id);
        if !already {
            let id = tables.allocate_id();
            tables.flags.push(FlagModel {
                id,
                photo_id,
                user_id: user_id.to_string(),
                created_at: Utc::now(),
            });
        }
        Ok(Some(
            tables.flags.iter().filter(|f| f.photo_id == photo_id).count(),
        ))
    }

    async fn set_flagged(&self, photo_id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(match tables.photos.get_mut(&photo_id) {
            Some(photo) => {
                photo.flagged = true;
                true
            }
            None => false,
        })
    }

    async fn find_vote(&self, photo_id: i64, user_id: &str) -> AppResult<Option<VoteModel>> {
        let tables = self.tables.read().await;
        Ok(tables
            .votes
            .iter()
            .find(|v| v.photo_id == photo_id && v.user_id == user_id)
            .cloned())
    }

    async fn vote_for_photo(
        &self,
        photo_id: i64,
        vote: i32,
        user_id: &str,
        confidence: f64,
    ) -> AppResult<bool> {
        // One write lock covers the vote row and the counters
        let mut tables = self.tables.write().await;
        let Some(photo) = tables.photos.get(&photo_id) else {
            return Ok(false);
        };
        let (number_votes, positives) = (photo.number_votes, photo.number_positive_votes);

        let existing = tables
            .votes
            .iter()
            .find(|v| v.photo_id == photo_id && v.user_id == user_id);
        let (change, old_vote) = plan_vote(existing, vote);
        match change {
            VoteChange::Unchanged => return Ok(true),
            VoteChange::Insert => {
                let id = tables.allocate_id();
                tables.votes.push(VoteModel {
                    id,
                    photo_id,
                    user_id: user_id.to_string(),
                    vote,
                    created_at: Utc::now(),
                });
            }
            VoteChange::Update(vote_id) => {
                if let Some(existing) = tables.votes.iter_mut().find(|v| v.id == vote_id) {
                    existing.vote = vote;
                    existing.created_at = Utc::now();
                }
            }
            VoteChange::Delete(vote_id) => tables.votes.retain(|v| v.id != vote_id),
        }

        let (number_votes, positives, bounds) =
            recount(number_votes, positives, old_vote, vote, confidence);
        if let Some(photo) = tables.photos.get_mut(&photo_id) {
            photo.number_votes = number_votes;
            photo.number_positive_votes = positives;
            photo.lower_true_popularity = bounds.0;
            photo.upper_true_popularity = bounds.1;
        }

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
        let tables = self.tables.read().await;
        match kind {
            PhotoListKind::Stream => {
                let mut matched: Vec<PhotoModel> =
                    tables.photos.values().filter(|p| p.available).cloned().collect();
                matched.sort_by(|a, b| {
                    b.upper_true_popularity
                        .total_cmp(&a.upper_true_popularity)
                        .then(b.id.cmp(&a.id))
                });
                Ok(page_of(matched, start, limit))
            }
            PhotoListKind::Mine => {
                let mut matched: Vec<PhotoModel> = tables
                    .photos
                    .values()
                    .filter(|p| p.available && p.user_id == user_id)
                    .cloned()
                    .collect();
                matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
                Ok(page_of(matched, start, limit))
            }
            PhotoListKind::Likes => {
                // Paged over the votes; unavailable photos are dropped from the page
                let mut votes: Vec<&VoteModel> =
                    tables.votes.iter().filter(|v| v.user_id == user_id).collect();
                votes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

                let start = start.max(0) as usize;
                let end = (start + limit).min(votes.len());
                let photos = votes
                    .get(start..end)
                    .unwrap_or_default()
                    .iter()
                    .filter_map(|v| tables.photos.get(&v.photo_id))
                    .filter(|p| p.available)
                    .cloned()
                    .collect();
                Ok(PhotoPage {
                    photos,
                    next_position: (end < votes.len()).then_some(end as i64),
                })
            }
        }
    }

    async fn insert_cursor(&self, user_id: &str, position: i64) -> AppResult<i64> {
        let mut tables = self.tables.write().await;
        let id = tables.allocate_id();
        tables.cursors.insert(
            id,
            CursorModel {
                id,
                user_id: user_id.to_string(),
                position,
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    async fn take_cursor(&self, cursor_id: i64) -> AppResult<Option<CursorModel>> {
        Ok(self.tables.write().await.cursors.remove(&cursor_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const CONFIDENCE: f64 = 0.95;

    #[tokio::test]
    async fn test_vote_lifecycle_updates_counters() {
        let store = MemoryPhotoStore::new();
        let photo = store.insert_photo("lake", "owner", true).await.unwrap();

        assert!(store.vote_for_photo(photo.id, 1, "owner", CONFIDENCE).await.unwrap());
        assert!(store.vote_for_photo(photo.id, -1, "guest", CONFIDENCE).await.unwrap());
        let p = store.get_photo(photo.id).await.unwrap().unwrap();
        assert_eq!((p.number_votes, p.number_positive_votes), (2, 1));
        assert!(p.upper_true_popularity > p.lower_true_popularity);

        // Flip, then withdraw
        store.vote_for_photo(photo.id, 1, "guest", CONFIDENCE).await.unwrap();
        let p = store.get_photo(photo.id).await.unwrap().unwrap();
        assert_eq!((p.number_votes, p.number_positive_votes), (2, 2));

        store.vote_for_photo(photo.id, 0, "guest", CONFIDENCE).await.unwrap();
        let p = store.get_photo(photo.id).await.unwrap().unwrap();
        assert_eq!((p.number_votes, p.number_positive_votes), (1, 1));
        assert_eq!(store.vote_value(photo.id, "guest").await.unwrap(), 0);
        assert_eq!(store.vote_value(photo.id, "owner").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_neutral_vote_without_previous_vote_is_noop() {
        let store = MemoryPhotoStore::new();
        let photo = store.insert_photo("lake", "owner", true).await.unwrap();
        assert!(store.vote_for_photo(photo.id, 0, "guest", CONFIDENCE).await.unwrap());
        let p = store.get_photo(photo.id).await.unwrap().unwrap();
        assert_eq!(p.number_votes, 0);
    }

    #[tokio::test]
    async fn test_vote_on_missing_photo() {
        let store = MemoryPhotoStore::new();
        assert!(!store.vote_for_photo(999, 1, "guest", CONFIDENCE).await.unwrap());
    }

    #[tokio::test]
    async fn test_stream_pages_by_popularity() {
        let store = MemoryPhotoStore::new();
        let low = store.insert_photo("low", "a", true).await.unwrap();
        let high = store.insert_photo("high", "b", true).await.unwrap();
        store.insert_photo("hidden", "c", false).await.unwrap();
        store.vote_for_photo(low.id, -1, "guest", CONFIDENCE).await.unwrap();
        store.vote_for_photo(high.id, 1, "guest", CONFIDENCE).await.unwrap();

        let first = store.list_photos(PhotoListKind::Stream, "a", 0, 1).await.unwrap();
        assert_eq!(first.photos.len(), 1);
        assert_eq!(first.photos[0].id, high.id);
        assert_eq!(first.next_position, Some(1));

        let second = store.list_photos(PhotoListKind::Stream, "a", 1, 1).await.unwrap();
        assert_eq!(second.photos[0].id, low.id);
        assert_eq!(second.next_position, None);
    }

    #[tokio::test]
    async fn test_delete_removes_children() {
        let store = MemoryPhotoStore::new();
        let photo = store.insert_photo("lake", "owner", true).await.unwrap();
        store.vote_for_photo(photo.id, 1, "guest", CONFIDENCE).await.unwrap();
        store.insert_flag(photo.id, "guest").await.unwrap();

        assert!(store.delete_photo_and_children(photo.id).await.unwrap());
        assert!(store.get_photo(photo.id).await.unwrap().is_none());
        assert!(store.tables.read().await.flags.is_empty());
        assert!(store.find_vote(photo.id, "guest").await.unwrap().is_none());
        assert_eq!(store.insert_flag(photo.id, "guest").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_flag_count_is_per_user() {
        let store = MemoryPhotoStore::new();
        let photo = store.insert_photo("lake", "owner", true).await.unwrap();
        assert_eq!(store.insert_flag(photo.id, "bob").await.unwrap(), Some(1));
        assert_eq!(store.insert_flag(photo.id, "bob").await.unwrap(), Some(1));
        assert_eq!(store.insert_flag(photo.id, "carol").await.unwrap(), Some(2));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_votes_are_all_counted() {
        let store = Arc::new(MemoryPhotoStore::new());
        let photo_id = store.insert_photo("lake", "owner", true).await.unwrap().id;

        let voters: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let user = format!("voter-{}", i);
                    store.vote_for_photo(photo_id, 1, &user, CONFIDENCE).await
                })
            })
            .collect();
        for voter in voters {
            assert!(voter.await.unwrap().unwrap());
        }

        let p = store.get_photo(photo_id).await.unwrap().unwrap();
        assert_eq!((p.number_votes, p.number_positive_votes), (20, 20));
        assert_eq!(
            (p.lower_true_popularity, p.upper_true_popularity),
            crate::ranking::wilson_interval(20, 20, CONFIDENCE)
        );
    }

    #[tokio::test]
    async fn test_cursor_is_single_use() {
        let store = MemoryPhotoStore::new();
        let id = store.insert_cursor("owner", 50).await.unwrap();
        assert_ne!(id, 0);
        assert_eq!(store.take_cursor(id).await.unwrap().unwrap().position, 50);
        assert!(store.take_cursor(id).await.unwrap().is_none());
    }
}
