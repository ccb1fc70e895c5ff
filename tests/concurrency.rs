use std::sync::Arc;
use std::time::Duration;

use abelana::db::{MemoryPhotoStore, PhotoListKind, PhotoPage, PhotoStore};
use abelana::error::AppResult;
use abelana::middleware::AuthenticatedUser;
use abelana::models::{CursorModel, PhotoModel, VoteModel};
use abelana::proto::abelana_server::Abelana;
use abelana::proto::vote_request::VoteType;
use abelana::proto::{FlagRequest, VoteRequest};
use abelana::services::{AbelanaServiceImpl, ServiceSettings};
use abelana::token::TokenIssuer;
use tonic::Request;

/// Memory store that yields for a millisecond before every operation, so
/// concurrent requests interleave the way they do against a database.
struct SlowStore {
    inner: MemoryPhotoStore,
}

impl SlowStore {
    async fn pause(&self) {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
}

#[tonic::async_trait]
impl PhotoStore for SlowStore {
    async fn get_photo(&self, photo_id: i64) -> AppResult<Option<PhotoModel>> {
        self.pause().await;
        self.inner.get_photo(photo_id).await
    }

    async fn insert_photo(
        &self,
        description: &str,
        user_id: &str,
        available: bool,
    ) -> AppResult<PhotoModel> {
        self.pause().await;
        self.inner.insert_photo(description, user_id, available).await
    }

    async fn set_available(&self, photo_id: i64) -> AppResult<bool> {
        self.pause().await;
        self.inner.set_available(photo_id).await
    }

    async fn update_description(&self, photo_id: i64, description: &str) -> AppResult<bool> {
        self.pause().await;
        self.inner.update_description(photo_id, description).await
    }

    async fn delete_photo_and_children(&self, photo_id: i64) -> AppResult<bool> {
        self.pause().await;
        self.inner.delete_photo_and_children(photo_id).await
    }

    async fn insert_flag(&self, photo_id: i64, user_id: &str) -> AppResult<Option<usize>> {
        self.pause().await;
        self.inner.insert_flag(photo_id, user_id).await
    }

    async fn set_flagged(&self, photo_id: i64) -> AppResult<bool> {
        self.pause().await;
        self.inner.set_flagged(photo_id).await
    }

    async fn find_vote(&self, photo_id: i64, user_id: &str) -> AppResult<Option<VoteModel>> {
        self.pause().await;
        self.inner.find_vote(photo_id, user_id).await
    }

    async fn vote_for_photo(
        &self,
        photo_id: i64,
        vote: i32,
        user_id: &str,
        confidence: f64,
    ) -> AppResult<bool> {
        self.pause().await;
        self.inner
            .vote_for_photo(photo_id, vote, user_id, confidence)
            .await
    }

    async fn list_photos(
        &self,
        kind: PhotoListKind,
        user_id: &str,
        start: i64,
        limit: usize,
    ) -> AppResult<PhotoPage> {
        self.pause().await;
        self.inner.list_photos(kind, user_id, start, limit).await
    }

    async fn insert_cursor(&self, user_id: &str, position: i64) -> AppResult<i64> {
        self.pause().await;
        self.inner.insert_cursor(user_id, position).await
    }

    async fn take_cursor(&self, cursor_id: i64) -> AppResult<Option<CursorModel>> {
        self.pause().await;
        self.inner.take_cursor(cursor_id).await
    }
}

fn slow_service() -> (Arc<AbelanaServiceImpl>, Arc<SlowStore>) {
    let store = Arc::new(SlowStore {
        inner: MemoryPhotoStore::new(),
    });
    let service = AbelanaServiceImpl::new(
        store.clone(),
        TokenIssuer::new("secret", "abelanav2.examples.com", 3600),
        ServiceSettings {
            photos_per_page: 10,
            confidence_level: 0.95,
            images_base_url: "https://img.example/".to_string(),
            auto_publish: true,
        },
    );
    (Arc::new(service), store)
}

fn as_user<T>(user_id: &str, message: T) -> Request<T> {
    let mut request = Request::new(message);
    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user_id.to_string(),
    });
    request
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_votes_are_all_counted() {
    let (service, store) = slow_service();
    let photo_id = store.insert_photo("lake", "owner", true).await.unwrap().id;

    let voters: Vec<_> = (0..20)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                let request = VoteRequest {
                    photo_id,
                    vote: VoteType::ThumbsUp as i32,
                };
                service
                    .rate_photo(as_user(&format!("voter-{}", i), request))
                    .await
            })
        })
        .collect();
    for voter in voters {
        let reply = voter.await.unwrap().unwrap().into_inner();
        assert!(reply.error.is_none(), "vote failed: {:?}", reply.error);
    }

    let photo = store.get_photo(photo_id).await.unwrap().unwrap();
    assert_eq!(photo.number_votes, 20);
    assert_eq!(photo.number_positive_votes, 20);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_vote_changes_by_one_user_stay_consistent() {
    let (service, store) = slow_service();
    let photo_id = store.insert_photo("lake", "owner", true).await.unwrap().id;

    let changes: Vec<_> = [VoteType::ThumbsUp, VoteType::ThumbsDown, VoteType::Neutral]
        .into_iter()
        .cycle()
        .take(12)
        .map(|vote| {
            let service = service.clone();
            tokio::spawn(async move {
                let request = VoteRequest {
                    photo_id,
                    vote: vote as i32,
                };
                service.rate_photo(as_user("guest", request)).await
            })
        })
        .collect();
    for change in changes {
        change.await.unwrap().unwrap();
    }

    // Counters always match whatever vote won the last write
    let photo = store.get_photo(photo_id).await.unwrap().unwrap();
    match store.vote_value(photo_id, "guest").await.unwrap() {
        1 => assert_eq!((photo.number_votes, photo.number_positive_votes), (1, 1)),
        -1 => assert_eq!((photo.number_votes, photo.number_positive_votes), (1, 0)),
        _ => assert_eq!((photo.number_votes, photo.number_positive_votes), (0, 0)),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_flags_reach_threshold() {
    let (service, store) = slow_service();
    let photo_id = store.insert_photo("lake", "owner", true).await.unwrap().id;

    let flaggers: Vec<_> = ["bob", "carol"]
        .into_iter()
        .map(|user| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .flag_photo(as_user(user, FlagRequest { photo_id }))
                    .await
            })
        })
        .collect();
    for flagger in flaggers {
        let reply = flagger.await.unwrap().unwrap().into_inner();
        assert!(reply.error.is_none());
    }

    assert!(store.get_photo(photo_id).await.unwrap().unwrap().flagged);
}
