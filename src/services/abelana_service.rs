use std::sync::Arc;

use rand::seq::SliceRandom;
use tonic::{Request, Response, Status};

use crate::config::Config;
use crate::db::{PhotoListKind, PhotoStore};
use crate::error::{AppError, AppResult};
use crate::google_auth::IdentityVerifier;
use crate::middleware::AuthenticatedUser;
use crate::models::PhotoModel;
use crate::proto::abelana_server::Abelana;
use crate::proto::vote_request::VoteType;
use crate::proto::{
    DeletePhotoRequest, EditPhotoRequest, FlagRequest, NewPhotoRequest, Photo, PhotoListRequest,
    PhotoListResponse, SignInRequest, SignInResponse, StatusResponse, UploadPhotoResponse,
    VoteRequest,
};
use crate::storage::{StorageBackend, UPLOAD_CONTENT_TYPE};
use crate::token::TokenIssuer;

/// Number of distinct flags after which a photo is marked flagged.
pub const FLAG_THRESHOLD: usize = 2;

/// Tunables of the photo service.
#[derive(Clone, Debug)]
pub struct ServiceSettings {
    pub photos_per_page: usize,
    pub confidence_level: f64,
    pub images_base_url: String,
    /// Publish photos on upload instead of waiting for the resized image.
    pub auto_publish: bool,
}

impl ServiceSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            photos_per_page: config.photos_per_page,
            confidence_level: config.confidence_level,
            images_base_url: config.images_base_url(),
            auto_publish: config.auto_publish,
        }
    }
}

pub struct AbelanaServiceImpl {
    store: Arc<dyn PhotoStore>,
    tokens: TokenIssuer,
    settings: ServiceSettings,
    storage: Option<Arc<dyn StorageBackend>>,
    identity: Option<Arc<dyn IdentityVerifier>>,
}

fn current_user<T>(request: &Request<T>) -> AppResult<String> {
    request
        .extensions()
        .get::<AuthenticatedUser>()
        .map(|user| user.user_id.clone())
        .ok_or(AppError::Unauthenticated)
}

fn vote_value(vote: VoteType) -> i32 {
    match vote {
        VoteType::ThumbsUp => 1,
        VoteType::ThumbsDown => -1,
        VoteType::Neutral => 0,
    }
}

impl AbelanaServiceImpl {
    pub fn new(store: Arc<dyn PhotoStore>, tokens: TokenIssuer, settings: ServiceSettings) -> Self {
        Self {
            store,
            tokens,
            settings,
            storage: None,
            identity: None,
        }
    }

    pub fn with_storage(mut self, storage: Arc<dyn StorageBackend>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_identity_verifier(mut self, identity: Arc<dyn IdentityVerifier>) -> Self {
        self.identity = Some(identity);
        self
    }

    fn model_to_proto(&self, model: &PhotoModel, rating: i64) -> Photo {
        Photo {
            photo_id: model.id,
            user_id: model.user_id.clone(),
            date: model.created_at.timestamp_millis(),
            description: model.description.clone(),
            rating,
            url: format!("{}{}", self.settings.images_base_url, model.image_object_name()),
        }
    }

    /// Loads a photo that an edit, delete or flag targets. A missing photo
    /// is reported as a store failure.
    async fn existing_photo(&self, photo_id: i64) -> AppResult<PhotoModel> {
        self.store
            .get_photo(photo_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Photo {} not found in database", photo_id)))
    }

    async fn owned_photo(&self, photo_id: i64, user_id: &str) -> AppResult<PhotoModel> {
        let photo = self.existing_photo(photo_id).await?;
        if photo.user_id != user_id {
            return Err(AppError::NotOwner);
        }
        Ok(photo)
    }

    async fn sign_in_inner(&self, req: SignInRequest) -> AppResult<String> {
        let identity = self
            .identity
            .as_ref()
            .ok_or_else(|| AppError::SignIn("Sign-in is not configured".to_string()))?;
        let claims = identity.verify(&req.gitkit_token).await?;
        tracing::info!("User signed in: user_id={}", claims.user_id);
        self.tokens
            .issue(&claims.user_id)
            .map_err(|e| AppError::SignIn(e.to_string()))
    }

    async fn list_photos(
        &self,
        user_id: &str,
        page_number: i64,
        kind: PhotoListKind,
    ) -> AppResult<PhotoListResponse> {
        let mut reply = PhotoListResponse::default();

        let start = if page_number == 0 {
            0
        } else {
            match self.store.take_cursor(page_number).await? {
                Some(cursor) if cursor.user_id == user_id => cursor.position,
                _ => {
                    // Invalid cursor: report it but still return the first page
                    reply.error = Some(AppError::InvalidPage.to_proto());
                    0
                }
            }
        };

        let mut page = self
            .store
            .list_photos(kind, user_id, start, self.settings.photos_per_page)
            .await?;

        if kind == PhotoListKind::Stream {
            page.photos.shuffle(&mut rand::thread_rng());
        }

        for model in &page.photos {
            let rating = match kind {
                PhotoListKind::Stream => self
                    .store
                    .vote_value(model.id, user_id)
                    .await
                    .unwrap_or_else(|e| {
                        tracing::warn!("Failed to read vote: photo={}, error={}", model.id, e);
                        0
                    }) as i64,
                PhotoListKind::Mine | PhotoListKind::Likes => 1,
            };
            reply.photo.push(self.model_to_proto(model, rating));
        }

        if let Some(position) = page.next_position {
            if !page.photos.is_empty() {
                reply.next_page = self.store.insert_cursor(user_id, position).await?;
            }
        }

        tracing::debug!(
            "Listed photos: kind={:?}, user={}, start={}, count={}, next_page={}",
            kind,
            user_id,
            start,
            reply.photo.len(),
            reply.next_page
        );
        Ok(reply)
    }

    async fn photo_list_reply(
        &self,
        request: Request<PhotoListRequest>,
        kind: PhotoListKind,
    ) -> PhotoListResponse {
        let result = match current_user(&request) {
            Ok(user_id) => {
                self.list_photos(&user_id, request.into_inner().page_number, kind)
                    .await
            }
            Err(e) => Err(e),
        };
        result.unwrap_or_else(|e| {
            tracing::warn!("Photo list failed: kind={:?}, error={}", kind, e);
            PhotoListResponse {
                error: Some(e.to_proto()),
                ..Default::default()
            }
        })
    }

    async fn flag_photo_inner(&self, user_id: &str, photo_id: i64) -> AppResult<()> {
        // Count includes this user's flag whether or not it was already there
        let count = self
            .store
            .insert_flag(photo_id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("Photo {} not found in database", photo_id))
            })?;
        if count >= FLAG_THRESHOLD {
            match self.store.set_flagged(photo_id).await {
                Ok(true) => tracing::info!("Photo flagged: photo={}", photo_id),
                Ok(false) => tracing::warn!("Photo vanished while flagging: photo={}", photo_id),
                Err(e) => tracing::warn!(
                    "Impossible to flag photo={} with count_flags={}: {}",
                    photo_id,
                    count,
                    e
                ),
            }
        }
        Ok(())
    }

    async fn upload_photo_inner(
        &self,
        user_id: &str,
        req: NewPhotoRequest,
    ) -> AppResult<UploadPhotoResponse> {
        let photo = self
            .store
            .insert_photo(&req.description, user_id, self.settings.auto_publish)
            .await?;

        // Owners always vote for their own photo, which seeds the ranking bounds
        self.store
            .vote_for_photo(photo.id, 1, user_id, self.settings.confidence_level)
            .await?;

        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| AppError::Storage("no upload bucket configured".to_string()))?;
        let upload_url = storage
            .signed_upload_url(&photo.upload_object_name(), UPLOAD_CONTENT_TYPE)
            .await?;

        tracing::info!("Photo created: photo={}, user={}", photo.id, user_id);
        Ok(UploadPhotoResponse {
            error: None,
            photo_id: photo.id,
            user_id: user_id.to_string(),
            upload_url,
        })
    }

    async fn edit_photo_inner(&self, user_id: &str, req: EditPhotoRequest) -> AppResult<()> {
        self.owned_photo(req.photo_id, user_id).await?;
        if !self
            .store
            .update_description(req.photo_id, &req.description)
            .await?
        {
            return Err(AppError::Internal("description update matched no photo".to_string()));
        }
        Ok(())
    }

    async fn delete_photo_inner(&self, user_id: &str, photo_id: i64) -> AppResult<()> {
        let photo = self.owned_photo(photo_id, user_id).await?;
        if !self.store.delete_photo_and_children(photo_id).await? {
            return Err(AppError::Internal("delete matched no photo".to_string()));
        }

        if let Some(storage) = &self.storage {
            if let Err(e) = storage.delete(&photo.upload_object_name()).await {
                tracing::warn!("Failed to delete upload: photo={}, error={}", photo_id, e);
            }
        }
        tracing::info!("Photo deleted: photo={}, user={}", photo_id, user_id);
        Ok(())
    }

    async fn rate_photo_inner(&self, user_id: &str, req: VoteRequest) -> AppResult<()> {
        let vote = vote_value(req.vote());
        let found = self
            .store
            .vote_for_photo(req.photo_id, vote, user_id, self.settings.confidence_level)
            .await?;
        if !found {
            return Err(AppError::NotFound("Photo not found".to_string()));
        }
        Ok(())
    }
}

/// Turns the outcome of a status-only operation into its reply.
fn status_reply(operation: &str, result: AppResult<()>) -> StatusResponse {
    match result {
        Ok(()) => StatusResponse { error: None },
        Err(e) => {
            tracing::warn!("{} failed: {}", operation, e);
            StatusResponse {
                error: Some(e.to_proto()),
            }
        }
    }
}

#[tonic::async_trait]
impl Abelana for AbelanaServiceImpl {
    async fn sign_in(
        &self,
        request: Request<SignInRequest>,
    ) -> Result<Response<SignInResponse>, Status> {
        let reply = match self.sign_in_inner(request.into_inner()).await {
            Ok(user_token) => SignInResponse {
                error: None,
                user_token,
            },
            Err(e) => {
                tracing::warn!("Authentication error with identity provider: {}", e);
                SignInResponse {
                    error: Some(e.to_proto()),
                    user_token: String::new(),
                }
            }
        };
        Ok(Response::new(reply))
    }

    async fn photo_stream(
        &self,
        request: Request<PhotoListRequest>,
    ) -> Result<Response<PhotoListResponse>, Status> {
        Ok(Response::new(
            self.photo_list_reply(request, PhotoListKind::Stream).await,
        ))
    }

    async fn flag_photo(
        &self,
        request: Request<FlagRequest>,
    ) -> Result<Response<StatusResponse>, Status> {
        let result = match current_user(&request) {
            Ok(user_id) => {
                self.flag_photo_inner(&user_id, request.into_inner().photo_id)
                    .await
            }
            Err(e) => Err(e),
        };
        Ok(Response::new(status_reply("FlagPhoto", result)))
    }

    async fn list_my_photos(
        &self,
        request: Request<PhotoListRequest>,
    ) -> Result<Response<PhotoListResponse>, Status> {
        Ok(Response::new(
            self.photo_list_reply(request, PhotoListKind::Mine).await,
        ))
    }

    async fn upload_photo(
        &self,
        request: Request<NewPhotoRequest>,
    ) -> Result<Response<UploadPhotoResponse>, Status> {
        let result = match current_user(&request) {
            Ok(user_id) => {
                self.upload_photo_inner(&user_id, request.into_inner())
                    .await
            }
            Err(e) => Err(e),
        };
        let reply = result.unwrap_or_else(|e| {
            tracing::warn!("UploadPhoto failed: {}", e);
            UploadPhotoResponse {
                error: Some(e.to_proto()),
                ..Default::default()
            }
        });
        Ok(Response::new(reply))
    }

    async fn edit_photo(
        &self,
        request: Request<EditPhotoRequest>,
    ) -> Result<Response<StatusResponse>, Status> {
        let result = match current_user(&request) {
            Ok(user_id) => self.edit_photo_inner(&user_id, request.into_inner()).await,
            Err(e) => Err(e),
        };
        Ok(Response::new(status_reply("EditPhoto", result)))
    }

    async fn delete_photo(
        &self,
        request: Request<DeletePhotoRequest>,
    ) -> Result<Response<StatusResponse>, Status> {
        let result = match current_user(&request) {
            Ok(user_id) => {
                self.delete_photo_inner(&user_id, request.into_inner().photo_id)
                    .await
            }
            Err(e) => Err(e),
        };
        Ok(Response::new(status_reply("DeletePhoto", result)))
    }

    async fn list_my_likes(
        &self,
        request: Request<PhotoListRequest>,
    ) -> Result<Response<PhotoListResponse>, Status> {
        Ok(Response::new(
            self.photo_list_reply(request, PhotoListKind::Likes).await,
        ))
    }

    async fn rate_photo(
        &self,
        request: Request<VoteRequest>,
    ) -> Result<Response<StatusResponse>, Status> {
        let result = match current_user(&request) {
            Ok(user_id) => self.rate_photo_inner(&user_id, request.into_inner()).await,
            Err(e) => Err(e),
        };
        Ok(Response::new(status_reply("RatePhoto", result)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryPhotoStore;

    fn service() -> AbelanaServiceImpl {
        AbelanaServiceImpl::new(
            Arc::new(MemoryPhotoStore::new()),
            TokenIssuer::new("secret", "abelanav2.examples.com", 3600),
            ServiceSettings {
                photos_per_page: 2,
                confidence_level: 0.95,
                images_base_url: "https://img.example/".to_string(),
                auto_publish: true,
            },
        )
    }

    fn as_user<T>(user_id: &str, message: T) -> Request<T> {
        let mut request = Request::new(message);
        request.extensions_mut().insert(AuthenticatedUser {
            user_id: user_id.to_string(),
        });
        request
    }

    #[test]
    fn test_vote_mapping() {
        assert_eq!(vote_value(VoteType::ThumbsUp), 1);
        assert_eq!(vote_value(VoteType::ThumbsDown), -1);
        assert_eq!(vote_value(VoteType::Neutral), 0);
    }

    #[tokio::test]
    async fn test_unauthenticated_requests_get_in_band_403() {
        let svc = service();
        let reply = svc
            .photo_stream(Request::new(PhotoListRequest { page_number: 0 }))
            .await
            .unwrap()
            .into_inner();
        let error = reply.error.unwrap();
        assert_eq!(error.code, "403");
        assert_eq!(error.details, "You are not authenticated");

        let reply = svc
            .rate_photo(Request::new(VoteRequest::default()))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(reply.error.unwrap().code, "403");
    }

    #[tokio::test]
    async fn test_sign_in_without_verifier_reports_500() {
        let reply = service()
            .sign_in(Request::new(SignInRequest {
                gitkit_token: "token".to_string(),
            }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(reply.error.unwrap().code, "500");
        assert!(reply.user_token.is_empty());
    }

    #[tokio::test]
    async fn test_upload_without_storage_reports_500() {
        let reply = service()
            .upload_photo(as_user(
                "alice",
                NewPhotoRequest {
                    description: "beach".to_string(),
                },
            ))
            .await
            .unwrap()
            .into_inner();
        let error = reply.error.unwrap();
        assert_eq!(error.code, "500");
        assert_eq!(error.details, "Impossible to start file upload");
    }

    #[tokio::test]
    async fn test_rate_missing_photo_is_404() {
        let reply = service()
            .rate_photo(as_user(
                "alice",
                VoteRequest {
                    photo_id: 77,
                    vote: VoteType::ThumbsUp as i32,
                },
            ))
            .await
            .unwrap()
            .into_inner();
        let error = reply.error.unwrap();
        assert_eq!(error.code, "404");
        assert_eq!(error.details, "Photo not found");
    }

    #[tokio::test]
    async fn test_invalid_page_restarts_from_scratch() {
        let svc = service();
        svc.store.insert_photo("one", "alice", true).await.unwrap();

        let reply = svc
            .list_my_photos(as_user("alice", PhotoListRequest { page_number: 12345 }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(reply.error.unwrap().code, "400-200");
        assert_eq!(reply.photo.len(), 1);
        assert_eq!(
            reply.photo[0].url,
            format!("https://img.example/{}_alice.webp", reply.photo[0].photo_id)
        );
    }
}
