//! Asynchronous client for the photo service.
//!
//! Every operation returns a [`CallHandle`] immediately; the RPC runs on the
//! Tokio runtime the client was created in.

pub mod call;

use std::future::Future;
use std::sync::{Arc, RwLock};

use thiserror::Error;
use tokio::runtime::Handle;
use tonic::metadata::{Ascii, MetadataValue};
use tonic::service::interceptor::InterceptedService;
use tonic::service::Interceptor;
use tonic::transport::{Channel, Endpoint};
use tonic::{Request, Status};

use crate::error::codes;
use crate::proto::abelana_client::AbelanaClient as GrpcAbelanaClient;
use crate::proto::{
    DeletePhotoRequest, EditPhotoRequest, Error as ProtoError, FlagRequest, NewPhotoRequest,
    PhotoListRequest, PhotoListResponse, SignInRequest, SignInResponse, StatusResponse,
    UploadPhotoResponse, VoteRequest,
};

pub use call::{CallError, CallHandle, CancelHandle};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid host {host:?}: {reason}")]
    InvalidHost { host: String, reason: String },

    #[error("no Tokio runtime available: {0}")]
    NoRuntime(String),
}

/// The nine photo service operations. Each call is dispatched without
/// blocking and completes through its handle.
pub trait AbelanaApi {
    fn sign_in(&self, request: SignInRequest) -> CallHandle<SignInResponse>;
    fn photo_stream(&self, request: PhotoListRequest) -> CallHandle<PhotoListResponse>;
    fn flag_photo(&self, request: FlagRequest) -> CallHandle<StatusResponse>;
    fn list_my_photos(&self, request: PhotoListRequest) -> CallHandle<PhotoListResponse>;
    fn upload_photo(&self, request: NewPhotoRequest) -> CallHandle<UploadPhotoResponse>;
    fn edit_photo(&self, request: EditPhotoRequest) -> CallHandle<StatusResponse>;
    fn delete_photo(&self, request: DeletePhotoRequest) -> CallHandle<StatusResponse>;
    fn list_my_likes(&self, request: PhotoListRequest) -> CallHandle<PhotoListResponse>;
    fn rate_photo(&self, request: VoteRequest) -> CallHandle<StatusResponse>;
}

/// Responses carrying an in-band `error` field.
trait InBandError {
    fn in_band_error(&self) -> Option<&ProtoError>;
}

impl InBandError for SignInResponse {
    fn in_band_error(&self) -> Option<&ProtoError> {
        self.error.as_ref()
    }
}

impl InBandError for StatusResponse {
    fn in_band_error(&self) -> Option<&ProtoError> {
        self.error.as_ref()
    }
}

impl InBandError for UploadPhotoResponse {
    fn in_band_error(&self) -> Option<&ProtoError> {
        self.error.as_ref()
    }
}

impl InBandError for PhotoListResponse {
    // An invalid page still carries the first page of results
    fn in_band_error(&self) -> Option<&ProtoError> {
        self.error
            .as_ref()
            .filter(|error| error.code != codes::INVALID_PAGE)
    }
}

fn into_outcome<T: InBandError>(reply: T) -> Result<T, CallError> {
    match reply.in_band_error() {
        Some(error) => Err(CallError::Remote {
            code: error.code.clone(),
            details: error.details.clone(),
        }),
        None => Ok(reply),
    }
}

type SharedToken = Arc<RwLock<Option<String>>>;

/// Attaches `authorization: Bearer <token>` once a user token is known.
#[derive(Clone)]
pub struct TokenInterceptor {
    token: SharedToken,
}

impl Interceptor for TokenInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let token = self.token.read().ok().and_then(|slot| slot.clone());
        if let Some(token) = token {
            let value: MetadataValue<Ascii> = format!("Bearer {}", token)
                .parse()
                .map_err(|_| Status::invalid_argument("user token is not a valid header value"))?;
            request.metadata_mut().insert("authorization", value);
        }
        Ok(request)
    }
}

type Stub = GrpcAbelanaClient<InterceptedService<Channel, TokenInterceptor>>;

/// Normalizes a host into an endpoint URI, adding `http://` when no scheme
/// is given.
fn endpoint_for(host: &str) -> Result<Endpoint, ClientError> {
    let invalid = |reason: String| ClientError::InvalidHost {
        host: host.to_string(),
        reason,
    };

    let trimmed = host.trim();
    if trimmed.is_empty() {
        return Err(invalid("host is empty".to_string()));
    }
    let uri = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let endpoint = Endpoint::from_shared(uri).map_err(|e| invalid(e.to_string()))?;
    if endpoint.uri().host().map_or(true, str::is_empty) {
        return Err(invalid("missing host name".to_string()));
    }
    Ok(endpoint)
}

#[derive(Clone)]
pub struct AbelanaClient {
    stub: Stub,
    token: SharedToken,
    runtime: Handle,
}

impl AbelanaClient {
    /// Creates a client for `host` (`name:port` or a full URI). Connecting is
    /// deferred to the first call. Must be called within a Tokio runtime.
    pub fn new(host: &str) -> Result<Self, ClientError> {
        let endpoint = endpoint_for(host)?;
        let runtime = Handle::try_current().map_err(|e| ClientError::NoRuntime(e.to_string()))?;

        let token: SharedToken = Arc::new(RwLock::new(None));
        let channel = endpoint.connect_lazy();
        let stub = GrpcAbelanaClient::with_interceptor(
            channel,
            TokenInterceptor {
                token: token.clone(),
            },
        );

        tracing::debug!("Abelana client created: endpoint={}", endpoint.uri());
        Ok(Self {
            stub,
            token,
            runtime,
        })
    }

    pub fn user_token(&self) -> Option<String> {
        self.token.read().ok().and_then(|slot| slot.clone())
    }

    pub fn set_user_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token;
        }
    }

    fn dispatch<T, F, Fut>(&self, call: F) -> CallHandle<T>
    where
        T: Send + 'static,
        F: FnOnce(Stub) -> Fut,
        Fut: Future<Output = Result<T, CallError>> + Send + 'static,
    {
        CallHandle::spawn(&self.runtime, call(self.stub.clone()))
    }

    /// Dispatches `call` and applies `commit` to a response that was not
    /// cancelled.
    fn dispatch_with<T, F, Fut, C>(&self, call: F, commit: C) -> CallHandle<T>
    where
        T: Send + 'static,
        F: FnOnce(Stub) -> Fut,
        Fut: Future<Output = Result<T, CallError>> + Send + 'static,
        C: FnOnce(&T) + Send + 'static,
    {
        CallHandle::spawn_with(&self.runtime, call(self.stub.clone()), commit)
    }
}

impl AbelanaApi for AbelanaClient {
    fn sign_in(&self, request: SignInRequest) -> CallHandle<SignInResponse> {
        let token = self.token.clone();
        self.dispatch_with(
            move |mut stub| async move {
                into_outcome(stub.sign_in(request).await?.into_inner())
            },
            move |reply: &SignInResponse| {
                if reply.user_token.is_empty() {
                    return;
                }
                if let Ok(mut slot) = token.write() {
                    *slot = Some(reply.user_token.clone());
                }
            },
        )
    }

    fn photo_stream(&self, request: PhotoListRequest) -> CallHandle<PhotoListResponse> {
        self.dispatch(move |mut stub| async move {
            into_outcome(stub.photo_stream(request).await?.into_inner())
        })
    }

    fn flag_photo(&self, request: FlagRequest) -> CallHandle<StatusResponse> {
        self.dispatch(move |mut stub| async move {
            into_outcome(stub.flag_photo(request).await?.into_inner())
        })
    }

    fn list_my_photos(&self, request: PhotoListRequest) -> CallHandle<PhotoListResponse> {
        self.dispatch(move |mut stub| async move {
            into_outcome(stub.list_my_photos(request).await?.into_inner())
        })
    }

    fn upload_photo(&self, request: NewPhotoRequest) -> CallHandle<UploadPhotoResponse> {
        self.dispatch(move |mut stub| async move {
            into_outcome(stub.upload_photo(request).await?.into_inner())
        })
    }

    fn edit_photo(&self, request: EditPhotoRequest) -> CallHandle<StatusResponse> {
        self.dispatch(move |mut stub| async move {
            into_outcome(stub.edit_photo(request).await?.into_inner())
        })
    }

    fn delete_photo(&self, request: DeletePhotoRequest) -> CallHandle<StatusResponse> {
        self.dispatch(move |mut stub| async move {
            into_outcome(stub.delete_photo(request).await?.into_inner())
        })
    }

    fn list_my_likes(&self, request: PhotoListRequest) -> CallHandle<PhotoListResponse> {
        self.dispatch(move |mut stub| async move {
            into_outcome(stub.list_my_likes(request).await?.into_inner())
        })
    }

    fn rate_photo(&self, request: VoteRequest) -> CallHandle<StatusResponse> {
        self.dispatch(move |mut stub| async move {
            into_outcome(stub.rate_photo(request).await?.into_inner())
        })
    }
}
