use serde::Deserialize;

use crate::db::PhotoStore;
use crate::error::AppResult;
use crate::models::photo_id_from_object_name;

/// Object change notification published by the bucket holding resized images.
#[derive(Debug, Deserialize)]
pub struct ObjectNotification {
    pub bucket: String,
    pub name: String,
}

impl ObjectNotification {
    pub fn from_json(payload: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(payload)
    }
}

/// Marks the photo behind a resized image object (`<photo_id>_<user_id>.webp`)
/// as available. Returns false when the name does not match or the photo is
/// gone.
pub async fn mark_available_from_object(
    store: &dyn PhotoStore,
    object_name: &str,
) -> AppResult<bool> {
    let resized = object_name.ends_with(".webp");
    let Some(photo_id) = photo_id_from_object_name(object_name).filter(|_| resized) else {
        tracing::debug!("Ignoring object without photo id: {}", object_name);
        return Ok(false);
    };

    let updated = store.set_available(photo_id).await?;
    if updated {
        tracing::info!("Photo available: photo={}, object={}", photo_id, object_name);
    } else {
        tracing::warn!("No photo for resized object: {}", object_name);
    }
    Ok(updated)
}

/// Applies an object notification from the resized images bucket.
pub async fn handle_object_notification(
    store: &dyn PhotoStore,
    notification: &ObjectNotification,
) -> AppResult<bool> {
    tracing::debug!(
        "Object notification: bucket={}, name={}",
        notification.bucket,
        notification.name
    );
    mark_available_from_object(store, &notification.name).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryPhotoStore;

    #[tokio::test]
    async fn test_marks_photo_available() {
        let store = MemoryPhotoStore::new();
        let photo = store.insert_photo("sunset", "alice", false).await.unwrap();

        let object = format!("{}_alice.webp", photo.id);
        assert!(mark_available_from_object(&store, &object).await.unwrap());
        assert!(store.get_photo(photo.id).await.unwrap().unwrap().available);
    }

    #[tokio::test]
    async fn test_ignores_unrelated_objects() {
        let store = MemoryPhotoStore::new();
        assert!(!mark_available_from_object(&store, "thumbnail.png").await.unwrap());
        assert!(!mark_available_from_object(&store, "999_bob.webp").await.unwrap());

        let photo = store.insert_photo("raw", "bob", false).await.unwrap();
        let upload = format!("{}_bob.jpeg", photo.id);
        assert!(!mark_available_from_object(&store, &upload).await.unwrap());
        assert!(!store.get_photo(photo.id).await.unwrap().unwrap().available);
    }

    #[tokio::test]
    async fn test_notification_payload() {
        let store = MemoryPhotoStore::new();
        let photo = store.insert_photo("dunes", "carol", false).await.unwrap();
        let payload = format!(r#"{{"bucket":"abelanav2","name":"{}_carol.webp"}}"#, photo.id);

        let notification = ObjectNotification::from_json(payload.as_bytes()).unwrap();
        assert!(handle_object_notification(&store, &notification).await.unwrap());
        assert!(store.get_photo(photo.id).await.unwrap().unwrap().available);
        assert!(ObjectNotification::from_json(b"not json").is_err());
        assert!(ObjectNotification::from_json(br#"{"bucket":"abelanav2"}"#).is_err());
    }
}
