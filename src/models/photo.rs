use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PhotoModel {
    pub id: i64,
    pub user_id: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub flagged: bool,
    /// Set once the resized image has been published.
    pub available: bool,
    pub number_votes: i64,
    pub number_positive_votes: i64,
    pub lower_true_popularity: f64,
    pub upper_true_popularity: f64,
}

/// A user's vote on a photo: `1` (thumbs up) or `-1` (thumbs down).
/// Neutral votes are not stored.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct VoteModel {
    pub id: i64,
    pub photo_id: i64,
    pub user_id: String,
    pub vote: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct FlagModel {
    pub id: i64,
    pub photo_id: i64,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl PhotoModel {
    pub fn new(id: i64, user_id: String, description: String, available: bool) -> Self {
        Self {
            id,
            user_id,
            description,
            created_at: Utc::now(),
            flagged: false,
            available,
            number_votes: 0,
            number_positive_votes: 0,
            lower_true_popularity: 0.0,
            upper_true_popularity: 0.0,
        }
    }

    /// Object name of the original upload in the upload bucket.
    pub fn upload_object_name(&self) -> String {
        format!("{}_{}.jpeg", self.id, self.user_id)
    }

    /// Object name of the resized image in the public bucket.
    pub fn image_object_name(&self) -> String {
        format!("{}_{}.webp", self.id, self.user_id)
    }
}

/// Parses the photo id out of an object name written by the image pipeline,
/// `<photo_id>_<user_id>.<ext>`.
pub fn photo_id_from_object_name(name: &str) -> Option<i64> {
    let file = name.rsplit('/').next()?;
    let (id, rest) = file.split_once('_')?;
    if rest.is_empty() {
        return None;
    }
    id.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_names() {
        let photo = PhotoModel::new(42, "user-1".to_string(), "sunset".to_string(), false);
        assert_eq!(photo.upload_object_name(), "42_user-1.jpeg");
        assert_eq!(photo.image_object_name(), "42_user-1.webp");
    }

    #[test]
    fn test_photo_id_from_object_name() {
        assert_eq!(photo_id_from_object_name("42_user-1.webp"), Some(42));
        assert_eq!(photo_id_from_object_name("resized/7_abc_def.webp"), Some(7));
        assert_eq!(photo_id_from_object_name("nounderscore.webp"), None);
        assert_eq!(photo_id_from_object_name("x_user.webp"), None);
        assert_eq!(photo_id_from_object_name("42_"), None);
    }
}
