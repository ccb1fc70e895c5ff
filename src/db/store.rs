use crate::error::AppResult;
use crate::models::{CursorModel, PhotoModel, VoteModel};
use crate::ranking::wilson_interval;

/// Which list a `PhotoListRequest` is answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoListKind {
    /// Every available photo, most popular first.
    Stream,
    /// The caller's own photos, newest first.
    Mine,
    /// Photos the caller voted on, most recent vote first.
    Likes,
}

/// One page of a photo list.
#[derive(Debug, Clone, Default)]
pub struct PhotoPage {
    pub photos: Vec<PhotoModel>,
    /// Position of the next page, if the list continues.
    pub next_position: Option<i64>,
}

/// Vote counters of a photo after a vote changes from `old_vote` to
/// `new_vote` (`0` meaning no vote).
pub fn tally_votes(number_votes: i64, positives: i64, old_vote: i32, new_vote: i32) -> (i64, i64) {
    let mut number_votes = number_votes;
    let mut positives = positives;
    if new_vote == 0 {
        number_votes -= 1;
    }
    if old_vote == 0 {
        number_votes += 1;
    }
    if old_vote == 1 && new_vote != 1 {
        positives -= 1;
    }
    if old_vote != 1 && new_vote == 1 {
        positives += 1;
    }
    (number_votes.max(0), positives.max(0))
}

/// Effect of a vote on the stored vote row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChange {
    Insert,
    Update(i64),
    Delete(i64),
    /// Neutral vote without a previous vote
    Unchanged,
}

/// Decides what a new vote does given the user's existing vote, and returns
/// the previous vote value (`0` when none).
pub fn plan_vote(existing: Option<&VoteModel>, vote: i32) -> (VoteChange, i32) {
    match existing {
        Some(previous) if vote == 0 => (VoteChange::Delete(previous.id), previous.vote),
        Some(previous) => (VoteChange::Update(previous.id), previous.vote),
        None if vote != 0 => (VoteChange::Insert, 0),
        None => (VoteChange::Unchanged, 0),
    }
}

/// Counters and Wilson bounds of a photo after a vote moves from `old_vote`
/// to `new_vote`.
pub fn recount(
    number_votes: i64,
    positives: i64,
    old_vote: i32,
    new_vote: i32,
    confidence: f64,
) -> (i64, i64, (f64, f64)) {
    let (number_votes, positives) = tally_votes(number_votes, positives, old_vote, new_vote);
    (
        number_votes,
        positives,
        wilson_interval(number_votes, positives, confidence),
    )
}

/// Persistence for photos, votes, flags and list cursors.
#[tonic::async_trait]
pub trait PhotoStore: Send + Sync {
    async fn get_photo(&self, photo_id: i64) -> AppResult<Option<PhotoModel>>;

    async fn insert_photo(
        &self,
        description: &str,
        user_id: &str,
        available: bool,
    ) -> AppResult<PhotoModel>;

    /// Returns false when the photo does not exist.
    async fn set_available(&self, photo_id: i64) -> AppResult<bool>;

    async fn update_description(&self, photo_id: i64, description: &str) -> AppResult<bool>;

    /// Deletes the photo with its votes and flags.
    async fn delete_photo_and_children(&self, photo_id: i64) -> AppResult<bool>;

    /// Records a flag from `user_id` (at most one per user) and returns the
    /// number of distinct flags on the photo afterwards, or `None` when the
    /// photo does not exist. The count reflects every flag committed before
    /// this one.
    async fn insert_flag(&self, photo_id: i64, user_id: &str) -> AppResult<Option<usize>>;

    async fn set_flagged(&self, photo_id: i64) -> AppResult<bool>;

    async fn find_vote(&self, photo_id: i64, user_id: &str) -> AppResult<Option<VoteModel>>;

    /// Records `vote` (-1, 0 or 1) from `user_id` and recomputes the photo's
    /// counters and ranking bounds as one atomic step. Returns false when the
    /// photo is missing.
    async fn vote_for_photo(
        &self,
        photo_id: i64,
        vote: i32,
        user_id: &str,
        confidence: f64,
    ) -> AppResult<bool>;

    async fn list_photos(
        &self,
        kind: PhotoListKind,
        user_id: &str,
        start: i64,
        limit: usize,
    ) -> AppResult<PhotoPage>;

    /// Stores a list position and returns its id (never 0).
    async fn insert_cursor(&self, user_id: &str, position: i64) -> AppResult<i64>;

    /// Fetches and deletes a cursor.
    async fn take_cursor(&self, cursor_id: i64) -> AppResult<Option<CursorModel>>;

    /// The caller's vote on a photo: -1, 0 or 1.
    async fn vote_value(&self, photo_id: i64, user_id: &str) -> AppResult<i32> {
        Ok(self
            .find_vote(photo_id, user_id)
            .await?
            .map(|v| v.vote)
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_new_positive_vote() {
        assert_eq!(tally_votes(0, 0, 0, 1), (1, 1));
    }

    #[test]
    fn test_tally_flip_to_negative() {
        assert_eq!(tally_votes(3, 2, 1, -1), (3, 1));
    }

    #[test]
    fn test_tally_withdraw_negative() {
        assert_eq!(tally_votes(3, 2, -1, 0), (2, 2));
    }

    #[test]
    fn test_tally_withdraw_positive() {
        assert_eq!(tally_votes(1, 1, 1, 0), (0, 0));
    }

    #[test]
    fn test_tally_flip_to_positive() {
        assert_eq!(tally_votes(2, 0, -1, 1), (2, 1));
    }

    fn vote(id: i64, value: i32) -> VoteModel {
        VoteModel {
            id,
            photo_id: 1,
            user_id: "u".to_string(),
            vote: value,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_plan_vote_transitions() {
        assert_eq!(plan_vote(None, 1), (VoteChange::Insert, 0));
        assert_eq!(plan_vote(None, 0), (VoteChange::Unchanged, 0));
        assert_eq!(plan_vote(Some(&vote(7, -1)), 1), (VoteChange::Update(7), -1));
        assert_eq!(plan_vote(Some(&vote(7, 1)), 0), (VoteChange::Delete(7), 1));
    }

    #[test]
    fn test_recount_bounds() {
        let (n, p, (lower, upper)) = recount(0, 0, 0, 1, 0.95);
        assert_eq!((n, p), (1, 1));
        assert!(lower > 0.0 && upper <= 1.0);
        assert_eq!(recount(1, 1, 1, 0, 0.95), (0, 0, (0.0, 0.0)));
    }
}
