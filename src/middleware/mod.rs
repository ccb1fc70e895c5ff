pub mod auth;
pub mod notification;

pub use auth::{authenticate, AuthLayer, AuthenticatedUser};
pub use notification::{NotificationLayer, NOTIFICATION_PATH};
