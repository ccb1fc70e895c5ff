pub mod abelana_service;
pub mod availability;

pub use abelana_service::{AbelanaServiceImpl, ServiceSettings};
pub use availability::{handle_object_notification, mark_available_from_object, ObjectNotification};
