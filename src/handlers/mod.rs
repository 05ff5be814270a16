pub mod auth;
pub mod categories;
pub mod inflation;
pub mod items;
pub mod notifications;
pub mod preferences;
pub mod users;
