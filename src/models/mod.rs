pub mod category;
pub mod inflation;
pub mod notification;
pub mod preference;
pub mod tracked_item;
pub mod user;

pub use category::{Category, CategoryItem, CategoryWithItems};
pub use inflation::{DateRangeQuery, InflationData};
pub use notification::{CreateNotificationRequest, Notification};
pub use preference::{CreatePreferenceRequest, Preference, UpdatePreferenceRequest};
pub use tracked_item::TrackedItem;
pub use user::{
    LoginRequest, RegisterRequest, TokenRequest, User, UserIdentity, UserUpdateRequest,
};
