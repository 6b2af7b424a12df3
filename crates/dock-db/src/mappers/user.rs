//! User entity <-> model mapper

use dock_core::entities::User;
use dock_core::value_objects::UserId;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            is_staff: model.is_staff,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
