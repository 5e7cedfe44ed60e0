use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::User;

/// Id of the authenticated user a store operation is scoped to.
///
/// Every priority and task operation takes one explicitly; there is no
/// ambient "current user".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Owner(pub Uuid);

impl Owner {
    pub fn id(&self) -> Uuid {
        self.0
    }

    pub(crate) fn key(&self) -> u128 {
        self.0.as_u128()
    }
}

impl From<&User> for Owner {
    fn from(user: &User) -> Self {
        Owner(user.id)
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
