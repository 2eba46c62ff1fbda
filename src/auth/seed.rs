//! Permission seeding, run manually via the CLI.

use tracing::{info, instrument};

use super::error::Result;
use super::state::AuthService;
use super::storage::PermissionStore;
use super::types::{PermissionSeed, Role};

/// Role/permission pairs granted out of the box.
pub const SEED_PERMISSIONS: [PermissionSeed; 4] = [
    PermissionSeed {
        permission: "post-create",
        role: Role::Admin,
    },
    PermissionSeed {
        permission: "post-get",
        role: Role::Admin,
    },
    PermissionSeed {
        permission: "post-update",
        role: Role::Admin,
    },
    PermissionSeed {
        permission: "post-get",
        role: Role::User,
    },
];

/// Inserts the fixed permission table, skipping rows already present.
/// Returns the number of rows actually inserted.
#[instrument(skip(store))]
pub async fn seed_permissions(store: &dyn PermissionStore) -> Result<u64> {
    let inserted = store.insert_permissions(&SEED_PERMISSIONS).await?;
    info!(inserted, total = SEED_PERMISSIONS.len(), "permissions seeded");
    Ok(inserted)
}

impl AuthService {
    pub async fn seed_permissions(&self) -> Result<u64> {
        seed_permissions(self.permissions.as_ref()).await
    }
}
