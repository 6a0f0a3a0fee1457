//! Room provisioning collaborator
//!
//! Confirmed teams receive opaque chat and project room handles from an
//! external provisioner. The engine treats the provisioner as synchronous
//! and non-failing; retry logic belongs to production implementations.

use serde::{Deserialize, Serialize};

use crate::domain::team::TeamId;

/// A single opaque room handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomHandle {
    pub room_id: String,
    pub link: String,
}

/// Handles issued for a confirmed team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomHandles {
    pub chat_room: RoomHandle,
    pub project_room: RoomHandle,
}

/// Issues room handles for confirmed teams
#[cfg_attr(test, mockall::automock)]
pub trait RoomProvisioner: Send + Sync {
    fn provision(&self, team_id: &TeamId) -> RoomHandles;
}
