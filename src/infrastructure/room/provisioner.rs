//! Local room provisioner

use tracing::debug;
use uuid::Uuid;

use crate::domain::room::{RoomHandle, RoomHandles, RoomProvisioner};
use crate::domain::team::TeamId;

/// Generates opaque uuid-based room handles in-process.
///
/// The real chat/project room services are out of scope; the engine only
/// needs opaque handles for a confirmed team.
#[derive(Debug, Default)]
pub struct LocalRoomProvisioner;

impl LocalRoomProvisioner {
    pub fn new() -> Self {
        Self
    }
}

impl RoomProvisioner for LocalRoomProvisioner {
    fn provision(&self, team_id: &TeamId) -> RoomHandles {
        let room_id = format!("room-{}", Uuid::new_v4().simple());
        debug!(team_id = %team_id, room_id = %room_id, "Provisioned rooms");

        RoomHandles {
            chat_room: RoomHandle {
                room_id: room_id.clone(),
                link: format!("/chat/{}", room_id),
            },
            project_room: RoomHandle {
                room_id: room_id.clone(),
                link: format!("/project/{}", room_id),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provision_generates_linked_handles() {
        let provisioner = LocalRoomProvisioner::new();
        let handles = provisioner.provision(&TeamId::generate());

        assert!(handles.chat_room.room_id.starts_with("room-"));
        assert_eq!(handles.chat_room.room_id, handles.project_room.room_id);
        assert_eq!(
            handles.chat_room.link,
            format!("/chat/{}", handles.chat_room.room_id)
        );
        assert_eq!(
            handles.project_room.link,
            format!("/project/{}", handles.project_room.room_id)
        );
    }

    #[test]
    fn test_provision_handles_are_unique_per_call() {
        let provisioner = LocalRoomProvisioner::new();
        let first = provisioner.provision(&TeamId::generate());
        let second = provisioner.provision(&TeamId::generate());

        assert_ne!(first.chat_room.room_id, second.chat_room.room_id);
    }
}
