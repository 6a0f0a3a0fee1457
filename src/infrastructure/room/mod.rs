//! Room provisioning infrastructure

mod provisioner;

pub use provisioner::LocalRoomProvisioner;
