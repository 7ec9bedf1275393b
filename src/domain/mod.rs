//! Manager-agnostic domain types.

mod application;
mod launch;
mod member;

// Core domain types
pub use application::{ApplicationHandle, ApplicationState};
pub use launch::{
    ArtifactKind, ArtifactVisibility, LaunchSpec, ResourceRequest, StagedArtifact,
};
pub use member::ClusterMember;
