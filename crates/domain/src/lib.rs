//! Records for the remote resources the RBAC scenarios create and inspect.

#![forbid(unsafe_code)]

mod content;
mod href;
mod names;
mod page;
mod principal;
mod rbac;
mod settings;
mod task;

pub use content::{Artifact, ContentType, Namespace, Repository};
pub use href::href_resource_id;
pub use names::ResourceNames;
pub use page::Page;
pub use principal::{Me, Organization, PrincipalKind, Team, TeamGroup, User};
pub use rbac::{
    NATIVE_AUDITOR_ROLE, NAMESPACE_OWNER_ROLE, NativeRole, NativeRoleAssignment,
    PLATFORM_AUDITOR_ROLE, REPOSITORY_OWNER_ROLE, RoleDefinition, RoleTeamAssignment,
    RoleUserAssignment,
};
pub use settings::ServerSettings;
pub use task::{Task, TaskHandle, TaskState};
