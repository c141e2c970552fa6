mod content;
mod principals;
mod rbac;
mod sessions;
mod settings;
mod tasks;

pub use content::{CollectionUpload, ContentPort};
pub use principals::{CreateUserInput, PrincipalPort};
pub use rbac::{AssignRoleInput, AssignmentFilter, NativeRoleSubject, ObjectScope, RbacPort};
pub use sessions::{GalaxyApi, GalaxySessions};
pub use settings::SettingsPort;
pub use tasks::TaskPort;
