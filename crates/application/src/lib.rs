//! Scenario service and the ports it drives.

#![forbid(unsafe_code)]

mod galaxy_ports;
mod scenario_service;

pub use galaxy_ports::{
    AssignRoleInput, AssignmentFilter, CollectionUpload, ContentPort, CreateUserInput, GalaxyApi,
    GalaxySessions, NativeRoleSubject, ObjectScope, PrincipalPort, RbacPort, SettingsPort,
    TaskPort,
};
pub use scenario_service::{
    DeploymentMode, Scenario, ScenarioEnvironment, ScenarioOutcome, ScenarioReport,
    ScenarioService,
};
