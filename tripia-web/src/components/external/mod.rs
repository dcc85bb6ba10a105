//! Agent-supplied UI fragments rendered next to assistant messages.

pub mod boundary;
pub mod builtin;
pub mod custom_components;
pub mod loader;
pub mod safe_component;

pub use boundary::{BoundaryReporter, ComponentBoundary};
pub use custom_components::CustomComponents;
pub use loader::{Artifact, ComponentContext, ComponentLoader, LoaderHandle, RegistryLoader};
pub use safe_component::SafeComponent;

#[cfg(all(test, target_arch = "wasm32"))]
mod boundary_test;
#[cfg(test)]
mod safe_component_test;
