use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde_json::{Map, Value};
use tripia_shared::models::{ComponentError, UiDescriptor};
use yew::{Callback, Html};

use super::builtin;

/// Content a component asks to show in the artifact side panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifact {
    pub title: String,
    pub body: String,
    /// Run context sent with submissions while the panel stays open.
    pub context: Map<String, Value>,
}

/// Everything a loaded component receives.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentContext {
    pub descriptor: UiDescriptor,
    pub message_id: Option<String>,
    pub open_artifact: Callback<Artifact>,
}

/// Turns descriptors into markup.
pub trait ComponentLoader {
    /// Renders the component. Errors are shown in place of the component.
    ///
    /// # Errors
    /// Returns a [`ComponentError`] when the component is unknown or its
    /// props cannot be rendered.
    fn render(&self, context: &ComponentContext) -> Result<Html, ComponentError>;

    /// Runs once the rendered component is on screen.
    ///
    /// # Errors
    /// Returns a [`ComponentError`] for failures only detectable after
    /// rendering; the surrounding boundary shows its fallback.
    fn mounted(&self, context: &ComponentContext) -> Result<(), ComponentError> {
        let _ = context;
        Ok(())
    }
}

/// Shared loader usable as a component prop.
#[derive(Clone)]
pub struct LoaderHandle(pub Rc<dyn ComponentLoader>);

impl LoaderHandle {
    pub fn new(loader: impl ComponentLoader + 'static) -> Self {
        Self(Rc::new(loader))
    }
}

impl Default for LoaderHandle {
    fn default() -> Self {
        Self::new(RegistryLoader::builtin())
    }
}

impl PartialEq for LoaderHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for LoaderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LoaderHandle")
    }
}

type RenderFn = fn(&ComponentContext) -> Result<Html, ComponentError>;
type MountedFn = fn(&ComponentContext) -> Result<(), ComponentError>;

/// Name-keyed registry of components compiled into the client.
#[derive(Default)]
pub struct RegistryLoader {
    components: BTreeMap<&'static str, (RenderFn, Option<MountedFn>)>,
}

impl fmt::Debug for RegistryLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryLoader")
            .field("components", &self.components.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl RegistryLoader {
    /// Registry with the travel components.
    pub fn builtin() -> Self {
        Self::default()
            .register(builtin::FLIGHTS, builtin::render_flights, Some(builtin::check_selected_flight))
            .register(builtin::HOTELS, builtin::render_hotels, None)
    }

    #[must_use]
    pub fn register(
        mut self,
        name: &'static str,
        render: RenderFn,
        mounted: Option<MountedFn>,
    ) -> Self {
        self.components.insert(name, (render, mounted));
        self
    }

    fn lookup(&self, context: &ComponentContext) -> Result<&(RenderFn, Option<MountedFn>), ComponentError> {
        let name = context.descriptor.name.as_deref().unwrap_or_default();
        self.components
            .get(name)
            .ok_or_else(|| ComponentError::NotRegistered { name: name.into() })
    }
}

impl ComponentLoader for RegistryLoader {
    fn render(&self, context: &ComponentContext) -> Result<Html, ComponentError> {
        let (render, _) = self.lookup(context)?;
        render(context)
    }

    fn mounted(&self, context: &ComponentContext) -> Result<(), ComponentError> {
        match self.lookup(context)? {
            (_, Some(mounted)) => mounted(context),
            (_, None) => Ok(()),
        }
    }
}
