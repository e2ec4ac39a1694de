//! Contract between the widget and the environment that displays it.

use glam::Vec2;
use life_rendering::{Canvas, SurfaceDimensions};

/// Class added to a container while it hosts a widget.
pub const CONTAINER_CLASS: &str = "game-of-life";

/// Kind of element a container handle refers to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Block container able to host a drawable surface.
    Div,
    /// Any other element, identified by its tag name.
    Other(String),
}

impl ElementKind {
    /// Tag name of the element kind.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Div => "div",
            Self::Other(name) => name,
        }
    }
}

/// Opaque reference to a container element owned by the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContainerHandle {
    id: String,
    kind: ElementKind,
}

impl ContainerHandle {
    /// Creates a handle for the element identified by `id`.
    #[must_use]
    pub fn new<T>(id: T, kind: ElementKind) -> Self
    where
        T: Into<String>,
    {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Identifier of the element within its host.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Kind of the referenced element.
    #[must_use]
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }
}

/// Container reference accepted when creating a widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContainerRef {
    /// Identifier selector, with or without its leading `#`.
    Selector(String),
    /// Handle to an element the caller already holds.
    Element(ContainerHandle),
}

impl From<&str> for ContainerRef {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_owned())
    }
}

impl From<ContainerHandle> for ContainerRef {
    fn from(handle: ContainerHandle) -> Self {
        Self::Element(handle)
    }
}

/// Prefixes `selector` with `#` unless it already starts with one.
#[must_use]
pub fn normalize_selector(selector: &str) -> String {
    if selector.starts_with('#') {
        selector.to_owned()
    } else {
        format!("#{selector}")
    }
}

/// Environment that owns containers and displays the drawable surface.
///
/// All methods are invoked from the thread that owns the widget. The canvas
/// returned by [`Host::attach_surface`] is moved to the render worker.
pub trait Host {
    /// Canvas handed to the render worker.
    type Canvas: Canvas + Send + 'static;

    /// Looks up a container by its normalized `#id` selector.
    fn resolve(&self, selector: &str) -> Option<ContainerHandle>;

    /// Adds `class` to the container's class list.
    fn add_class(&mut self, container: &ContainerHandle, class: &str);

    /// Removes `class` from the container's class list.
    fn remove_class(&mut self, container: &ContainerHandle, class: &str);

    /// Mounts a drawable surface of `dimensions` inside the container.
    fn attach_surface(
        &mut self,
        container: &ContainerHandle,
        dimensions: SurfaceDimensions,
    ) -> Self::Canvas;

    /// Current size of the container's box.
    fn container_size(&self, container: &ContainerHandle) -> Vec2;

    /// Sets the size the mounted surface is displayed at.
    fn set_display_size(&mut self, container: &ContainerHandle, size: Vec2);

    /// Removes the mounted surface from the container.
    fn detach_surface(&mut self, container: &ContainerHandle);

    /// Removes every child of the container.
    fn clear_container(&mut self, container: &ContainerHandle);
}
