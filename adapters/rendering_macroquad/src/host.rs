//! Host implementation treating the macroquad window as the widget container.
//!
//! Nothing in here touches macroquad directly so the host can be exercised
//! without opening a window.

use std::{collections::BTreeSet, sync::mpsc::Receiver};

use glam::Vec2;
use life_rendering::{Frame, PresentingCanvas, SurfaceDimensions};
use life_widget::{ContainerHandle, ElementKind, Host};

/// Identifier of the single container exposed by [`WindowHost`].
pub const WINDOW_CONTAINER_ID: &str = "window";

const FRAME_QUEUE: usize = 2;

/// Host whose only container is the application window.
#[derive(Debug)]
pub struct WindowHost {
    window_size: Vec2,
    display_size: Option<Vec2>,
    surface: Option<SurfaceDimensions>,
    classes: BTreeSet<String>,
    frames: Option<Receiver<Frame>>,
}

impl WindowHost {
    /// Creates a host for a window of `window_size` logical pixels.
    #[must_use]
    pub fn new(window_size: Vec2) -> Self {
        Self {
            window_size,
            display_size: None,
            surface: None,
            classes: BTreeSet::new(),
            frames: None,
        }
    }

    /// Handle referring to the window container.
    #[must_use]
    pub fn container() -> ContainerHandle {
        ContainerHandle::new(WINDOW_CONTAINER_ID, ElementKind::Div)
    }

    /// Current window size.
    #[must_use]
    pub fn window_size(&self) -> Vec2 {
        self.window_size
    }

    /// Records a new window size. Returns `true` when it differs from the last one.
    pub fn set_window_size(&mut self, window_size: Vec2) -> bool {
        if self.window_size == window_size {
            return false;
        }
        self.window_size = window_size;
        true
    }

    /// Size the surface should be drawn at, once a surface is mounted.
    #[must_use]
    pub fn display_size(&self) -> Option<Vec2> {
        let surface = self.surface?;
        Some(self.display_size.unwrap_or_else(|| {
            Vec2::new(surface.width() as f32, surface.height() as f32)
        }))
    }

    /// Dimensions of the mounted surface.
    #[must_use]
    pub fn surface(&self) -> Option<SurfaceDimensions> {
        self.surface
    }

    /// Reports whether the window currently carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Drains the frame queue, returning the most recent painted frame.
    #[must_use]
    pub fn take_latest_frame(&self) -> Option<Frame> {
        self.frames.as_ref()?.try_iter().last()
    }

    fn is_window(container: &ContainerHandle) -> bool {
        let matches = container.id() == WINDOW_CONTAINER_ID;
        if !matches {
            log::warn!("window host has no container {}", container.id());
        }
        matches
    }
}

impl Host for WindowHost {
    type Canvas = PresentingCanvas;

    fn resolve(&self, selector: &str) -> Option<ContainerHandle> {
        (selector.strip_prefix('#') == Some(WINDOW_CONTAINER_ID)).then(Self::container)
    }

    fn add_class(&mut self, container: &ContainerHandle, class: &str) {
        if Self::is_window(container) {
            let _ = self.classes.insert(class.to_owned());
        }
    }

    fn remove_class(&mut self, container: &ContainerHandle, class: &str) {
        if Self::is_window(container) {
            let _ = self.classes.remove(class);
        }
    }

    fn attach_surface(
        &mut self,
        container: &ContainerHandle,
        dimensions: SurfaceDimensions,
    ) -> Self::Canvas {
        if Self::is_window(container) {
            self.surface = Some(dimensions);
        }
        let (canvas, frames) = PresentingCanvas::channel(dimensions, FRAME_QUEUE);
        self.frames = Some(frames);
        canvas
    }

    fn container_size(&self, _container: &ContainerHandle) -> Vec2 {
        self.window_size
    }

    fn set_display_size(&mut self, container: &ContainerHandle, size: Vec2) {
        if Self::is_window(container) {
            self.display_size = Some(size);
        }
    }

    fn detach_surface(&mut self, container: &ContainerHandle) {
        if Self::is_window(container) {
            self.surface = None;
            self.display_size = None;
            self.frames = None;
        }
    }

    fn clear_container(&mut self, _container: &ContainerHandle) {}
}
