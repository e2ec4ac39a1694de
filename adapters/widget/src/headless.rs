//! In-memory host used by tests and tooling.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::mpsc::Receiver,
};

use glam::Vec2;
use life_rendering::{Frame, PresentingCanvas, SurfaceDimensions};

use crate::{ContainerHandle, ElementKind, Host};

const FRAME_QUEUE: usize = 8;

/// Observable state of a container owned by a [`HeadlessHost`].
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerState {
    /// Kind of the element.
    pub kind: ElementKind,
    /// Classes currently applied.
    pub classes: BTreeSet<String>,
    /// Size of the container's box.
    pub size: Vec2,
    /// Dimensions of the mounted surface, if any.
    pub surface: Option<SurfaceDimensions>,
    /// Size the surface is displayed at, if one was set.
    pub display_size: Option<Vec2>,
    /// Number of times the container was emptied.
    pub clear_count: u32,
}

/// Host keeping containers in memory and collecting painted frames.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    containers: BTreeMap<String, ContainerState>,
    frames: Option<Receiver<Frame>>,
}

impl HeadlessHost {
    /// Creates a host without containers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a container and returns the handle referring to it.
    pub fn insert_container<T>(&mut self, id: T, kind: ElementKind, size: Vec2) -> ContainerHandle
    where
        T: Into<String>,
    {
        let handle = ContainerHandle::new(id, kind.clone());
        let _ = self.containers.insert(
            handle.id().to_owned(),
            ContainerState {
                kind,
                classes: BTreeSet::new(),
                size,
                surface: None,
                display_size: None,
                clear_count: 0,
            },
        );
        handle
    }

    /// Builder variant of [`HeadlessHost::insert_container`] for block containers.
    #[must_use]
    pub fn with_div<T>(mut self, id: T, size: Vec2) -> Self
    where
        T: Into<String>,
    {
        let _ = self.insert_container(id, ElementKind::Div, size);
        self
    }

    /// State of the container identified by `id`.
    #[must_use]
    pub fn container(&self, id: &str) -> Option<&ContainerState> {
        self.containers.get(id)
    }

    /// Changes the box size of a container. Unknown ids are ignored.
    pub fn set_container_size(&mut self, id: &str, size: Vec2) {
        if let Some(state) = self.containers.get_mut(id) {
            state.size = size;
        }
    }

    /// Drains queued frames and returns the most recent one.
    #[must_use]
    pub fn latest_frame(&self) -> Option<Frame> {
        self.frames.as_ref()?.try_iter().last()
    }

    /// Receiving end of the frame channel once a surface is mounted.
    #[must_use]
    pub fn frames(&self) -> Option<&Receiver<Frame>> {
        self.frames.as_ref()
    }

    fn state_mut(&mut self, container: &ContainerHandle) -> Option<&mut ContainerState> {
        let state = self.containers.get_mut(container.id());
        if state.is_none() {
            log::warn!("headless host has no container {}", container.id());
        }
        state
    }
}

impl Host for HeadlessHost {
    type Canvas = PresentingCanvas;

    fn resolve(&self, selector: &str) -> Option<ContainerHandle> {
        let id = selector.strip_prefix('#')?;
        self.containers
            .get(id)
            .map(|state| ContainerHandle::new(id, state.kind.clone()))
    }

    fn add_class(&mut self, container: &ContainerHandle, class: &str) {
        if let Some(state) = self.state_mut(container) {
            let _ = state.classes.insert(class.to_owned());
        }
    }

    fn remove_class(&mut self, container: &ContainerHandle, class: &str) {
        if let Some(state) = self.state_mut(container) {
            let _ = state.classes.remove(class);
        }
    }

    fn attach_surface(
        &mut self,
        container: &ContainerHandle,
        dimensions: SurfaceDimensions,
    ) -> Self::Canvas {
        if let Some(state) = self.state_mut(container) {
            state.surface = Some(dimensions);
        }
        let (canvas, frames) = PresentingCanvas::channel(dimensions, FRAME_QUEUE);
        self.frames = Some(frames);
        canvas
    }

    fn container_size(&self, container: &ContainerHandle) -> Vec2 {
        self.containers
            .get(container.id())
            .map_or(Vec2::ZERO, |state| state.size)
    }

    fn set_display_size(&mut self, container: &ContainerHandle, size: Vec2) {
        if let Some(state) = self.state_mut(container) {
            state.display_size = Some(size);
        }
    }

    fn detach_surface(&mut self, container: &ContainerHandle) {
        if let Some(state) = self.state_mut(container) {
            state.surface = None;
            state.display_size = None;
        }
    }

    fn clear_container(&mut self, container: &ContainerHandle) {
        if let Some(state) = self.state_mut(container) {
            state.clear_count += 1;
        }
    }
}
