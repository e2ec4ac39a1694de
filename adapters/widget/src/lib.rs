#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Embeddable Game of Life widget.
//!
//! [`Game`] binds a simulation controller to a container provided by a
//! [`Host`]. Creating a game validates the container reference, mounts a
//! drawable surface, and starts a render worker fed with change-sets. Hosts
//! forward pointer clicks, resize notifications and timer pumps; everything
//! is torn down again by [`Game::dispose`] or when the game is dropped.

mod game;
mod headless;
mod host;

pub use game::{Game, GameError, GameOptions, HostEvent};
pub use headless::{ContainerState, HeadlessHost};
pub use host::{
    normalize_selector, ContainerHandle, ContainerRef, ElementKind, Host, CONTAINER_CLASS,
};
pub use life_controller::{IgnoreReason, Lifecycle, Outcome};
