//! Render worker that owns the canvas and consumes surface messages.

use std::{
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Instant,
};

use life_core::ChangeSet;

use crate::{paint, Canvas, FrameLimiter, RenderingError, SurfaceDimensions, FRAMES_PER_SECOND};

/// Messages accepted by the render worker, delivered in FIFO order.
#[derive(Debug)]
pub enum SurfaceMessage<C> {
    /// Hands the drawable surface to the worker. Sent once before any cells.
    Init {
        /// Canvas the worker paints onto.
        canvas: C,
        /// Pixel dimensions of the canvas.
        dimensions: SurfaceDimensions,
    },
    /// Replaces the displayed live cells.
    Update(ChangeSet),
    /// Stops the worker.
    Shutdown,
}

/// Sending half of the worker's message channel.
#[derive(Debug)]
pub struct SurfaceSender<C> {
    messages: Sender<SurfaceMessage<C>>,
}

impl<C> Clone for SurfaceSender<C> {
    fn clone(&self) -> Self {
        Self {
            messages: self.messages.clone(),
        }
    }
}

impl<C> SurfaceSender<C> {
    /// Sends the surface-init message. Returns `false` once the worker is gone.
    pub fn init(&self, canvas: C, dimensions: SurfaceDimensions) -> bool {
        self.send(SurfaceMessage::Init { canvas, dimensions })
    }

    /// Sends a cell update. Returns `false` once the worker is gone.
    pub fn update(&self, change_set: ChangeSet) -> bool {
        self.send(SurfaceMessage::Update(change_set))
    }

    /// Asks the worker to stop. Returns `false` once the worker is gone.
    pub fn shutdown(&self) -> bool {
        self.send(SurfaceMessage::Shutdown)
    }

    fn send(&self, message: SurfaceMessage<C>) -> bool {
        self.messages.send(message).is_ok()
    }
}

/// Handle to a spawned render worker thread.
///
/// The worker waits for [`SurfaceMessage::Init`], keeps only the most recent
/// change-set, and paints it at the next frame permitted by its
/// [`FrameLimiter`]. It exits on [`SurfaceMessage::Shutdown`] or when every
/// sender has been dropped.
#[derive(Debug)]
pub struct SurfaceWorker<C> {
    sender: SurfaceSender<C>,
    handle: Option<JoinHandle<u64>>,
}

impl<C> SurfaceWorker<C>
where
    C: Canvas + Send + 'static,
{
    /// Spawns a worker painting at most [`FRAMES_PER_SECOND`] frames per second.
    pub fn spawn() -> Result<Self, RenderingError> {
        Self::spawn_with_rate(FRAMES_PER_SECOND)
    }

    /// Spawns a worker painting at most `frames_per_second` frames per second.
    pub fn spawn_with_rate(frames_per_second: u32) -> Result<Self, RenderingError> {
        let (messages, inbox) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("life-render".to_owned())
            .spawn(move || run(&inbox, FrameLimiter::new(frames_per_second)))
            .map_err(RenderingError::Spawn)?;

        log::debug!("render worker spawned");
        Ok(Self {
            sender: SurfaceSender { messages },
            handle: Some(handle),
        })
    }

    /// New sender feeding this worker.
    #[must_use]
    pub fn sender(&self) -> SurfaceSender<C> {
        self.sender.clone()
    }

    /// Reports whether the worker thread has not been joined yet.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Stops the worker and waits for it, returning the number of frames painted.
    ///
    /// Later calls return zero.
    pub fn shutdown(&mut self) -> u64 {
        let Some(handle) = self.handle.take() else {
            return 0;
        };

        let _ = self.sender.shutdown();
        match handle.join() {
            Ok(painted) => {
                log::debug!("render worker stopped after {painted} frames");
                painted
            }
            Err(_) => {
                log::error!("render worker panicked");
                0
            }
        }
    }
}

impl<C> Drop for SurfaceWorker<C> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.sender.shutdown();
            if handle.join().is_err() {
                log::error!("render worker panicked");
            }
        }
    }
}

fn run<C>(inbox: &Receiver<SurfaceMessage<C>>, mut limiter: FrameLimiter) -> u64
where
    C: Canvas,
{
    let mut surface: Option<(C, SurfaceDimensions)> = None;
    let mut latest = ChangeSet::default();
    let mut dirty = false;
    let mut painted = 0;

    loop {
        let message = if dirty && surface.is_some() {
            match inbox.recv_timeout(limiter.remaining(Instant::now())) {
                Ok(message) => Some(message),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match inbox.recv() {
                Ok(message) => Some(message),
                Err(_) => break,
            }
        };

        match message {
            Some(SurfaceMessage::Init { canvas, dimensions }) => {
                if surface.is_some() {
                    log::warn!("render surface initialised twice; replacing canvas");
                }
                surface = Some((canvas, dimensions));
                dirty = true;
            }
            Some(SurfaceMessage::Update(change_set)) => {
                latest = change_set;
                dirty = true;
            }
            Some(SurfaceMessage::Shutdown) => break,
            None => {}
        }

        if !dirty {
            continue;
        }
        if let Some((canvas, dimensions)) = surface.as_mut() {
            if limiter.permit(Instant::now()) {
                paint(canvas, *dimensions, &latest);
                painted += 1;
                dirty = false;
            }
        }
    }

    painted
}
