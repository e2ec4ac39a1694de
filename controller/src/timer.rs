//! Periodic tick scheduling.

use std::{
    sync::mpsc::{self, RecvTimeoutError},
    thread::{self, JoinHandle},
    time::Duration,
};

/// Arms and cancels the periodic tick that drives a running simulation.
pub trait Scheduler {
    /// Starts firing every `interval`, replacing any previously armed timer.
    fn arm(&mut self, interval: Duration);

    /// Stops firing. Cancelling an idle scheduler has no effect.
    fn cancel(&mut self);
}

/// Scheduler that never fires on its own; callers drive ticks by hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManualScheduler {
    armed: Option<Duration>,
    arm_count: u32,
}

impl ManualScheduler {
    /// Creates an idle scheduler.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            armed: None,
            arm_count: 0,
        }
    }

    /// Interval of the currently armed timer, if any.
    #[must_use]
    pub const fn armed(&self) -> Option<Duration> {
        self.armed
    }

    /// Number of times the scheduler has been armed.
    #[must_use]
    pub const fn arm_count(&self) -> u32 {
        self.arm_count
    }
}

impl Scheduler for ManualScheduler {
    fn arm(&mut self, interval: Duration) {
        self.armed = Some(interval);
        self.arm_count = self.arm_count.saturating_add(1);
    }

    fn cancel(&mut self) {
        self.armed = None;
    }
}

/// Scheduler backed by a background thread that posts `signal` into a channel.
///
/// The timer thread never touches simulation state. The owner of the
/// receiving end drains the signals on its own thread and ticks the
/// controller once per signal.
#[derive(Debug)]
pub struct IntervalTimer<T>
where
    T: Clone + Send + 'static,
{
    target: mpsc::Sender<T>,
    signal: T,
    active: Option<ActiveTimer>,
}

#[derive(Debug)]
struct ActiveTimer {
    stop: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

impl<T> IntervalTimer<T>
where
    T: Clone + Send + 'static,
{
    /// Creates an idle timer that will post `signal` to `target` once armed.
    #[must_use]
    pub fn new(target: mpsc::Sender<T>, signal: T) -> Self {
        Self {
            target,
            signal,
            active: None,
        }
    }

    /// Reports whether a timer thread is currently running.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.active.is_some()
    }
}

impl<T> Scheduler for IntervalTimer<T>
where
    T: Clone + Send + 'static,
{
    fn arm(&mut self, interval: Duration) {
        self.cancel();

        let (stop, stopped) = mpsc::channel::<()>();
        let target = self.target.clone();
        let signal = self.signal.clone();
        let spawned = thread::Builder::new()
            .name("life-timer".to_owned())
            .spawn(move || loop {
                match stopped.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        if target.send(signal.clone()).is_err() {
                            break;
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            });

        match spawned {
            Ok(handle) => self.active = Some(ActiveTimer { stop, handle }),
            Err(error) => log::error!("failed to spawn tick timer: {error}"),
        }
    }

    fn cancel(&mut self) {
        let Some(ActiveTimer { stop, handle }) = self.active.take() else {
            return;
        };

        drop(stop);
        if handle.join().is_err() {
            log::warn!("tick timer thread panicked");
        }
    }
}

impl<T> Drop for IntervalTimer<T>
where
    T: Clone + Send + 'static,
{
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_timer_fires_until_cancelled() {
        let (sender, receiver) = mpsc::channel();
        let mut timer = IntervalTimer::new(sender, 7_u8);

        timer.arm(Duration::from_millis(5));
        assert!(timer.is_armed());
        for _ in 0..3 {
            let signal = receiver
                .recv_timeout(Duration::from_secs(2))
                .expect("armed timer fires");
            assert_eq!(signal, 7);
        }

        timer.cancel();
        assert!(!timer.is_armed());
        while receiver.try_recv().is_ok() {}
        thread::sleep(Duration::from_millis(30));
        assert!(
            receiver.try_recv().is_err(),
            "a cancelled timer must not fire again",
        );
    }

    #[test]
    fn rearming_replaces_the_running_timer() {
        let (sender, receiver) = mpsc::channel();
        let mut timer = IntervalTimer::new(sender, ());

        timer.arm(Duration::from_secs(60));
        timer.arm(Duration::from_millis(5));

        assert!(receiver.recv_timeout(Duration::from_secs(2)).is_ok());
    }

    #[test]
    fn manual_scheduler_tracks_arming() {
        let mut scheduler = ManualScheduler::new();
        scheduler.arm(Duration::from_millis(100));
        scheduler.arm(Duration::from_millis(100));
        assert_eq!(scheduler.armed(), Some(Duration::from_millis(100)));
        assert_eq!(scheduler.arm_count(), 2);

        scheduler.cancel();
        assert_eq!(scheduler.armed(), None);
    }
}
