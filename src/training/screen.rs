//! Training Screen
//!
//! Simulated model training: picking images fills a fixed list, training
//! runs a ticking task that bumps progress by a random amount until it
//! reaches 100. No image is read and nothing is trained.
//!
//! The ticking task belongs to the screen. It is aborted on `reset`,
//! `shutdown` and when the screen is dropped.

use crate::training::error::{TrainingError, TrainingResult};
use rand::Rng;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Duration;

/// Shortest interval between ticks; a zero tick is raised to this
pub const MIN_TICK: Duration = Duration::from_millis(1);

/// Progress value at which training is complete
pub const PROGRESS_COMPLETE: f64 = 100.0;

/// Image references "selected" by the picker
pub const SAMPLE_IMAGES: [&str; 3] = [
    "ev-station-solar-canopy.jpg",
    "ev-station-charging-bay.jpg",
    "ev-station-connector-closeup.jpg",
];

/// Figures shown once training completes
pub const RESULT_STATS: [(&str, &str); 3] = [
    ("Accuracy", "94.8%"),
    ("Processing Time", "2.3s per image"),
    ("Optimization Level", "Advanced"),
];

/// Runtime settings for the training screen
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Time between progress ticks
    pub tick: Duration,
    /// Upper bound (exclusive) of the random per-tick increment
    pub max_increment: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(500),
            max_increment: 30.0,
        }
    }
}

/// Phase of the training screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingState {
    Idle,
    Processing,
    Completed,
}

/// Everything the screen renders
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSnapshot {
    pub state: TrainingState,
    /// Raw progress; may overshoot 100 by one increment before completion
    pub progress: f64,
    pub images: Vec<String>,
}

impl TrainingSnapshot {
    fn idle() -> Self {
        Self {
            state: TrainingState::Idle,
            progress: 0.0,
            images: Vec::new(),
        }
    }

    /// Progress clamped for display
    pub fn display_progress(&self) -> f64 {
        self.progress.clamp(0.0, PROGRESS_COMPLETE)
    }
}

/// The setup/training screen
pub struct TrainingScreen {
    config: TrainingConfig,
    snapshot: Arc<watch::Sender<TrainingSnapshot>>,
    task: Option<JoinHandle<()>>,
}

impl TrainingScreen {
    pub fn new(config: TrainingConfig) -> Self {
        let (tx, _rx) = watch::channel(TrainingSnapshot::idle());
        Self {
            config,
            snapshot: Arc::new(tx),
            task: None,
        }
    }

    pub fn snapshot(&self) -> TrainingSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Receive every snapshot change, including ticks from the timer
    pub fn subscribe(&self) -> watch::Receiver<TrainingSnapshot> {
        self.snapshot.subscribe()
    }

    pub fn state(&self) -> TrainingState {
        self.snapshot.borrow().state
    }

    /// Whether the progress timer is still alive
    pub fn is_running(&self) -> bool {
        self.task.as_ref().map(|t| !t.is_finished()).unwrap_or(false)
    }

    /// Fill the picker with the fixed sample images
    pub fn select_images(&mut self) -> TrainingResult<usize> {
        if self.state() == TrainingState::Processing {
            return Err(TrainingError::AlreadyRunning);
        }

        self.snapshot.send_modify(|s| {
            s.images = SAMPLE_IMAGES.iter().map(|i| i.to_string()).collect();
        });
        Ok(SAMPLE_IMAGES.len())
    }

    /// Start the progress timer
    pub fn train(&mut self) -> TrainingResult<()> {
        let snapshot = self.snapshot();
        match snapshot.state {
            TrainingState::Processing => return Err(TrainingError::AlreadyRunning),
            TrainingState::Completed => return Err(TrainingError::AlreadyCompleted),
            TrainingState::Idle => {}
        }
        if snapshot.images.is_empty() {
            return Err(TrainingError::NoImages);
        }

        self.snapshot.send_modify(|s| {
            s.state = TrainingState::Processing;
            s.progress = 0.0;
        });

        tracing::info!(images = snapshot.images.len(), "Training started");
        self.task = Some(Self::spawn_ticker(
            self.snapshot.clone(),
            self.config.clone(),
        ));
        Ok(())
    }

    fn spawn_ticker(
        snapshot: Arc<watch::Sender<TrainingSnapshot>>,
        config: TrainingConfig,
    ) -> JoinHandle<()> {
        let max_increment = config.max_increment.max(1.0);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(config.tick.max(MIN_TICK));

            // Skip the first immediate tick
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let step = rand::thread_rng().gen_range(0.0..max_increment);
                let mut done = false;
                snapshot.send_modify(|s| {
                    if s.progress >= PROGRESS_COMPLETE {
                        s.progress = PROGRESS_COMPLETE;
                        s.state = TrainingState::Completed;
                        done = true;
                    } else {
                        s.progress += step;
                    }
                });

                if done {
                    tracing::info!("Training completed");
                    break;
                }
                tracing::debug!(progress = snapshot.borrow().progress, "Training tick");
            }
        })
    }

    /// Cancel any run and clear the screen
    pub fn reset(&mut self) {
        self.shutdown();
        self.snapshot.send_replace(TrainingSnapshot::idle());
    }

    /// Stop the progress timer, keeping the last snapshot
    pub fn shutdown(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                tracing::debug!("Cancelling training timer");
            }
            task.abort();
        }
    }
}

impl Default for TrainingScreen {
    fn default() -> Self {
        Self::new(TrainingConfig::default())
    }
}

impl Drop for TrainingScreen {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    async fn wait_for_state(
        rx: &mut watch::Receiver<TrainingSnapshot>,
        state: TrainingState,
    ) -> TrainingSnapshot {
        loop {
            if rx.borrow_and_update().state == state {
                return rx.borrow().clone();
            }
            rx.changed().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_train_without_images_fails() {
        let mut screen = TrainingScreen::default();
        assert_eq!(screen.train(), Err(TrainingError::NoImages));
        assert_eq!(screen.state(), TrainingState::Idle);
        assert!(!screen.is_running());
    }

    #[tokio::test]
    async fn test_select_images_fills_fixed_list() {
        let mut screen = TrainingScreen::default();
        assert_eq!(screen.select_images().unwrap(), 3);
        assert_eq!(screen.select_images().unwrap(), 3);

        let snapshot = screen.snapshot();
        assert_eq!(snapshot.images.len(), 3);
        assert_eq!(snapshot.images[0], SAMPLE_IMAGES[0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_training_runs_to_completion() {
        let mut screen = TrainingScreen::default();
        screen.select_images().unwrap();
        screen.train().unwrap();
        assert_eq!(screen.state(), TrainingState::Processing);
        assert_eq!(screen.train(), Err(TrainingError::AlreadyRunning));

        let mut rx = screen.subscribe();
        let done = timeout(
            Duration::from_secs(3600),
            wait_for_state(&mut rx, TrainingState::Completed),
        )
        .await
        .unwrap();

        assert_eq!(done.progress, PROGRESS_COMPLETE);
        assert_eq!(done.display_progress(), PROGRESS_COMPLETE);

        // Give the task a moment to wind down
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!screen.is_running());
        assert_eq!(screen.train(), Err(TrainingError::AlreadyCompleted));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_tick_still_completes() {
        let mut screen = TrainingScreen::new(TrainingConfig {
            tick: Duration::ZERO,
            ..Default::default()
        });
        screen.select_images().unwrap();
        screen.train().unwrap();

        let mut rx = screen.subscribe();
        let done = timeout(
            Duration::from_secs(5),
            wait_for_state(&mut rx, TrainingState::Completed),
        )
        .await
        .unwrap();
        assert_eq!(done.progress, PROGRESS_COMPLETE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_is_monotonic() {
        let mut screen = TrainingScreen::default();
        screen.select_images().unwrap();
        screen.train().unwrap();

        let mut rx = screen.subscribe();
        let mut last = 0.0;
        loop {
            rx.changed().await.unwrap();
            let snapshot = rx.borrow_and_update().clone();
            assert!(snapshot.progress >= last);
            assert!(snapshot.display_progress() <= PROGRESS_COMPLETE);
            last = snapshot.progress;
            if snapshot.state == TrainingState::Completed {
                break;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cancels_timer() {
        let mut screen = TrainingScreen::default();
        screen.select_images().unwrap();
        screen.train().unwrap();
        assert!(screen.is_running());

        screen.reset();
        assert!(!screen.is_running());

        let snapshot = screen.snapshot();
        assert_eq!(snapshot.state, TrainingState::Idle);
        assert_eq!(snapshot.progress, 0.0);
        assert!(snapshot.images.is_empty());

        // Nothing ticks after a reset
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(screen.snapshot(), snapshot);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let mut screen = TrainingScreen::default();
        screen.select_images().unwrap();
        screen.train().unwrap();

        let mut rx = screen.subscribe();
        drop(screen);

        // The channel closes once the aborted task releases its sender
        let closed = timeout(Duration::from_secs(60), async {
            while rx.changed().await.is_ok() {}
        })
        .await;
        assert!(closed.is_ok());
        assert_eq!(rx.borrow().state, TrainingState::Processing);
    }
}
