//! Async tick driver.
//!
//! The driver owns the session and is its only writer. User commands arrive
//! over an mpsc channel; while the session is running a single periodic
//! ticker feeds `Tick` events. The ticker is dropped whenever the session
//! leaves `Running` and re-armed when it comes back, so no tick can land on
//! a paused, stopped or finished session.

use crate::{
    Command, Event, FinishReason, Notification, Program, Result, Session, TimerState,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Default tick period: one real second
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Receives every committed snapshot and notification, in order
///
/// Implementations render the workout and play cues; they never feed
/// anything back into the session.
pub trait SessionObserver {
    fn on_state(&mut self, program: &Program, state: &TimerState);

    fn on_notification(&mut self, _notification: Notification) {}
}

/// Outcome handed to the finish callback and returned from [`Driver::run`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finish {
    pub reason: FinishReason,
    /// Seconds of workout actually run before finishing or stopping
    pub elapsed_seconds: u32,
    /// Final snapshot; the initial snapshot again after a stop
    pub state: TimerState,
}

pub struct Driver<O> {
    session: Session,
    observer: O,
    tick_period: Duration,
}

impl<O: SessionObserver> Driver<O> {
    /// Build a driver for a program, failing fast on an invalid program
    pub fn new(program: Program, observer: O) -> Result<Self> {
        Ok(Self {
            session: Session::new(program)?,
            observer,
            tick_period: DEFAULT_TICK_PERIOD,
        })
    }

    /// Override the tick period; zero is rejected
    pub fn with_tick_period(mut self, period: Duration) -> Result<Self> {
        if period.is_zero() {
            return Err(crate::Error::Driver("tick period must be non-zero".into()));
        }
        self.tick_period = period;
        Ok(self)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Drive the session until it completes, is stopped, or the command
    /// channel closes.
    ///
    /// `on_finish` runs exactly once, after the ticker has been torn down.
    pub async fn run<F>(mut self, mut commands: mpsc::Receiver<Command>, on_finish: F) -> Finish
    where
        F: FnOnce(&Finish),
    {
        self.observer
            .on_state(self.session.program(), self.session.state());

        let mut ticker: Option<Interval> = None;

        let (reason, elapsed_seconds) = loop {
            if self.session.state().is_running() {
                if ticker.is_none() {
                    tracing::debug!("Arming ticker ({:?})", self.tick_period);
                    ticker = Some(arm(self.tick_period));
                }
            } else if ticker.take().is_some() {
                tracing::debug!("Ticker disarmed");
            }

            tokio::select! {
                biased;

                cmd = commands.recv() => match cmd {
                    Some(Command::Stop) => {
                        let elapsed = self.session.state().elapsed_time;
                        self.dispatch(Event::Stop);
                        break (FinishReason::Aborted, elapsed);
                    }
                    Some(cmd) => self.dispatch(cmd.into()),
                    None => {
                        tracing::info!("Command channel closed, abandoning workout");
                        break (FinishReason::Aborted, self.session.state().elapsed_time);
                    }
                },

                _ = next_tick(&mut ticker) => self.dispatch(Event::Tick),
            }

            if self.session.state().is_done() {
                break (FinishReason::Completed, self.session.state().elapsed_time);
            }
        };

        drop(ticker);

        let finish = Finish {
            reason,
            elapsed_seconds,
            state: self.session.state().clone(),
        };
        tracing::info!(
            "Workout '{}' {} after {}s",
            self.session.program().name,
            finish.reason,
            finish.elapsed_seconds
        );
        on_finish(&finish);
        finish
    }

    fn dispatch(&mut self, event: Event) {
        let notifications = self.session.apply(event);
        self.observer
            .on_state(self.session.program(), self.session.state());
        for notification in notifications {
            self.observer.on_notification(notification);
        }
    }
}

fn arm(period: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
