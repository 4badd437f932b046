//! Homework status poller.
//!
//! One iteration: fetch updates since the cursor, validate the body,
//! turn the newest homework into a message and send it if it differs
//! from the last one. Errors never stop the loop; they are reported
//! (once per distinct message) and the poller waits for the next round.

use chrono::Utc;
use std::future::Future;
use tokio::time;
use tracing::{debug, error, info, warn};

use crate::api::HomeworkSource;
use crate::config::RetryPolicy;
use crate::error::{BotError, Result};
use crate::notifier::Notifier;
use crate::response::check_response;
use crate::status::parse_status;

/// What a successful iteration did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Iteration {
    /// A new message was produced and handed to the notifier.
    Notified(String),
    /// The newest homework still maps to the last message.
    Unchanged,
    /// The window contained no homework.
    NoHomework,
}

pub struct Poller<S, N> {
    source: S,
    notifier: N,
    retry: RetryPolicy,
    cursor: i64,
    last_status_message: Option<String>,
    last_error_message: Option<String>,
}

impl<S: HomeworkSource, N: Notifier> Poller<S, N> {
    /// The cursor starts at the current time.
    pub fn new(source: S, notifier: N, retry: RetryPolicy) -> Self {
        Self::with_cursor(source, notifier, retry, Utc::now().timestamp())
    }

    pub fn with_cursor(source: S, notifier: N, retry: RetryPolicy, cursor: i64) -> Self {
        Self {
            source,
            notifier,
            retry,
            cursor,
            last_status_message: None,
            last_error_message: None,
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// The last status notification produced.
    pub fn last_message(&self) -> Option<&str> {
        self.last_status_message.as_deref()
    }

    /// Fetch, validate and act on one response. Errors are returned as-is.
    pub async fn poll_once(&mut self) -> Result<Iteration> {
        let body = self.source.fetch_updates(self.cursor).await?;
        let response = check_response(&body)?;

        let outcome = match response.latest() {
            Some(homework) => {
                let message = parse_status(homework)?;
                if self.last_status_message.as_deref() == Some(message.as_str()) {
                    info!("Status unchanged: {}", message);
                    Iteration::Unchanged
                } else {
                    self.deliver(&message).await;
                    self.last_status_message = Some(message.clone());
                    Iteration::Notified(message)
                }
            }
            None => {
                info!("No homework in this window");
                Iteration::NoHomework
            }
        };

        debug!(from = self.cursor, to = response.current_date, "Advancing cursor");
        self.cursor = response.current_date;
        self.last_error_message = None;
        Ok(outcome)
    }

    /// One iteration with the error path folded in: a failure becomes a
    /// chat message, sent only if it differs from the previous failure.
    /// Failures do not touch the status used for duplicate suppression.
    pub async fn tick(&mut self) -> Option<Iteration> {
        match self.poll_once().await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                self.report_failure(&e).await;
                None
            }
        }
    }

    /// Poll forever, sleeping `retry.interval` between iterations, until
    /// `shutdown` resolves.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(
            interval_secs = self.retry.interval.as_secs(),
            cursor = self.cursor,
            "📡 Homework poller starting"
        );
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = self.tick() => {}
            }
            tokio::select! {
                _ = &mut shutdown => break,
                _ = time::sleep(self.retry.interval) => {}
            }
        }

        info!("Homework poller stopped");
    }

    async fn report_failure(&mut self, e: &BotError) {
        let message = format!("Сбой в работе программы: {e}");
        error!("{}", message);
        if self.last_error_message.as_deref() == Some(message.as_str()) {
            debug!("Same failure as last time, not re-sending");
            return;
        }
        self.deliver(&message).await;
        self.last_error_message = Some(message);
    }

    // Delivery failures are logged and dropped; the loop carries on.
    async fn deliver(&self, message: &str) {
        if let Err(e) = self.notifier.send(message).await {
            warn!("Notification dropped: {}", e);
        }
    }
}
