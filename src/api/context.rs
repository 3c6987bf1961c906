//
//  spotctl
//  api/context.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Context
//!
//! Every client operation takes a [`Context`]. It carries an optional deadline
//! and an optional cancellation signal; [`Context::run`] races a future against
//! both. When the context wins, the in-flight future is dropped (which aborts
//! the HTTP request and releases any lock it holds) and the operation fails
//! with [`ApiError::Cancelled`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use spotctl::api::Context;
//!
//! let (ctx, cancel) = Context::with_timeout(Duration::from_secs(10)).with_cancel();
//! // hand `cancel` to a signal handler, pass `&ctx` to client calls
//! cancel.cancel();
//! assert!(ctx.is_cancelled());
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use super::common::ApiError;

/// Cancellation and deadline scope for client operations.
///
/// Cloning a context shares its cancellation signal.
#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

/// Cancels the [`Context`] it was created with, and every clone of it.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::background().deadline(Instant::now() + timeout)
    }

    /// Sets the deadline, keeping the earlier one if a deadline already exists.
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    /// Attaches a cancellation signal and returns the handle that fires it.
    pub fn with_cancel(mut self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        self.cancel = Some(rx);
        (self, CancelHandle { tx })
    }

    pub fn is_cancelled(&self) -> bool {
        let cancelled = self.cancel.as_ref().is_some_and(|rx| *rx.borrow());
        let expired = self.deadline.is_some_and(|d| Instant::now() >= d);
        cancelled || expired
    }

    /// Runs `operation` unless the context is cancelled or expires first.
    ///
    /// `name` is used in the [`ApiError::Cancelled`] message.
    pub async fn run<F, T>(&self, name: &str, operation: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let cancelled = async {
            match self.cancel.clone() {
                Some(mut rx) => loop {
                    if *rx.borrow_and_update() {
                        break;
                    }
                    if rx.changed().await.is_err() {
                        // handle dropped without cancelling
                        std::future::pending::<()>().await;
                    }
                },
                None => std::future::pending::<()>().await,
            }
        };

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => Err(ApiError::Cancelled(format!("{name}: context cancelled"))),
            _ = expired => Err(ApiError::Cancelled(format!("{name}: deadline exceeded"))),
            result = operation => result,
        }
    }
}
