//! View lifetimes and the tokens that scope remote calls to them.
//!
//! Every activation of a view owns one [`ViewLifetime`]. The sync units hold a
//! [`ViewToken`] and run each remote call through [`ViewToken::run`]; once the
//! lifetime ends the call is dropped and its response never reaches local
//! state.

use std::future::Future;
use tokio::sync::watch;

/// The activation scope of one view. Ends on [`ViewLifetime::end`] or drop.
#[derive(Debug)]
pub struct ViewLifetime {
    tx: watch::Sender<bool>,
}

impl ViewLifetime {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn token(&self) -> ViewToken {
        ViewToken {
            rx: self.tx.subscribe(),
        }
    }

    pub fn end(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_ended(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for ViewLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ViewLifetime {
    fn drop(&mut self) {
        self.tx.send_replace(true);
    }
}

/// Handle on a [`ViewLifetime`], held by whatever issues calls for the view.
#[derive(Debug, Clone)]
pub struct ViewToken {
    rx: watch::Receiver<bool>,
}

impl ViewToken {
    /// A token bound to no view; it never ends.
    pub fn detached() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    pub fn is_ended(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the lifetime has ended.
    pub async fn ended(&self) {
        let mut rx = self.rx.clone();
        let closed = rx.wait_for(|ended| *ended).await.is_err();
        if closed {
            // Sender gone without ending: a detached token.
            std::future::pending::<()>().await;
        }
    }

    /// Runs `fut` unless the lifetime ends first.
    ///
    /// Returns `None` when the lifetime ended before `fut` completed; `fut`
    /// is dropped at that point.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.is_ended() {
            return None;
        }

        tokio::select! {
            biased;
            _ = self.ended() => None,
            output = fut => Some(output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_completes_while_active() {
        let lifetime = ViewLifetime::new();
        let token = lifetime.token();

        assert_eq!(token.run(async { 5 }).await, Some(5));
    }

    #[tokio::test]
    async fn test_run_after_end_skips_future() {
        let lifetime = ViewLifetime::new();
        let token = lifetime.token();
        assert!(!lifetime.is_ended());
        lifetime.end();
        assert!(lifetime.is_ended());

        let mut polled = false;
        let result = token
            .run(async {
                polled = true;
            })
            .await;

        assert!(result.is_none());
        assert!(!polled);
        assert!(token.is_ended());
    }

    #[tokio::test]
    async fn test_end_cancels_in_flight_future() {
        let lifetime = ViewLifetime::new();
        let token = lifetime.token();

        let slow = token.run(async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            "late"
        });
        let ender = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            lifetime.end();
        };

        let (result, _) = tokio::join!(slow, ender);
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_drop_ends_lifetime() {
        let lifetime = ViewLifetime::new();
        let token = lifetime.token();
        drop(lifetime);

        assert!(token.is_ended());
        assert_eq!(token.run(async { 1 }).await, None);
    }

    #[tokio::test]
    async fn test_detached_token_never_ends() {
        let token = ViewToken::detached();

        assert!(!token.is_ended());
        assert_eq!(token.run(async { "done" }).await, Some("done"));
    }
}
