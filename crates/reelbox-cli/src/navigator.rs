use owo_colors::OwoColorize;
use reelbox_client::{Navigator, Route};
use std::sync::atomic::{AtomicBool, Ordering};

/// Terminal stand-in for the login redirect. There is no screen to replace,
/// so the user is told how to get back in. Repeated redirects in one run
/// print nothing new.
#[derive(Debug, Default)]
pub struct CliNavigator {
    shown: AtomicBool,
}

impl CliNavigator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Navigator for CliNavigator {
    fn replace(&self, route: Route) {
        if self.shown.swap(true, Ordering::SeqCst) {
            return;
        }
        match route {
            Route::Login => {
                tracing::debug!(route = route.path(), "Redirecting to login");
                eprintln!(
                    "{} Your session has ended. Run {} to sign in again.",
                    "→".yellow(),
                    "reelbox login".bold()
                );
            }
        }
    }
}
