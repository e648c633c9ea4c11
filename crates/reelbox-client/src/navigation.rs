/// Logical destinations the client can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Login entry point; the only place an invalidated session goes.
    Login,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
        }
    }
}

/// The UI boundary. Implementations replace the current location rather than
/// pushing onto history, so the user cannot go back into an authenticated
/// view with a stale session. Replacing onto the active route must be a no-op.
pub trait Navigator: Send + Sync {
    fn replace(&self, route: Route);
}

/// For headless use where there is nothing to navigate.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn replace(&self, _route: Route) {}
}
