/*
[INPUT]:  Session state store and the configured login route
[OUTPUT]: Render/Defer/Redirect decisions, re-evaluated on every transition
[POS]:    Routing layer - gates protected views on authentication state
[UPDATE]: When the access policy or redirect target handling changes
*/

use tracing::debug;

use crate::session::{SessionStore, Subscription};
use crate::types::SessionState;

/// Outcome of evaluating a protected-view request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session is authenticated; show the protected view
    Render,
    /// Resumption is still outstanding; show a neutral pending indicator
    /// and re-evaluate on the next state change
    Defer,
    /// No session; navigate to the login entry point
    Redirect { to: String },
}

/// Access policy for protected views
///
/// Evaluates the session store on demand and, while a protected view is
/// mounted, re-evaluates after every store transition via `watch`.
pub struct RouteGuard {
    store: SessionStore,
    login_route: String,
}

impl RouteGuard {
    /// Create a guard over the given store, redirecting to `login_route`
    pub fn new(store: SessionStore, login_route: impl Into<String>) -> Self {
        Self {
            store,
            login_route: login_route.into(),
        }
    }

    /// Pure decision over a state snapshot
    pub fn decide(state: &SessionState, login_route: &str) -> RouteDecision {
        if state.loading {
            RouteDecision::Defer
        } else if state.is_authenticated() {
            RouteDecision::Render
        } else {
            RouteDecision::Redirect {
                to: login_route.to_string(),
            }
        }
    }

    /// Evaluate the current store state
    pub fn evaluate(&self) -> RouteDecision {
        let decision = Self::decide(&self.store.state(), &self.login_route);
        debug!(?decision, "route guard evaluated");
        decision
    }

    /// Evaluate now and after every store transition
    ///
    /// `on_decision` is called once immediately with the current decision,
    /// then again after each transition for the lifetime of the returned
    /// subscription. Dropping the subscription corresponds to unmounting the
    /// protected view.
    pub fn watch<F>(&self, on_decision: F) -> Subscription
    where
        F: Fn(RouteDecision) + Send + Sync + 'static,
    {
        on_decision(self.evaluate());

        let login_route = self.login_route.clone();
        self.store.subscribe(move |state| {
            on_decision(Self::decide(state, &login_route));
        })
    }
}
