use tracing::info;

use crate::{
    feedback::{Feedback, Notification},
    routes::Route,
    states::ClientState,
};

/// Oldest notifications are dropped past this many.
pub const NOTIFICATION_HISTORY: usize = 50;

/// The running client: services and session, the page on screen, and every
/// notification shown so far.
pub struct App {
    state: ClientState,
    route: Route,
    notifications: Vec<Notification>,
}

impl App {
    pub fn new(state: ClientState) -> Self {
        Self {
            state,
            route: Route::Home,
            notifications: Vec::new(),
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn last_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    pub fn navigate(&mut self, route: Route) {
        info!("Navigating to {}", route);
        self.route = route;
    }

    /// Record the notification, then follow the redirect if there is one.
    /// Returns the notification to show.
    pub fn apply(&mut self, feedback: Feedback) -> Notification {
        if let Some(route) = feedback.redirect {
            self.navigate(route);
        }
        if self.notifications.len() >= NOTIFICATION_HISTORY {
            let excess = self.notifications.len() + 1 - NOTIFICATION_HISTORY;
            self.notifications.drain(..excess);
        }
        self.notifications.push(feedback.notification.clone());
        feedback.notification
    }

    pub fn logout(&mut self) -> Notification {
        self.state.session.logout();
        self.apply(Feedback::info("Logged out.").then(Route::Home))
    }
}
