use shared::domain::Step;
use tracing::info;

use crate::config::RouteTable;

/// Where the flow currently is: an in-app page, or an external URL the user
/// was sent to with a full page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Route(Step),
    External(String),
}

/// Moves between pages after successful submissions. Nothing travels with a
/// navigation; each page collects what it needs.
#[derive(Debug, Clone)]
pub struct Navigator {
    routes: RouteTable,
    current: Location,
    history: Vec<Location>,
}

impl Navigator {
    pub fn new(routes: RouteTable) -> Self {
        Self::starting_at(routes, Step::Register)
    }

    pub fn starting_at(routes: RouteTable, step: Step) -> Self {
        Self {
            routes,
            current: Location::Route(step),
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &Location {
        &self.current
    }

    /// Locations left behind, oldest first.
    pub fn history(&self) -> &[Location] {
        &self.history
    }

    pub fn current_step(&self) -> Option<Step> {
        match self.current {
            Location::Route(step) => Some(step),
            Location::External(_) => None,
        }
    }

    /// Path for routes, the full URL for external locations.
    pub fn href(&self) -> &str {
        match &self.current {
            Location::Route(step) => self.routes.path_for(*step),
            Location::External(url) => url,
        }
    }

    /// True once the flow has left the app.
    pub fn has_left(&self) -> bool {
        matches!(self.current, Location::External(_))
    }

    pub fn push_route(&mut self, step: Step) -> &Location {
        info!(route = self.routes.path_for(step), "navigating");
        self.go(Location::Route(step))
    }

    /// Full page load to `url`, kept byte-for-byte as given.
    pub fn redirect(&mut self, url: impl Into<String>) -> &Location {
        let url = url.into();
        info!(%url, "redirecting");
        self.go(Location::External(url))
    }

    fn go(&mut self, to: Location) -> &Location {
        let from = std::mem::replace(&mut self.current, to);
        self.history.push(from);
        &self.current
    }
}
