use std::sync::Arc;

use action_chain::ChainRunner;

use crate::header::Header;
use crate::navbar::NavBar;

/// Entry point a page object holds: one shared runner, components on demand.
pub struct Page {
    runner: Arc<dyn ChainRunner>,
}

impl Page {
    pub fn new(runner: Arc<dyn ChainRunner>) -> Self {
        Self { runner }
    }

    pub fn header(&self) -> Header {
        Header::new(self.runner.clone())
    }

    pub fn nav_bar(&self) -> NavBar {
        NavBar::new(self.runner.clone())
    }

    /// Direct access for page objects with element needs of their own.
    pub fn runner(&self) -> Arc<dyn ChainRunner> {
        self.runner.clone()
    }
}
