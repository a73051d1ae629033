use std::sync::Arc;

use action_chain::{ActionOpt, ChainRunner};
use pagemend_core_types::{LocatorSet, LocatorStrategy, MendError};
use tracing::debug;

/// Collapsible side navigation.
pub struct NavBar {
    runner: Arc<dyn ChainRunner>,
    bar: LocatorSet,
}

impl NavBar {
    pub fn new(runner: Arc<dyn ChainRunner>) -> Self {
        Self {
            runner,
            bar: nav_bar_locators(),
        }
    }

    /// Opens `item` from the side navigation: the bar is expanded first,
    /// then the entry it reveals is clicked.
    pub async fn access_menu(&self, item: &str) -> Result<(), MendError> {
        debug!(item, "opening navigation entry");
        let opt = ActionOpt::default();
        self.runner.click(&self.bar, &opt).await?;
        self.runner.click(&menu_entry(item), &opt).await?;
        Ok(())
    }
}

fn nav_bar_locators() -> LocatorSet {
    LocatorSet::new("navigation bar", LocatorStrategy::id("#nav-bar"))
        .or(LocatorStrategy::css("nav[aria-label='Main']"))
        .or(LocatorStrategy::role("navigation"))
}

fn menu_entry(item: &str) -> LocatorSet {
    LocatorSet::new(
        format!("menu entry '{item}'"),
        LocatorStrategy::css(format!("[data-menu='{item}']")),
    )
    .or(LocatorStrategy::text(item))
}
