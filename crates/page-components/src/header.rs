use std::sync::Arc;

use action_chain::{ActionOpt, ChainRunner};
use expect_adapter::expect;
use pagemend_core_types::{LocatorSet, LocatorStrategy, MendError};
use tracing::debug;

/// Top-of-page banner: page title checks and the account menu.
///
/// The fixed locators are ranked once at construction; per-item locators are
/// derived from the requested name at call time.
pub struct Header {
    runner: Arc<dyn ChainRunner>,
    user_menu: LocatorSet,
    subscriptions: LocatorSet,
}

impl Header {
    pub fn new(runner: Arc<dyn ChainRunner>) -> Self {
        Self {
            runner,
            user_menu: user_menu_locators(),
            subscriptions: subscription_entry_locators(),
        }
    }

    /// Reads the page title and checks it against `expected`, surfacing a
    /// mismatch as a plain error instead of a panic.
    pub async fn validate_page_title(&self, expected: &str) -> Result<(), MendError> {
        debug!(expected, "validating page title");
        let title = self.runner.page_title().await?;
        expect(title.as_str()).to_have_text(expected).soft()?;
        Ok(())
    }

    /// Switches the active app subscription. The three awaits are strictly
    /// ordered: the menu click opens the surface the hover needs, and the
    /// hover reveals the item the final click selects.
    pub async fn select_app_subscription(&self, name: &str) -> Result<(), MendError> {
        debug!(name, "selecting app subscription");
        let opt = ActionOpt::default();
        self.runner.click(&self.user_menu, &opt).await?;
        self.runner.hover(&self.subscriptions, &opt).await?;
        self.runner.click(&subscription_item(name), &opt).await?;
        Ok(())
    }
}

fn user_menu_locators() -> LocatorSet {
    LocatorSet::new("user menu", LocatorStrategy::id("#user-menu"))
        .or(LocatorStrategy::css("[data-testid=user-menu]"))
        .or(LocatorStrategy::role("button[name='Account']"))
}

fn subscription_entry_locators() -> LocatorSet {
    LocatorSet::new("subscriptions entry", LocatorStrategy::id("#subscriptions"))
        .or(LocatorStrategy::css("[data-testid=subscriptions]"))
        .or(LocatorStrategy::text("Subscriptions"))
}

fn subscription_item(name: &str) -> LocatorSet {
    LocatorSet::new(
        format!("subscription '{name}'"),
        LocatorStrategy::css(format!("[data-app='{name}']")),
    )
    .or(LocatorStrategy::text(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_locators_rank_id_before_css_before_semantic() {
        let menu = user_menu_locators();
        let kinds: Vec<_> = menu.strategies().iter().map(|s| s.kind().name()).collect();
        assert_eq!(kinds, ["id", "css", "role"]);

        let entry = subscription_entry_locators();
        assert_eq!(entry.element(), "subscriptions entry");
        assert_eq!(entry.strategies().last().unwrap().selector(), "Subscriptions");
    }

    #[test]
    fn item_locators_carry_the_requested_name() {
        let set = subscription_item("Analytics");
        assert_eq!(set.element(), "subscription 'Analytics'");
        assert_eq!(set.primary().selector(), "[data-app='Analytics']");
        assert_eq!(set.strategies()[1].selector(), "Analytics");
    }
}
