use std::sync::Arc;
use std::time::Duration;

use action_chain::fake::FakePage;
use action_chain::{
    ActionOpt, ChainPolicy, ChainRunner, ChainRunnerBuilder, ExecCtx, PortError,
};
use pagemend_core_types::{LocatorSet, LocatorStrategy};

fn runner_over(policy: ChainPolicy, page: &Arc<FakePage>) -> Arc<dyn ChainRunner> {
    ChainRunnerBuilder::new(policy)
        .with_page(page.clone())
        .build()
}

fn login_button() -> LocatorSet {
    LocatorSet::new("login button", LocatorStrategy::id("#login"))
        .or(LocatorStrategy::css("[name=login]"))
        .or(LocatorStrategy::text("Login"))
}

fn ctx() -> ExecCtx {
    ExecCtx::with_timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn primary_success_leaves_fallbacks_untouched() {
    let page = Arc::new(FakePage::new());
    page.add_element("#login", "Login");
    let runner = runner_over(ChainPolicy::default(), &page);

    let report = runner
        .click_report(&ctx(), &login_button(), &ActionOpt::default())
        .await
        .expect("primary resolves");

    assert!(report.ok);
    assert_eq!(report.rank_used, Some(0));
    assert!(!report.drifted());
    assert!(report.attempts.is_empty());
    assert_eq!(page.attempted_selectors(), ["id:#login"]);
}

#[tokio::test]
async fn fallback_takes_over_when_primary_drifts() {
    let page = Arc::new(FakePage::new());
    page.add_element("[name=login]", "");
    let runner = runner_over(ChainPolicy::default(), &page);

    let report = runner
        .fill_report(&ctx(), &login_button(), "user@example.com", &ActionOpt::default())
        .await
        .expect("fallback resolves");

    assert!(report.ok);
    assert!(report.drifted());
    assert_eq!(report.rank_used, Some(1));
    assert_eq!(report.strategy_used.as_deref(), Some("css:[name=login]"));
    assert_eq!(report.attempts.len(), 1);
    // The second fallback was never consulted.
    assert_eq!(
        page.attempted_selectors(),
        ["id:#login", "css:[name=login]"]
    );
    assert_eq!(
        page.value_of("[name=login]").as_deref(),
        Some("user@example.com")
    );
}

#[tokio::test]
async fn exhaustion_reports_every_strategy_and_reason() {
    let page = Arc::new(FakePage::new());
    page.fail_with(
        "#login",
        PortError::Timeout {
            selector: "#login".into(),
            ms: 5000,
        },
    );
    page.fail_with(
        "[name=login]",
        PortError::NotInteractable {
            selector: "[name=login]".into(),
            reason: "covered by overlay".into(),
        },
    );
    let runner = runner_over(ChainPolicy::default(), &page);

    let err = runner
        .click_report(&ctx(), &login_button(), &ActionOpt::default())
        .await
        .expect_err("all strategies fail");
    let message = err.to_string();

    assert!(
        message.starts_with("all 3 locator strategies failed for 'login button':"),
        "unexpected message: {message}"
    );
    let first = message.find("id:#login").expect("primary listed");
    let second = message.find("css:[name=login]").expect("fallback listed");
    let third = message.find("text:Login").expect("last fallback listed");
    assert!(first < second && second < third);
    assert!(message.contains("timed out after 5000ms"));
    assert!(message.contains("covered by overlay"));
    assert!(message.contains("no element matches Login"));
    // One attempt per strategy, no retries.
    assert_eq!(page.attempted_selectors().len(), 3);
}

#[tokio::test]
async fn failed_runs_are_idempotent() {
    let page = Arc::new(FakePage::new());
    let runner = runner_over(ChainPolicy::default(), &page);
    let opt = ActionOpt::default();

    let first = runner
        .click_report(&ctx(), &login_button(), &opt)
        .await
        .expect_err("nothing resolves");
    let second = runner
        .click_report(&ctx(), &login_button(), &opt)
        .await
        .expect_err("still nothing resolves");

    assert_eq!(first.to_string(), second.to_string());
    let attempted = page.attempted_selectors();
    assert_eq!(attempted.len(), 6);
    assert_eq!(attempted[..3], attempted[3..]);
}

#[tokio::test]
async fn cancelled_context_rejects_without_touching_the_page() {
    let page = Arc::new(FakePage::new());
    page.add_element("#login", "Login");
    let runner = runner_over(ChainPolicy::default(), &page);

    let ctx = ctx();
    ctx.cancel.cancel();
    let err = runner
        .click_report(&ctx, &login_button(), &ActionOpt::default())
        .await
        .expect_err("cancelled up front");

    assert_eq!(err.to_string(), "operation cancelled");
    assert!(page.calls().is_empty());
}

#[tokio::test]
async fn expired_deadline_rejects_before_attempting() {
    let page = Arc::new(FakePage::new());
    page.add_element("#login", "Login");
    let runner = runner_over(ChainPolicy::default(), &page);

    let err = runner
        .click_report(
            &ExecCtx::with_timeout(Duration::ZERO),
            &login_button(),
            &ActionOpt::default(),
        )
        .await
        .expect_err("deadline already passed");

    assert!(err.to_string().contains("context deadline exceeded"));
    assert!(page.calls().is_empty());
}

#[tokio::test]
async fn timeout_override_reaches_the_port() {
    let page = Arc::new(FakePage::new());
    page.add_element("#login", "Login");
    let runner = runner_over(ChainPolicy::default(), &page);

    runner
        .click_report(
            &ctx(),
            &login_button(),
            &ActionOpt {
                timeout_ms: Some(250),
            },
        )
        .await
        .expect("primary resolves");

    let calls = page.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].timeout_ms, 250);
}

#[tokio::test]
async fn attempt_timeout_clamps_to_the_context_deadline() {
    let page = Arc::new(FakePage::new());
    page.add_element("#login", "Login");
    let runner = runner_over(ChainPolicy::default(), &page);

    // Policy default for click is 5000ms; the context only has one second.
    runner
        .click_report(
            &ExecCtx::with_timeout(Duration::from_secs(1)),
            &login_button(),
            &ActionOpt::default(),
        )
        .await
        .expect("primary resolves");

    let calls = page.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].timeout_ms <= 1000, "got {}ms", calls[0].timeout_ms);
    assert!(calls[0].timeout_ms > 0);
}

#[tokio::test]
async fn disabled_policy_rejects_actions_and_title() {
    let page = Arc::new(FakePage::new());
    page.add_element("#login", "Login");
    let policy = ChainPolicy {
        enabled: false,
        ..ChainPolicy::default()
    };
    let runner = runner_over(policy, &page);

    let err = runner
        .click(&login_button(), &ActionOpt::default())
        .await
        .expect_err("chain disabled");
    assert!(err.to_string().contains("disabled by policy"));

    let err = runner.page_title().await.expect_err("chain disabled");
    assert!(err.to_string().contains("disabled by policy"));
    assert!(page.calls().is_empty());
}

#[tokio::test]
async fn text_returns_content_through_a_fallback() {
    let page = Arc::new(FakePage::new());
    page.add_element("Login", "Sign in to your account");
    let runner = runner_over(ChainPolicy::default(), &page);

    let (text, report) = runner
        .text_report(&ctx(), &login_button(), &ActionOpt::default())
        .await
        .expect("last fallback resolves");

    assert_eq!(text, "Sign in to your account");
    assert_eq!(report.rank_used, Some(2));
    assert_eq!(
        page.attempted_selectors(),
        ["id:#login", "css:[name=login]", "text:Login"]
    );
}

#[tokio::test]
async fn plain_actions_build_their_own_context() {
    let page = Arc::new(FakePage::new());
    page.add_element("#login", "Login");
    let runner = runner_over(ChainPolicy::default(), &page);

    runner
        .fill(
            &login_button(),
            "user@example.com",
            &ActionOpt {
                timeout_ms: Some(100),
            },
        )
        .await
        .expect("primary resolves");

    assert_eq!(page.value_of("#login").as_deref(), Some("user@example.com"));
    let calls = page.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].timeout_ms, 100);
}

#[tokio::test]
async fn page_title_passes_through() {
    let page = Arc::new(FakePage::new());
    page.set_title("Dashboard");
    let runner = runner_over(ChainPolicy::default(), &page);

    let title = runner.page_title().await.expect("title available");
    assert_eq!(title, "Dashboard");
}

#[tokio::test]
async fn login_flow_spans_multiple_elements() {
    let page = Arc::new(FakePage::new());
    page.add_element("#username", "");
    page.add_element("button[type=submit]", "Log in");
    let runner = runner_over(ChainPolicy::default(), &page);

    let username = LocatorSet::new("username field", LocatorStrategy::id("#username"))
        .or(LocatorStrategy::css("[name=username]"));
    let submit = LocatorSet::new(
        "submit button",
        LocatorStrategy::css("button[type=submit]"),
    )
    .or(LocatorStrategy::text("Log in"));

    runner
        .fill(&username, "jdoe", &ActionOpt::default())
        .await
        .expect("username fills");
    runner
        .click(&submit, &ActionOpt::default())
        .await
        .expect("submit clicks");

    assert_eq!(page.value_of("#username").as_deref(), Some("jdoe"));
    let actions: Vec<_> = page.calls().iter().map(|call| call.action).collect();
    assert_eq!(actions, ["fill", "click"]);
}
