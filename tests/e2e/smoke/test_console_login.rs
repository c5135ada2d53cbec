//! Smoke test: console login
//!
//! Provision the tenant's test user, wait for the console, sign in through
//! the hosted login form and check the environments list renders.
//!
//! The hard timeouts sit inside the suite body so the test user is always
//! deleted, even when a step times out.

use sso_console_e2e::{run_suite, LoginFlow, SuiteContext};

use crate::common::{
    harness::start_suite,
    timeout::{with_timeout, TestTimeout},
};

async fn console_login(ctx: &SuiteContext) -> anyhow::Result<()> {
    let attempt = with_timeout(TestTimeout::reachability("Console reachability"), async {
        Ok(ctx.wait_until_console_reachable().await?)
    })
    .await?;
    println!("✓ Console reachable after {} attempt(s)", attempt.attempt_number);

    let user = ctx.test_user().clone();
    let console_url = ctx.console_url().to_string();
    with_timeout(TestTimeout::browser("Console login"), async {
        Ok(ctx
            .run_test(|browser| async move {
                let flow = LoginFlow::new(browser.as_ref(), &console_url);
                flow.login(&user.username, &user.password).await?;
                println!("✓ Login submitted as {}", user.username);
                flow.assert_post_login_page_visible().await
            })
            .await?)
    })
    .await
}

#[tokio::test]
#[ignore = "requires RUN_E2E=1"]
async fn smoke_test_user_can_log_in_to_console() {
    let context = start_suite("smoke_test_user_can_log_in_to_console")
        .await
        .expect("Suite setup should succeed");

    let outcome = run_suite(context, |ctx| async move { Ok(console_login(&ctx).await) })
        .await
        .expect("Suite teardown should succeed");

    outcome.expect("User should be able to log in to the console");

    println!("🚀 Console login smoke test PASSED");
}
