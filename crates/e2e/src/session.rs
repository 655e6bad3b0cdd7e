//! Authentication session persistence
//!
//! Logging in is slow and rate-limited, so the browser reuses a saved
//! storage-state file across runs. When no state exists the harness logs in
//! once with credentials from the environment and saves the resulting
//! state. A login failure attaches the captured page screenshot to the
//! report sink before propagating.

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use boardsync_core::ReportSink;

use crate::board::require_env;
use crate::browser::{check_playwright_installed, js_string, run_node};
use crate::error::{HarnessError, HarnessResult};

const EMAIL_INPUT: &str = r#"[data-testid="username"]"#;
const PASSWORD_INPUT: &str = r#"[data-testid="password"]"#;
const LOGIN_SUBMIT_BTN: &str = r#"[data-testid="login-submit-idf-testid"]"#;
const MEMBER_MENU: &str = r#"[data-testid="header-member-menu-button"]"#;

/// Configuration for establishing a browser session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// URL of the login page.
    pub login_url: String,

    /// Where the storage state is saved and reloaded from.
    pub state_file: PathBuf,

    pub headless: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_url: String::new(),
            state_file: PathBuf::from("state.json"),
            headless: true,
        }
    }
}

/// Make sure a usable storage state exists at `config.state_file`.
///
/// An existing file is reused as-is; its validity is checked later by the
/// board page's auth-wall detection. Otherwise a one-time login runs with
/// `BOARD_EMAIL`/`BOARD_PASSWORD` from the environment - both missing
/// credentials and a failed login are fatal setup errors.
pub async fn ensure_storage_state(
    config: &SessionConfig,
    sink: &dyn ReportSink,
) -> HarnessResult<()> {
    if config.state_file.exists() {
        info!(
            "Reusing existing authentication state from {}",
            config.state_file.display()
        );
        return Ok(());
    }

    warn!(
        "No saved state at {}. Attempting automatic login (may fail behind 2FA)...",
        config.state_file.display()
    );
    check_playwright_installed()?;

    let email = require_env("BOARD_EMAIL")?;
    let password = require_env("BOARD_PASSWORD")?;

    let screenshot_dir = tempfile::tempdir()?;
    let screenshot_path = screenshot_dir.path().join("login-failure.png");

    let script = build_login_script(config, &email, &password, &screenshot_path);

    match run_node(&script).await {
        Ok(_) => {
            info!("Login succeeded, state saved to {}", config.state_file.display());
            Ok(())
        }
        Err(HarnessError::Browser(message)) => {
            if let Ok(bytes) = std::fs::read(&screenshot_path) {
                sink.attach_bytes("login-failure.png", &bytes);
            }
            Err(HarnessError::LoginFailed(message))
        }
        Err(other) => Err(other),
    }
}

fn build_login_script(
    config: &SessionConfig,
    email: &str,
    password: &str,
    screenshot_path: &Path,
) -> String {
    format!(
        r#"const {{ chromium }} = require('playwright');

const emit = (obj) => console.log('\n' + JSON.stringify(obj));

(async () => {{
  const browser = await chromium.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: 1920, height: 1080 }}
  }});
  const page = await context.newPage();

  try {{
    await page.goto({login_url});
    await page.waitForSelector('{email_input}');
    await page.fill('{email_input}', {email});
    await page.click('{submit_btn}');

    await page.waitForSelector('{password_input}');
    await page.fill('{password_input}', {password});
    await page.click('{submit_btn}');

    await page.waitForSelector('{member_menu}', {{ timeout: 60000 }});
    await context.storageState({{ path: {state_file} }});
    emit({{ saved: true }});
  }} catch (error) {{
    try {{ await page.screenshot({{ path: {screenshot} }}); }} catch (e) {{}}
    emit({{ error: 'login did not reach a user session: ' + error.message }});
    process.exitCode = 1;
  }} finally {{
    await browser.close();
  }}
}})();
"#,
        headless = config.headless,
        login_url = js_string(&config.login_url),
        email_input = EMAIL_INPUT,
        password_input = PASSWORD_INPUT,
        submit_btn = LOGIN_SUBMIT_BTN,
        member_menu = MEMBER_MENU,
        email = js_string(email),
        password = js_string(password),
        state_file = js_string(&config.state_file.to_string_lossy()),
        screenshot = js_string(&screenshot_path.to_string_lossy()),
    )
}
