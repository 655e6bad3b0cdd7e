//! Board page automation via Playwright
//!
//! Drives the board UI with generated Node scripts run as subprocesses.
//! Each operation builds one script that prints a single JSON document on
//! stdout; the driver parses that document back into typed records. The
//! surface is deliberately narrow: open the board, read card snippets,
//! extract one card's detail modal.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use tokio::process::Command as TokioCommand;
use tracing::debug;

use boardsync_core::{CardDetails, CardSnippet};

use crate::error::{HarnessError, HarnessResult};

// Selectors are embedded in single-quoted JS strings, so attribute values
// use double quotes.
const CARD_NAME: &str = r#"[data-testid="card-name"]"#;
const CARD_CONTAINER: &str = r#"[data-testid="trello-card"]"#;
const CLOSE_MODAL_BTN: &str = r#"[aria-label="Close dialog"]"#;
const MODAL_TITLE_INPUT: &str = r#"[data-testid="card-back-title-input"]"#;
const MODAL_DESC: &str = ".ak-renderer-document";
const MODAL_LABELS: &str = r#"[data-testid="card-label"]"#;
const MODAL_COLUMN_STATUS: &str = r#"button:has([data-testid="DownIcon"])"#;

/// Configuration for the board page driver.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Full URL of the board under test.
    pub board_url: String,

    /// Saved authentication storage state.
    pub state_file: PathBuf,

    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            board_url: String::new(),
            state_file: PathBuf::from("state.json"),
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
        }
    }
}

/// Handle for driving the board UI.
pub struct BoardPage {
    config: BrowserConfig,
}

impl BoardPage {
    pub fn new(config: BrowserConfig) -> HarnessResult<Self> {
        check_playwright_installed()?;
        Ok(Self { config })
    }

    /// Collect text/markup snippets of every rendered card carrying the
    /// given label, matched by visible text or a label title attribute.
    pub async fn cards_with_label(&self, label: &str) -> HarnessResult<Vec<CardSnippet>> {
        let label_js = js_string(label);
        let body = format!(
            r#"    const containers = await page.locator('{container}').all();
    const cards = [];
    for (const card of containers) {{
      const text = await card.innerText();
      const byTitle = await card.locator("[title*='" + {label} + "']").count();
      if (text.includes({label}) || byTitle > 0) {{
        cards.push({{ text, markup: await card.innerHTML() }});
      }}
    }}
    emit({{ cards }});"#,
            container = CARD_CONTAINER,
            label = label_js,
        );

        let result = run_node(&self.board_script(&body)).await?;
        let cards = result
            .get("cards")
            .cloned()
            .ok_or_else(|| HarnessError::Browser("script returned no 'cards' field".into()))?;
        Ok(serde_json::from_value(cards)?)
    }

    /// Open the card whose rendered name contains `title`, extract the four
    /// modal fields, and close the modal again. The column status falls
    /// back to `"UNKNOWN"` when its control cannot be read.
    pub async fn card_details(&self, title: &str) -> HarnessResult<CardDetails> {
        let title_js = js_string(title);
        let body = format!(
            r#"    const card = page.locator('{card_name}').filter({{ hasText: {title} }}).first();
    try {{
      await card.waitFor({{ state: 'visible', timeout: 5000 }});
    }} catch (e) {{
      emit({{ error: 'card_not_found' }});
      return;
    }}
    await card.click();
    await page.waitForSelector('{modal_title}');
    let description = '';
    if (await page.locator('{modal_desc}').count() > 0) {{
      description = await page.locator('{modal_desc}').innerText();
    }}
    let status = 'UNKNOWN';
    try {{
      status = (await page.locator('{modal_status}').first().innerText()).trim();
    }} catch (e) {{}}
    const details = {{
      title: await page.inputValue('{modal_title}'),
      description,
      labels: await page.locator('{modal_labels}').allInnerTexts(),
      status,
    }};
    await page.click('{close_btn}');
    emit({{ details }});"#,
            card_name = CARD_NAME,
            title = title_js,
            modal_title = MODAL_TITLE_INPUT,
            modal_desc = MODAL_DESC,
            modal_status = MODAL_COLUMN_STATUS,
            modal_labels = MODAL_LABELS,
            close_btn = CLOSE_MODAL_BTN,
        );

        let result = run_node(&self.board_script(&body)).await;
        let result = match result {
            Err(HarnessError::Browser(msg)) if msg.contains("card_not_found") => {
                return Err(HarnessError::CardNotFound(title.to_string()));
            }
            other => other?,
        };

        let details = result
            .get("details")
            .cloned()
            .ok_or_else(|| HarnessError::Browser("script returned no 'details' field".into()))?;
        // A modal snapshot missing any of the four fields is rejected here,
        // at the boundary.
        Ok(serde_json::from_value(details)?)
    }

    /// Wrap a script body with board navigation: launch, load the saved
    /// storage state, open the board, and bail out on an auth wall.
    fn board_script(&self, body: &str) -> String {
        format!(
            r#"const {{ chromium }} = require('playwright');

const emit = (obj) => console.log('\n' + JSON.stringify(obj));

(async () => {{
  const browser = await chromium.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    storageState: {state_file},
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();

  try {{
    await page.goto({board_url}, {{ waitUntil: 'domcontentloaded' }});

    const wall = await page.getByText('Log in to continue').isVisible().catch(() => false)
      || await page.getByText('Sign up to see this board').isVisible().catch(() => false);
    if (wall) {{
      emit({{ error: 'auth_expired' }});
      return;
    }}
    await page.waitForSelector('#board', {{ timeout: 10000 }});

{body}
  }} catch (error) {{
    emit({{ error: error.message }});
    process.exitCode = 1;
  }} finally {{
    await browser.close();
  }}
}})();
"#,
            headless = self.config.headless,
            state_file = js_string(&self.config.state_file.to_string_lossy()),
            width = self.config.viewport_width,
            height = self.config.viewport_height,
            board_url = js_string(&self.config.board_url),
            body = body,
        )
    }
}

/// Check that the Playwright CLI is available.
pub(crate) fn check_playwright_installed() -> HarnessResult<()> {
    let status = Command::new("npx")
        .args(["playwright", "--version"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) if status.success() => Ok(()),
        _ => Err(HarnessError::PlaywrightNotFound),
    }
}

/// Quote a Rust string as a JS single-quoted literal.
pub(crate) fn js_string(value: &str) -> String {
    format!(
        "'{}'",
        value
            .replace('\\', "\\\\")
            .replace('\'', "\\'")
            .replace('\n', "\\n")
    )
}

/// Run a generated script under node and parse the JSON document it
/// printed last. Scripts signal expected conditions (auth wall, missing
/// card) through an `error` field rather than a crash.
pub(crate) async fn run_node(script: &str) -> HarnessResult<serde_json::Value> {
    let temp_dir = tempfile::tempdir()?;
    let script_path = temp_dir.path().join("scenario.js");
    std::fs::write(&script_path, script)?;

    debug!("Running Playwright script: {}", script_path.display());

    let output = TokioCommand::new("node")
        .arg(&script_path)
        .output()
        .await?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed = stdout
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .and_then(|l| serde_json::from_str::<serde_json::Value>(l.trim()).ok());

    match parsed {
        Some(value) => {
            if let Some(error) = value.get("error").and_then(|e| e.as_str()) {
                if error == "auth_expired" {
                    return Err(HarnessError::AuthExpired);
                }
                return Err(HarnessError::Browser(error.to_string()));
            }
            Ok(value)
        }
        None => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(HarnessError::Browser(format!(
                "script produced no JSON result:\nstdout: {}\nstderr: {}",
                stdout, stderr
            )))
        }
    }
}
