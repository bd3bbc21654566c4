//! Render sinks and the repeating display loop.

use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::core::types::Tick;
use crate::ticker::Ticker;

/// Clear the current terminal line and return the cursor to column 0.
const CLEAR_LINE: &str = "\r\x1b[2K";
const RESET: &str = "\x1b[0m";

/// A single display region whose content is replaced on every render.
pub trait Display {
    fn render(&mut self, tick: &Tick) -> Result<()>;

    /// Called once after the last render.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Rewrites one terminal line in place.
///
/// With `style` set, the time is printed bold in the configured 24-bit colour.
pub struct TerminalDisplay<W: Write> {
    out: W,
    style: Option<String>,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn plain(out: W) -> Self {
        Self { out, style: None }
    }

    pub fn styled(out: W, (r, g, b): (u8, u8, u8)) -> Self {
        Self {
            out,
            style: Some(format!("\x1b[1;38;2;{r};{g};{b}m")),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn render(&mut self, tick: &Tick) -> Result<()> {
        let mut line = String::from(CLEAR_LINE);
        match &self.style {
            Some(style) => {
                line.push_str(style);
                line.push_str(&tick.time);
                line.push_str(RESET);
            }
            None => line.push_str(&tick.time),
        }
        if let Some(commit) = &tick.commit {
            line.push_str("  ");
            line.push_str(commit.as_str());
        }
        self.out
            .write_all(line.as_bytes())
            .context("write clock line")?;
        self.out.flush().context("flush clock line")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.write_all(b"\n").context("write final newline")?;
        self.out.flush().context("flush final newline")?;
        Ok(())
    }
}

/// Render a tick, wait `interval`, and repeat.
///
/// Runs forever when `max_ticks` is `None`. Returns the number of renders.
#[instrument(skip_all, fields(interval_ms = interval.as_millis() as u64, max_ticks))]
pub fn run_display<D: Display>(
    ticker: &Ticker,
    display: &mut D,
    interval: Duration,
    max_ticks: Option<u64>,
) -> Result<u64> {
    let mut rendered = 0u64;
    loop {
        let tick = ticker.tick();
        display.render(&tick)?;
        rendered += 1;
        if max_ticks.is_some_and(|max| rendered >= max) {
            debug!(rendered, "tick limit reached");
            break;
        }
        thread::sleep(interval);
    }
    display.finish()?;
    Ok(rendered)
}
