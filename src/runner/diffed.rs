//! Buffer-diffing adapter backed by ratatui.
//!
//! The adapter rebuilds the full widget tree on every update and lets
//! `Terminal::draw` diff the new frame against the previous one before
//! flushing to the in-memory backend. Rebuild-then-diff is exactly the
//! virtual-DOM discipline, which is what makes this backend the
//! comparison partner for the fine-grained reactive one.

use super::{format_row, Runner, RunnerError, RunnerHandle};
use crate::data::Item;
use ratatui::backend::TestBackend;
use ratatui::widgets::{List, ListItem};
use ratatui::Terminal;

/// Viewport width in cells; wide enough for every row format.
const VIEW_WIDTH: u16 = 80;

/// Factory for the buffer-diffing adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffedRunner;

impl Runner for DiffedRunner {
    fn mount(&self, items: &[Item]) -> Result<Box<dyn RunnerHandle>, RunnerError> {
        // Fresh terminal per mount: the render root starts from an empty
        // frame, so the first draw paints every row.
        let height = viewport_height(items.len());
        let backend = TestBackend::new(VIEW_WIDTH, height);
        let mut terminal = Terminal::new(backend)?;
        draw_rows(&mut terminal, items)?;
        Ok(Box::new(DiffedHandle {
            terminal: Some(terminal),
            rows: items.len(),
        }))
    }
}

/// Size the viewport to the mounted collection, with slack for splice
/// growth. Collections beyond `u16::MAX` rows render truncated.
fn viewport_height(rows: usize) -> u16 {
    u16::try_from(rows.saturating_add(16)).unwrap_or(u16::MAX)
}

fn draw_rows(terminal: &mut Terminal<TestBackend>, items: &[Item]) -> Result<(), RunnerError> {
    terminal.draw(|frame| {
        let rows: Vec<ListItem> = items
            .iter()
            .map(|item| ListItem::new(format_row(item).to_string()))
            .collect();
        frame.render_widget(List::new(rows), frame.area());
    })?;
    Ok(())
}

struct DiffedHandle {
    /// `None` once the root has been torn down.
    terminal: Option<Terminal<TestBackend>>,
    rows: usize,
}

impl RunnerHandle for DiffedHandle {
    fn replace(&mut self, items: &[Item]) -> Result<(), RunnerError> {
        let terminal = self.terminal.as_mut().ok_or(RunnerError::AlreadyTornDown)?;
        draw_rows(terminal, items)?;
        self.rows = items.len();
        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), RunnerError> {
        match self.terminal.take() {
            Some(mut terminal) => {
                terminal.clear()?;
                self.rows = 0;
                Ok(())
            }
            None => Err(RunnerError::AlreadyTornDown),
        }
    }

    fn rendered_rows(&self) -> usize {
        self.rows
    }
}
