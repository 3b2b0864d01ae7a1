//! Line-driven session loop
//!
//! Reads raw lines from any `BufRead`, routes panel controls and commands to
//! the engine, and hands each settled frame to a `Renderer`. Only end of
//! input or an I/O failure ends the loop; a bad line is reported and skipped.

use crate::command::InputError;
use crate::core::error::Result;
use crate::core::TerminalConfig;
use crate::engine::{Notice, Outcome, SurveyEngine, VisitPhase};
use crate::state::{ExportSink, KeyValueStore};
use crate::ui::celebration::CelebrationSequence;
use crate::ui::input::{parse_panel_command, PanelCommand};
use crate::ui::render::{CelebrationEnd, Renderer};
use crate::ui::state::TerminalHistory;
use std::io::BufRead;
use std::time::Duration;

/// Presentation timing for one session
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Pause between showing the observation and revealing the pledge step
    pub pledge_pause: Duration,
    pub reduced_motion: bool,
}

impl From<&TerminalConfig> for SessionOptions {
    fn from(config: &TerminalConfig) -> Self {
        Self {
            pledge_pause: Duration::from_millis(config.pledge_pause_ms),
            reduced_motion: config.reduced_motion,
        }
    }
}

/// Run until `quit`, end of input, or an I/O error
pub fn run_session<K, E, R, I>(
    engine: &mut SurveyEngine<K, E>,
    renderer: &mut R,
    history: &mut TerminalHistory,
    options: &SessionOptions,
    mut input: I,
) -> Result<()>
where
    K: KeyValueStore,
    E: ExportSink,
    R: Renderer,
    I: BufRead,
{
    let mut buf = Vec::new();

    loop {
        renderer.render(&engine.frame(), history)?;
        renderer.prompt()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                tracing::warn!("Ignoring input line that is not UTF-8: {}", e);
                history.push_notice(&Notice::error(&InputError::InvalidEncoding));
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }
        history.push_command(line);

        let panel = parse_panel_command(line, &engine.frame());
        let outcome = match panel {
            Some(PanelCommand::Quit) => break,
            Some(PanelCommand::TogglePledge(n)) => engine.toggle_pledge(n),
            Some(PanelCommand::SavePledges) => engine.save_pledge_draft(),
            Some(PanelCommand::SkipPledge) => engine.skip_pledge(),
            None => engine.handle_line(line),
        };
        present(engine, renderer, history, options, outcome)?;
    }
    Ok(())
}

/// Record notices, then run any follow-up the outcome asks for
fn present<K, E, R>(
    engine: &mut SurveyEngine<K, E>,
    renderer: &mut R,
    history: &mut TerminalHistory,
    options: &SessionOptions,
    outcome: Outcome,
) -> Result<()>
where
    K: KeyValueStore,
    E: ExportSink,
    R: Renderer,
{
    for notice in &outcome.notices {
        history.push_notice(notice);
    }

    if engine.visit().is_some_and(|v| v.phase == VisitPhase::Observation) {
        renderer.render(&engine.frame(), history)?;
        std::thread::sleep(options.pledge_pause);
        engine.reveal_pledge_step();
    }

    if let Some(token) = outcome.celebration {
        let sequence = CelebrationSequence::new(options.reduced_motion);
        let end = renderer.play_celebration(&sequence)?;
        if end == CelebrationEnd::Dismissed {
            tracing::debug!("Celebration skipped");
        }
        engine.finish_celebration(token);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::fixtures;
    use crate::core::types::{OptionKey, ViewState};
    use crate::engine::Frame;
    use crate::state::{MemoryExportSink, MemoryStore, Storage};
    use crate::ui::state::LineKind;
    use std::io::{self, Cursor};

    /// Counts calls instead of drawing
    #[derive(Default)]
    struct CountingRenderer {
        renders: usize,
        celebrations: usize,
    }

    impl Renderer for CountingRenderer {
        fn render(&mut self, _frame: &Frame<'_>, _history: &TerminalHistory) -> io::Result<()> {
            self.renders += 1;
            Ok(())
        }

        fn prompt(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn play_celebration(&mut self, _sequence: &CelebrationSequence) -> io::Result<CelebrationEnd> {
            self.celebrations += 1;
            Ok(CelebrationEnd::Dismissed)
        }
    }

    const OPTIONS: SessionOptions = SessionOptions {
        pledge_pause: Duration::ZERO,
        reduced_motion: true,
    };

    fn engine(n: usize) -> SurveyEngine<MemoryStore, MemoryExportSink> {
        SurveyEngine::new(
            fixtures::content(n),
            Storage::new(MemoryStore::new()),
            MemoryExportSink::default(),
            "results.json",
        )
    }

    fn run(
        engine: &mut SurveyEngine<MemoryStore, MemoryExportSink>,
        input: &[u8],
    ) -> (CountingRenderer, TerminalHistory) {
        let mut renderer = CountingRenderer::default();
        let mut history = TerminalHistory::default();
        run_session(engine, &mut renderer, &mut history, &OPTIONS, Cursor::new(input)).unwrap();
        (renderer, history)
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let mut engine = engine(2);
        let (_, history) = run(&mut engine, b"start\nenter 1\n\xff\xfe a\na\n");

        assert_eq!(
            engine.progression().answer_for("field_01"),
            Some(OptionKey::A)
        );
        let errors: Vec<_> = history
            .lines()
            .filter(|l| l.kind == LineKind::Error)
            .map(|l| l.content.as_str())
            .collect();
        assert_eq!(errors, vec!["input is not valid UTF-8, line ignored"]);
    }

    #[test]
    fn test_panel_commands_and_quit() {
        let mut engine = engine(2);
        let (_, history) = run(&mut engine, b"enter 1\nb\npledge 2\nsave\nquit\nenter 2\n");

        assert_eq!(
            engine.progression().pledges_for("field_01"),
            Some(&["Ask a colleague".to_string()][..])
        );
        assert_eq!(engine.view(), ViewState::Field(0));
        assert!(history.lines().any(|l| l.content == "> quit"));
        assert!(!history.lines().any(|l| l.content == "> enter 2"));
    }

    #[test]
    fn test_completion_plays_celebration_then_summary() {
        let mut engine = engine(1);
        let (renderer, _) = run(&mut engine, b"enter 1\r\nc\r\n\r\n");

        assert_eq!(renderer.celebrations, 1);
        assert_eq!(engine.view(), ViewState::Summary);
        assert!(renderer.renders >= 3);
    }
}
