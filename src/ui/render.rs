//! Text renderer
//!
//! `view_lines` turns a settled frame into styled lines without touching the
//! terminal, so every view can be checked in tests. `TerminalRenderer`
//! writes those lines with crossterm colors and plays the celebration.

use crate::content::SurveyField;
use crate::core::types::ViewState;
use crate::engine::{FieldVisit, Frame, VisitPhase};
use crate::ui::celebration::{CelebrationPhase, CelebrationSequence};
use crate::ui::state::{LineKind, TerminalHistory};
use crate::ui::view_model::{hub_model, summary_model};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::{queue, terminal};
use std::io::{self, Write};
use std::time::{Duration, Instant};

const DIVIDER: &str = "────────────────────────────────────────";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Normal,
    Dim,
    Accent,
    Success,
    Error,
    Highlight,
}

impl LineStyle {
    fn color(&self) -> Color {
        match self {
            Self::Title => Color::Cyan,
            Self::Normal => Color::Reset,
            Self::Dim => Color::DarkGrey,
            Self::Accent => Color::Cyan,
            Self::Success => Color::Green,
            Self::Error => Color::Red,
            Self::Highlight => Color::Yellow,
        }
    }
}

impl From<LineKind> for LineStyle {
    fn from(kind: LineKind) -> Self {
        match kind {
            LineKind::System => Self::Dim,
            LineKind::User => Self::Normal,
            LineKind::Error => Self::Error,
            LineKind::Success => Self::Success,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub style: LineStyle,
    pub text: String,
}

/// How the celebration ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelebrationEnd {
    Completed,
    Dismissed,
}

/// Presentation collaborator of the engine
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>, history: &TerminalHistory) -> io::Result<()>;
    /// Show the input prompt
    fn prompt(&mut self) -> io::Result<()>;
    fn play_celebration(&mut self, sequence: &CelebrationSequence) -> io::Result<CelebrationEnd>;
}

#[derive(Default)]
struct Lines(Vec<StyledLine>);

impl Lines {
    fn push(&mut self, style: LineStyle, text: impl Into<String>) {
        self.0.push(StyledLine {
            style,
            text: text.into(),
        });
    }

    fn blank(&mut self) {
        self.push(LineStyle::Normal, "");
    }

    fn divider(&mut self) {
        self.push(LineStyle::Dim, DIVIDER);
    }

    fn all(&mut self, style: LineStyle, lines: &[String]) {
        for line in lines {
            self.push(style, line.clone());
        }
    }
}

/// Lines for the active view
pub fn view_lines(frame: &Frame<'_>) -> Vec<StyledLine> {
    let mut out = Lines::default();
    let texts = &frame.content.ui_texts;

    match frame.view {
        ViewState::Boot => {
            if let Some(logo) = &texts.boot.ascii_logo {
                out.all(LineStyle::Accent, logo);
            }
            out.push(LineStyle::Title, texts.boot.title.clone());
            out.blank();
            out.all(LineStyle::Normal, &texts.boot.lines);
            out.blank();
            let buttons: Vec<String> = texts.boot.buttons.iter().map(|b| format!("[{}]", b)).collect();
            out.push(LineStyle::Accent, buttons.join("  "));
        }
        ViewState::Help => {
            out.push(LineStyle::Title, texts.help.title.clone());
            for cmd in &texts.help.commands {
                out.push(
                    LineStyle::Normal,
                    format!("  {:<18} {}", cmd.command, cmd.description),
                );
            }
        }
        ViewState::Hub => {
            let hub = hub_model(frame);
            out.push(LineStyle::Title, texts.hub.title.clone());
            out.push(LineStyle::Dim, texts.hub.description.clone());
            out.blank();
            out.push(
                LineStyle::Accent,
                format!("Progress: {}/{}", hub.completed, hub.total),
            );
            for row in &hub.rows {
                let (status, style) = if row.completed {
                    (&texts.hub.status.completed, LineStyle::Success)
                } else {
                    (&texts.hub.status.not_completed, LineStyle::Dim)
                };
                out.push(style, format!("  [{}] {}  {}", row.number, row.title, status));
            }
            if hub.show_summary {
                out.blank();
                out.push(LineStyle::Accent, "Type 'summary' to review your results.");
            }
        }
        ViewState::Field(index) => {
            if let Some(field) = frame.content.field(index) {
                field_lines(&mut out, frame, index, field);
            }
        }
        ViewState::Summary => {
            let summary = summary_model(frame);
            out.push(LineStyle::Title, texts.summary.title.clone());
            out.all(LineStyle::Dim, &texts.summary.description);
            out.divider();
            let style = if summary.is_complete() {
                LineStyle::Success
            } else {
                LineStyle::Normal
            };
            out.push(
                style,
                format!("Progress: {}/{} fields answered", summary.completed, summary.total),
            );
            for answer in &summary.answers {
                out.push(
                    LineStyle::Normal,
                    format!(
                        "  [{}] {}: {} ({} group)",
                        answer.number,
                        answer.title,
                        answer.option,
                        answer.group.label()
                    ),
                );
            }
            if !summary.pledges.is_empty() {
                out.blank();
                out.push(LineStyle::Title, frame.content.survey.fields.pledge_title.clone());
                for group in &summary.pledges {
                    out.push(LineStyle::Accent, group.field_title.clone());
                    for pledge in &group.pledges {
                        out.push(LineStyle::Success, format!("  - {}", pledge));
                    }
                }
            }
            out.divider();
            out.all(LineStyle::Highlight, &summary.end_screen);
            if let Some(extra) = &summary.optional_end_screen {
                out.divider();
                out.all(LineStyle::Highlight, extra);
            }
            out.blank();
            out.push(LineStyle::Dim, "Commands: export, back, reset");
        }
        ViewState::Reset => {
            out.push(LineStyle::Error, texts.reset.title.clone());
            out.all(LineStyle::Dim, &texts.reset.description);
            out.blank();
            out.push(
                LineStyle::Accent,
                format!(
                    "[{}] yes   [{}] no",
                    texts.reset.buttons.confirm, texts.reset.buttons.cancel
                ),
            );
        }
    }

    out.0
}

fn field_lines(out: &mut Lines, frame: &Frame<'_>, index: usize, field: &SurveyField) {
    let texts = &frame.content.ui_texts;
    let total = frame.content.field_count();

    out.push(LineStyle::Dim, format!("Field {}/{}", index + 1, total));
    out.push(LineStyle::Title, field.title.clone());
    out.push(LineStyle::Accent, field.theme.clone());
    out.push(LineStyle::Normal, field.situation.clone());
    if let Some(example) = &field.hallucination_example {
        out.push(LineStyle::Highlight, format!("Example: {}", example));
    }
    out.blank();

    let Some(visit) = frame.visit else {
        return;
    };

    if visit.phase == VisitPhase::Selection {
        out.push(LineStyle::Accent, texts.field.selection_prompt.clone());
        out.push(LineStyle::Normal, field.prompt.clone());
        for option in &field.options {
            out.push(LineStyle::Normal, format!("  [{}] {}", option.key, option.text));
        }
        return;
    }

    if let Some(selected) = visit.selected {
        let chosen = match field.option_text(selected) {
            Some(text) => format!("You chose: [{}] {}", selected, text),
            None => format!("You chose: [{}]", selected),
        };
        out.push(LineStyle::Accent, chosen);
        out.divider();
        out.push(LineStyle::Title, texts.field.observation_title.clone());
        out.push(LineStyle::Normal, field.observation(selected).to_string());
        out.divider();
        out.push(LineStyle::Title, texts.field.recommendation_title.clone());
        out.push(LineStyle::Dim, texts.field.recommendation_subtitle.clone());
        out.push(LineStyle::Highlight, field.recommendation.clone());
    }

    match visit.phase {
        VisitPhase::Pledge => pledge_lines(out, frame, field, visit),
        VisitPhase::Complete => {
            if !visit.draft.is_empty() {
                out.divider();
                out.push(LineStyle::Title, texts.pledge.title.clone());
                for pledge in &visit.draft {
                    out.push(LineStyle::Success, format!("  - {}", pledge));
                }
            }
            out.divider();
            if index + 1 < total {
                out.push(LineStyle::Dim, "Commands: back, next");
            } else {
                out.push(LineStyle::Dim, "Commands: back, summary");
            }
        }
        VisitPhase::Selection | VisitPhase::Observation => {}
    }
}

fn pledge_lines(out: &mut Lines, frame: &Frame<'_>, field: &SurveyField, visit: &FieldVisit) {
    let texts = &frame.content.ui_texts;
    out.divider();
    out.push(LineStyle::Title, texts.pledge.title.clone());
    out.all(LineStyle::Dim, &texts.pledge.description);
    out.push(LineStyle::Dim, field.pledge.timeframe.clone());
    for (i, choice) in field.pledge.choices.iter().enumerate() {
        let mark = if visit.is_drafted(choice) { "x" } else { " " };
        out.push(LineStyle::Normal, format!("  [{}] {}. {}", mark, i + 1, choice));
    }
    out.push(
        LineStyle::Accent,
        format!(
            "pledge <n> to tick, save = [{}], skip = [{}]",
            texts.pledge.buttons.save, texts.pledge.buttons.skip
        ),
    );
}

/// Lines shown for one celebration phase
pub fn celebration_lines(phase: CelebrationPhase) -> Vec<StyledLine> {
    let mut out = Lines::default();
    match phase {
        CelebrationPhase::Intro => out.push(LineStyle::Highlight, "* * *"),
        CelebrationPhase::Main | CelebrationPhase::Still => {
            out.push(LineStyle::Highlight, "ALL FIELDS CALIBRATED");
            out.push(LineStyle::Accent, "OPERATOR STATUS: ONLINE");
        }
        CelebrationPhase::Outro => out.push(LineStyle::Dim, "..."),
    }
    out.0
}

/// Writes frames to a terminal stream
pub struct TerminalRenderer<W: Write> {
    out: W,
    interactive: bool,
}

impl<W: Write> TerminalRenderer<W> {
    /// `interactive` enables key-driven dismissal of the celebration
    pub fn new(out: W, interactive: bool) -> Self {
        Self { out, interactive }
    }

    fn write_lines(&mut self, lines: &[StyledLine]) -> io::Result<()> {
        for line in lines {
            queue!(
                self.out,
                SetForegroundColor(line.style.color()),
                Print(&line.text),
                ResetColor,
                Print("\n")
            )?;
        }
        self.out.flush()
    }

    /// Wait for `duration`, returning true if a dismiss key was pressed
    fn wait_or_dismiss(&mut self, duration: Duration) -> io::Result<bool> {
        if !self.interactive {
            std::thread::sleep(duration);
            return Ok(false);
        }
        let deadline = Instant::now() + duration;
        terminal::enable_raw_mode()?;
        let result = loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break Ok(false);
            }
            match event::poll(remaining) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key))
                        if key.kind == KeyEventKind::Press
                            && matches!(key.code, KeyCode::Esc | KeyCode::Enter) =>
                    {
                        break Ok(true);
                    }
                    Ok(_) => continue,
                    Err(e) => break Err(e),
                },
                Ok(false) => break Ok(false),
                Err(e) => break Err(e),
            }
        };
        terminal::disable_raw_mode()?;
        result
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>, history: &TerminalHistory) -> io::Result<()> {
        let mut lines: Vec<StyledLine> = history
            .lines()
            .map(|l| StyledLine {
                style: l.kind.into(),
                text: l.content.clone(),
            })
            .collect();
        if !lines.is_empty() {
            lines.push(StyledLine {
                style: LineStyle::Dim,
                text: DIVIDER.to_string(),
            });
        }
        lines.extend(view_lines(frame));
        self.write_lines(&lines)
    }

    fn prompt(&mut self) -> io::Result<()> {
        queue!(self.out, Print("> "))?;
        self.out.flush()
    }

    fn play_celebration(&mut self, sequence: &CelebrationSequence) -> io::Result<CelebrationEnd> {
        if self.interactive {
            self.write_lines(&[StyledLine {
                style: LineStyle::Dim,
                text: "[ESC] skip".to_string(),
            }])?;
        }
        for (phase, duration) in sequence.schedule() {
            self.write_lines(&celebration_lines(phase))?;
            if self.wait_or_dismiss(duration)? {
                tracing::debug!("Celebration dismissed during {:?}", phase);
                return Ok(CelebrationEnd::Dismissed);
            }
        }
        Ok(CelebrationEnd::Completed)
    }
}
