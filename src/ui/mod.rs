//! Terminal presentation: history, panel input, view models and rendering

pub mod celebration;
pub mod input;
pub mod render;
pub mod session;
pub mod state;
pub mod view_model;

pub use celebration::{CelebrationPhase, CelebrationSequence};
pub use input::{parse_panel_command, PanelCommand};
pub use render::{CelebrationEnd, LineStyle, Renderer, StyledLine, TerminalRenderer};
pub use session::{run_session, SessionOptions};
pub use state::{HistoryLine, LineKind, TerminalHistory};
pub use view_model::{hub_model, summary_model, HubModel, SummaryModel};
