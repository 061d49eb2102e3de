pub mod config;
pub mod coord;
pub mod error;
pub mod evaluation;
pub mod goban;
pub mod history;
pub mod hoshi;
pub mod influence;
pub mod ko;
pub mod lifecycle;
pub mod metrics;
pub mod quality;
pub mod session;
pub mod stone;
pub mod sync;
pub mod territory;

/// `(row, col)`, both 0-based from the top-left corner.
pub type Point = (u8, u8);

pub use config::{EvalConfig, RulesConfig, SelfCapturePolicy};
pub use coord::Vertex;
pub use error::EvalError;
pub use evaluation::Evaluation;
pub use goban::Goban;
pub use history::{CaptureRecord, Captures, History, MoveRecord};
pub use influence::InfluenceField;
pub use ko::Ko;
pub use lifecycle::{Lifecycle, Status};
pub use metrics::{Baseline, GameTheorySeries, GameTheoryTracker};
pub use session::{MoveOutcome, Session};
pub use stone::Stone;
pub use sync::{Candidate, Suggestion};
pub use territory::Territory;
