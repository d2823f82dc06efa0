mod cell;
mod error;
mod neighborhood;
mod rules;
pub mod grid;
pub mod parser;
pub mod scheduler;

pub use cell::Cell;
pub use error::{GridError, RuleSpecError, WarningKind};
pub use grid::Grid;
pub use neighborhood::{Coordinate, Neighborhood, WINDOW_CENTER, WINDOW_SIZE};
pub use parser::{ParseMode, ParseOutcome, ParseWarning, RuleSpecParser, load_rules};
pub use rules::{EvolutionRules, Interval, Rule};
pub use scheduler::Scheduler;
