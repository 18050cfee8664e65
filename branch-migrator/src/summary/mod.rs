//! Run report and outcome types.

mod result;
mod run_report;
mod step;

pub use result::{MigrationRecord, MigrationState, RepoOutcome};
pub use run_report::RunReport;
pub use step::StepOutcome;
