mod memo;
mod report;
mod session;

pub use memo::PairMemo;
pub use report::{MergeRecord, MergeReport, Rejection};
pub use session::{load_candidates, Candidate, MergeSession};
