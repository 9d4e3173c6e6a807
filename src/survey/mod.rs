pub mod aggregate;
pub mod record;
pub mod resolve;
pub mod session;

pub use aggregate::{aggregate_scores, AggregateScores, AGGREGATE_SCALE, MAX_AXIS_SCORE};
pub use record::{build_record, SubmittedAnswer, SurveyRecord, SurveySubmission};
pub use resolve::resolve_response_index;
pub use session::{new_session_id, Answer, Session};
