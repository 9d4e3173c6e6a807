use crate::catalog::{Catalog, ScoreVector};
use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Fabricates an opaque session token. Also used by the record builder when
/// a submission arrives without one.
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// One selected option: the option's score vector plus when it was chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub scores: ScoreVector,
    pub chosen_at: DateTime<Utc>,
}

/// One respondent's in-progress answer set, keyed by question id. The session
/// owns its answers; re-answering a question overwrites, nothing is appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub session_id: String,
    pub answers: BTreeMap<String, Answer>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            session_id: new_session_id(),
            answers: BTreeMap::new(),
        }
    }

    /// Records (or replaces) the answer for `question_id`, stamping the
    /// moment of choice. The id must exist in the catalog; the vector arity
    /// is carried by the type.
    pub fn set_answer(
        &mut self,
        catalog: &Catalog,
        question_id: &str,
        scores: ScoreVector,
    ) -> Result<(), ValidationError> {
        if !catalog.is_known_question(question_id) {
            return Err(ValidationError::UnknownQuestion(question_id.to_string()));
        }

        self.answers.insert(
            question_id.to_string(),
            Answer {
                scores,
                chosen_at: Utc::now(),
            },
        );
        Ok(())
    }

    /// Discards all answers and starts a fresh attempt under a new token.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.session_id = new_session_id();
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_set_answer_records_choice() {
        let catalog = Catalog::default();
        let mut session = Session::new();

        session.set_answer(&catalog, "Q1", [100, 0, 0]).unwrap();
        assert_eq!(session.answered_count(), 1);
        assert_eq!(session.answers["Q1"].scores, [100, 0, 0]);
    }

    #[test]
    fn test_set_answer_overwrites_previous_choice() {
        let catalog = Catalog::default();
        let mut session = Session::new();

        session.set_answer(&catalog, "Q2", [100, 0, 0]).unwrap();
        session.set_answer(&catalog, "Q2", [0, 50, 50]).unwrap();

        assert_eq!(session.answered_count(), 1);
        assert_eq!(session.answers["Q2"].scores, [0, 50, 50]);
    }

    #[test]
    fn test_set_answer_rejects_unknown_question() {
        let catalog = Catalog::default();
        let mut session = Session::new();

        let err = session.set_answer(&catalog, "Q7", [100, 0, 0]).unwrap_err();
        assert_eq!(err, ValidationError::UnknownQuestion("Q7".to_string()));
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn test_reset_discards_answers_and_rotates_id() {
        let catalog = Catalog::default();
        let mut session = Session::new();
        let original_id = session.session_id.clone();

        session.set_answer(&catalog, "Q1", [100, 0, 0]).unwrap();
        session.reset();

        assert_eq!(session.answered_count(), 0);
        assert_ne!(session.session_id, original_id);
    }

    #[test]
    fn test_fabricated_ids_do_not_collide() {
        let ids: HashSet<String> = (0..1000).map(|_| new_session_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
