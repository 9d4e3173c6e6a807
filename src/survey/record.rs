use crate::catalog::{Catalog, ScoreVector, AXIS_LABELS, QUESTION_IDS};
use crate::error::ValidationError;
use crate::settings::settings;
use crate::survey::aggregate::{aggregate_scores, AggregateScores, MAX_AXIS_SCORE};
use crate::survey::resolve::resolve_response_index;
use crate::survey::session::{new_session_id, Session};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Response numbers above this never leave the builder, whatever a loaded
/// catalog claims to offer.
pub const MAX_RESPONSE_NUMBER: i32 = 6;

/// Wire shape of one submission, as posted by the survey client.
#[derive(Debug, Clone, Deserialize)]
pub struct SurveySubmission {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub browser: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub answers: BTreeMap<String, SubmittedAnswer>,
}

/// A single answered question on the wire. Clients also send option ids and
/// timestamps; only the score vector matters here.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedAnswer {
    pub scores: Vec<f64>,
}

impl SurveySubmission {
    /// A completed in-memory session crosses the same boundary as a wire
    /// payload, so submission goes through one code path.
    pub fn from_session(session: &Session) -> Self {
        Self {
            session_id: Some(session.session_id.clone()),
            source: None,
            browser: None,
            version: None,
            answers: session
                .answers
                .iter()
                .map(|(id, answer)| {
                    let scores = answer.scores.iter().map(|&c| f64::from(c)).collect();
                    (id.clone(), SubmittedAnswer { scores })
                })
                .collect(),
        }
    }
}

/// The flattened row shape handed to the persistence gateway. A pure derived
/// snapshot: once built it has no further tie to the session that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyRecord {
    pub session_id: String,
    pub source: String,
    pub browser: Option<String>,
    pub version: Option<String>,
    /// 1-based option numbers for Q1..Q6; `None` where unanswered or where
    /// the vector matched no catalog option.
    pub responses: [Option<i32>; 6],
    /// `None` only when zero questions were answered.
    pub aggregates: Option<AggregateScores>,
}

/// Builds the persisted-record shape from a submission.
///
/// Aggregation runs over every well-formed answer vector whether or not it
/// resolved to an option number; reverse lookup and scoring are deliberately
/// independent. Validation failures reject the whole submission before
/// anything is derived.
pub fn build_record(
    catalog: &Catalog,
    submission: &SurveySubmission,
) -> Result<SurveyRecord, ValidationError> {
    let mut vectors_by_question: BTreeMap<&str, ScoreVector> = BTreeMap::new();
    for (question_id, answer) in &submission.answers {
        if !catalog.is_known_question(question_id) {
            return Err(ValidationError::UnknownQuestion(question_id.clone()));
        }
        let vector = parse_score_vector(question_id, &answer.scores)?;
        vectors_by_question.insert(question_id.as_str(), vector);
    }

    let mut responses = [None; 6];
    for (slot, question_id) in responses.iter_mut().zip(QUESTION_IDS) {
        if let Some(vector) = vectors_by_question.get(question_id) {
            *slot = resolve_response_index(catalog, question_id, vector).map(|n| n as i32);
        }
    }

    let vectors: Vec<ScoreVector> = vectors_by_question.values().copied().collect();
    let aggregates = aggregate_scores(&vectors);

    for (question_id, response) in QUESTION_IDS.iter().zip(&responses) {
        if let Some(n) = response {
            if !(1..=MAX_RESPONSE_NUMBER).contains(n) {
                return Err(ValidationError::ResponseOutOfRange {
                    question: question_id.to_string(),
                    response: *n,
                });
            }
        }
    }
    if let Some(aggregates) = &aggregates {
        let axes = [aggregates.n1, aggregates.n2, aggregates.n3];
        for (axis, value) in AXIS_LABELS.into_iter().zip(axes) {
            if !(0..=MAX_AXIS_SCORE).contains(&value) {
                return Err(ValidationError::AxisScoreOutOfRange { axis, value });
            }
        }
    }

    let s = settings();
    let session_id = submission
        .session_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(new_session_id);

    Ok(SurveyRecord {
        session_id,
        source: submission
            .source
            .clone()
            .unwrap_or_else(|| s.survey.default_source.clone()),
        browser: submission.browser.clone(),
        version: submission
            .version
            .clone()
            .or_else(|| Some(s.survey.default_version.clone())),
        responses,
        aggregates,
    })
}

fn parse_score_vector(question_id: &str, raw: &[f64]) -> Result<ScoreVector, ValidationError> {
    if raw.len() != 3 {
        return Err(ValidationError::MalformedScoreVector {
            question: question_id.to_string(),
            detail: format!("expected 3 components, got {}", raw.len()),
        });
    }

    let mut vector = [0i32; 3];
    for (slot, &component) in vector.iter_mut().zip(raw) {
        if !component.is_finite() || component.fract() != 0.0 {
            return Err(ValidationError::MalformedScoreVector {
                question: question_id.to_string(),
                detail: format!("component {} is not an integer", component),
            });
        }
        if component < f64::from(i32::MIN) || component > f64::from(i32::MAX) {
            return Err(ValidationError::MalformedScoreVector {
                question: question_id.to_string(),
                detail: format!("component {} is out of range", component),
            });
        }
        *slot = component as i32;
    }
    Ok(vector)
}
