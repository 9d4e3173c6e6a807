use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

static CATALOG: OnceLock<Catalog> = OnceLock::new();

/// Weighted affinity of one option across the three worldview axes.
pub type ScoreVector = [i32; 3];

pub const QUESTION_IDS: [&str; 6] = ["Q1", "Q2", "Q3", "Q4", "Q5", "Q6"];
pub const AXIS_LABELS: [&str; 3] = ["PreModern", "Modern", "PostModern"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseOption {
    pub id: String,
    pub text: String,
    pub scores: ScoreVector,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub responses: Vec<ResponseOption>,
}

/// The fixed six-question survey. Loaded once per process; an optional
/// `questions.json` next to the binary overrides the compiled-in catalog,
/// the same way `settings.ron` overrides compiled settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub questions: BTreeMap<String, Question>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    MissingQuestion(String),
    UnknownQuestion(String),
    EmptyOptionList(String),
    DuplicateScoreVector { question: String, scores: ScoreVector },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::MissingQuestion(id) => write!(f, "catalog is missing question {}", id),
            CatalogError::UnknownQuestion(id) => write!(f, "catalog contains unknown question {}", id),
            CatalogError::EmptyOptionList(id) => write!(f, "question {} has no options", id),
            CatalogError::DuplicateScoreVector { question, scores } => write!(
                f,
                "question {} has two options with score vector {:?}",
                question, scores
            ),
        }
    }
}

impl std::error::Error for CatalogError {}

impl Catalog {
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.get(question_id)
    }

    pub fn is_known_question(&self, question_id: &str) -> bool {
        self.questions.contains_key(question_id)
    }

    /// Reverse lookup depends on every question's option vectors being
    /// distinct; checked here once at startup instead of on every resolve.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for id in QUESTION_IDS {
            if !self.questions.contains_key(id) {
                return Err(CatalogError::MissingQuestion(id.to_string()));
            }
        }
        for (id, question) in &self.questions {
            if !QUESTION_IDS.contains(&id.as_str()) {
                return Err(CatalogError::UnknownQuestion(id.clone()));
            }
            if question.responses.is_empty() {
                return Err(CatalogError::EmptyOptionList(id.clone()));
            }
            for (i, option) in question.responses.iter().enumerate() {
                if question.responses[..i].iter().any(|o| o.scores == option.scores) {
                    return Err(CatalogError::DuplicateScoreVector {
                        question: id.clone(),
                        scores: option.scores,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn load() -> &'static Catalog {
        CATALOG.get_or_init(Self::load_from_files)
    }

    fn load_from_files() -> Catalog {
        let override_path = Path::new("questions.json");

        if override_path.exists() {
            if let Ok(content) = fs::read_to_string(override_path) {
                if let Ok(overrides) = serde_json::from_str::<Catalog>(&content) {
                    return overrides;
                }
            }
        }

        Catalog::default()
    }
}

fn option(id: &str, text: &str, scores: ScoreVector) -> ResponseOption {
    ResponseOption {
        id: id.to_string(),
        text: text.to_string(),
        scores,
    }
}

fn question(text: &str, responses: Vec<ResponseOption>) -> Question {
    Question {
        text: text.to_string(),
        responses,
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let mut questions = BTreeMap::new();

        questions.insert(
            "Q1".to_string(),
            question(
                "What is the source of truth?",
                vec![
                    option("R1", "Truth is given by divine or spiritual authority.", [100, 0, 0]),
                    option("R2", "Truth is discovered through empirical evidence.", [0, 100, 0]),
                    option("R3", "Truth is shaped by cultural or personal perspectives.", [0, 0, 100]),
                    option("R4", "Truth is primarily divine but interpreted through reason.", [50, 50, 0]),
                    option("R5", "Truth is mostly objective but influenced by culture.", [0, 50, 50]),
                ],
            ),
        );
        questions.insert(
            "Q2".to_string(),
            question(
                "What is the best way to understand the world?",
                vec![
                    option("R1", "Understand the world through sacred traditions.", [100, 0, 0]),
                    option("R2", "Understand the world by uncovering universal principles.", [0, 100, 0]),
                    option("R3", "Critique and question established assumptions.", [0, 0, 100]),
                    option("R4", "Sacred stories reveal truths but must align with reason.", [50, 50, 0]),
                    option("R5", "Universal principles exist but are shaped by culture.", [0, 50, 50]),
                ],
            ),
        );
        questions.insert(
            "Q3".to_string(),
            question(
                "How is knowledge best gained?",
                vec![
                    option("R1", "Knowledge is gained through spiritual intuition.", [100, 0, 0]),
                    option("R2", "Knowledge is gained through logical reasoning.", [0, 100, 0]),
                    option("R3", "Knowledge is gained by questioning existing ideas.", [0, 0, 100]),
                    option("R4", "Mystical insights must be balanced with reasoning.", [50, 50, 0]),
                    option("R5", "Logical reasoning is essential but subjective.", [0, 50, 50]),
                ],
            ),
        );
        questions.insert(
            "Q4".to_string(),
            question(
                "What is your view of the world?",
                vec![
                    option("R1", "The world is governed by a divine cosmic order.", [100, 0, 0]),
                    option("R2", "The world progresses through scientific advancements.", [0, 100, 0]),
                    option("R3", "The world is a critique of traditional systems.", [0, 0, 100]),
                    option("R4", "Cosmic order exists, but progress plays a role.", [50, 50, 0]),
                    option("R5", "Progress must be critically examined through irony.", [0, 50, 50]),
                ],
            ),
        );
        questions.insert(
            "Q5".to_string(),
            question(
                "How should societal values be oriented?",
                vec![
                    option("R1", "Societal values follow established traditions.", [100, 0, 0]),
                    option("R2", "Values are guided by objective, neutral standards.", [0, 100, 0]),
                    option("R3", "Values adapt to subjective or situational contexts.", [0, 0, 100]),
                    option("R4", "Respect traditions but balance with objectivity.", [50, 50, 0]),
                    option("R5", "Objective standards must consider subjective contexts.", [0, 50, 50]),
                ],
            ),
        );
        questions.insert(
            "Q6".to_string(),
            question(
                "How is identity defined?",
                vec![
                    option("R1", "Identity is defined by one's role in a community.", [100, 0, 0]),
                    option("R2", "Identity is discovered through personal authenticity.", [0, 100, 0]),
                    option("R3", "Identity is fluid and changes with contexts.", [0, 0, 100]),
                    option("R4", "Identity is collective but allows personal expression.", [50, 50, 0]),
                    option("R5", "Identity is personal but adapts to fluid contexts.", [0, 50, 50]),
                ],
            ),
        );

        Catalog { questions }
    }
}

pub fn catalog() -> &'static Catalog {
    Catalog::load()
}
