use console::{measure_text_width, Style};

use crate::catalog::{AXIS_LABELS, QUESTION_IDS};
use crate::survey::SurveyRecord;

pub const TREE_BRANCH: char = '\u{251C}';
pub const TREE_END: char = '\u{2514}';
pub const TREE_HORIZ: char = '\u{2500}';

const VALUE_COLUMN: usize = 16;

fn tree_branch() -> String {
    dim()
        .apply_to(format!("{}{}{} ", TREE_BRANCH, TREE_HORIZ, TREE_HORIZ))
        .to_string()
}

fn tree_end() -> String {
    dim()
        .apply_to(format!("{}{}{} ", TREE_END, TREE_HORIZ, TREE_HORIZ))
        .to_string()
}

pub fn dim() -> Style {
    Style::new().dim()
}

fn blue() -> Style {
    Style::new().blue()
}

fn magenta() -> Style {
    Style::new().magenta()
}

fn cyan() -> Style {
    Style::new().cyan()
}

fn green() -> Style {
    Style::new().green()
}

fn red() -> Style {
    Style::new().red()
}

fn bold() -> Style {
    Style::new().bold()
}

fn init_prefix() -> String {
    blue().apply_to("[INIT]").to_string()
}

fn db_prefix() -> String {
    magenta().apply_to("[DB]").to_string()
}

pub fn pad_label(label: &str) -> String {
    let current_width = measure_text_width(label);
    if current_width < VALUE_COLUMN {
        format!("{}{}", label, " ".repeat(VALUE_COLUMN - current_width))
    } else {
        format!("{} ", label)
    }
}

pub fn log_startup_config(host: &str, port: u16, database_url: &str) {
    println!(
        "{} starting worldview-survey on {}...",
        init_prefix(),
        cyan().apply_to(format!("{host}:{port}")),
    );
    println!(
        "{} database: {}",
        init_prefix(),
        dim().apply_to(database_url)
    );
}

pub fn log_db_status(message: &str) {
    println!("{} {}", db_prefix(), message);
}

pub fn log_db_ready() {
    println!("{} ready.", db_prefix());
}

pub fn log_db_error(message: &str) {
    println!("{} {}", db_prefix(), red().apply_to(message));
}

pub fn log_catalog_ready(question_count: usize) {
    println!(
        "{} catalog loaded with {} questions.",
        init_prefix(),
        bold().apply_to(question_count)
    );
}

pub fn log_server_listening(addr: &str) {
    println!(
        "{} listening on {}",
        init_prefix(),
        cyan().apply_to(addr)
    );
}

pub fn log_submission_saved(session_id: &str, record_id: i32, answered: usize) {
    println!(
        "{} submission {} (session {}, {} answered)",
        green().apply_to("stored"),
        bold().apply_to(format!("#{record_id}")),
        dim().apply_to(truncate_session(session_id)),
        bold().apply_to(answered)
    );
}

pub fn log_submission_rejected(reason: &str) {
    println!(
        "{} submission: {}",
        red().apply_to("rejected"),
        dim().apply_to(reason)
    );
}

fn truncate_session(session_id: &str) -> String {
    if session_id.chars().count() > 13 {
        format!("{}...", session_id.chars().take(10).collect::<String>())
    } else {
        session_id.to_string()
    }
}

/// Styled tree rendering of a derived record, for the debug CLI.
#[derive(Debug, Clone)]
pub struct RecordAssessment<'a> {
    record: &'a SurveyRecord,
}

impl<'a> RecordAssessment<'a> {
    pub fn new(record: &'a SurveyRecord) -> Self {
        Self { record }
    }

    pub fn print(&self) {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!(
            "{} session {}",
            magenta().apply_to(bold().apply_to("[SURVEY ASSESSMENT]")),
            dim().apply_to(&self.record.session_id)
        ));

        lines.push(String::new());
        lines.push(format!("{}", bold().apply_to("RESPONSES")));
        let count = QUESTION_IDS.len();
        for (i, question_id) in QUESTION_IDS.iter().enumerate() {
            let branch = if i == count - 1 {
                tree_end()
            } else {
                tree_branch()
            };
            let value = match self.record.responses[i] {
                Some(n) => green().apply_to(format!("option {n}")).to_string(),
                None => dim().apply_to("unanswered").to_string(),
            };
            lines.push(format!("{}{} {}", branch, pad_label(question_id), value));
        }

        lines.push(String::new());
        lines.push(format!("{}", bold().apply_to("AGGREGATE")));
        match &self.record.aggregates {
            Some(aggregates) => {
                let axes = [aggregates.n1, aggregates.n2, aggregates.n3];
                for (axis, value) in AXIS_LABELS.iter().zip(axes) {
                    lines.push(format!(
                        "{}{} {}",
                        tree_branch(),
                        pad_label(axis),
                        bold().apply_to(value)
                    ));
                }
                lines.push(format!(
                    "{}{} {}",
                    tree_end(),
                    pad_label("plot"),
                    cyan().apply_to(format!(
                        "({:.2}, {:.2})",
                        aggregates.plot_x, aggregates.plot_y
                    ))
                ));
            }
            None => {
                lines.push(format!("{}{}", tree_end(), dim().apply_to("no answers")));
            }
        }

        println!("{}\n", lines.join("\n"));
    }
}
