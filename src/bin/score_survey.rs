use std::env;
use std::process;

use worldview_survey::catalog::{catalog, Catalog, ScoreVector};
use worldview_survey::survey::{build_record, Session, SurveySubmission};
use worldview_survey::utils::logs::{log_submission_rejected, RecordAssessment};

fn print_usage() {
    eprintln!("Usage: score-survey <Qn=OPTION | Qn=a,b,c>...");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  Qn=OPTION  1-based option number for question Qn (e.g. Q1=4)");
    eprintln!("  Qn=a,b,c   raw score vector for question Qn (e.g. Q2=50,50,0)");
    eprintln!();
    eprintln!("Unanswered questions are left null, like a partial submission.");
}

fn parse_vector(catalog: &Catalog, question_id: &str, value: &str) -> Result<ScoreVector, String> {
    if value.contains(',') {
        let components: Vec<i32> = value
            .split(',')
            .map(|c| c.trim().parse::<i32>())
            .collect::<Result<_, _>>()
            .map_err(|_| format!("{question_id}: score components must be integers"))?;

        return components
            .try_into()
            .map_err(|_| format!("{question_id}: expected 3 score components"));
    }

    let option_number: usize = value
        .parse()
        .map_err(|_| format!("{question_id}: option must be a number"))?;
    let question = catalog
        .question(question_id)
        .ok_or_else(|| format!("unknown question {question_id}"))?;

    question
        .responses
        .get(option_number.checked_sub(1).ok_or_else(|| {
            format!("{question_id}: option numbers start at 1")
        })?)
        .map(|option| option.scores)
        .ok_or_else(|| {
            format!(
                "{question_id}: option {} does not exist (1..{})",
                option_number,
                question.responses.len()
            )
        })
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        process::exit(1);
    }

    let catalog = catalog();
    let mut session = Session::new();

    for arg in &args {
        let Some((question_id, value)) = arg.split_once('=') else {
            log_submission_rejected(&format!("cannot parse argument '{arg}'"));
            print_usage();
            process::exit(1);
        };

        let scores = match parse_vector(catalog, question_id, value) {
            Ok(scores) => scores,
            Err(reason) => {
                log_submission_rejected(&reason);
                process::exit(1);
            }
        };

        if let Err(err) = session.set_answer(catalog, question_id, scores) {
            log_submission_rejected(&err.to_string());
            process::exit(1);
        }
    }

    match build_record(catalog, &SurveySubmission::from_session(&session)) {
        Ok(record) => RecordAssessment::new(&record).print(),
        Err(err) => {
            log_submission_rejected(&err.to_string());
            process::exit(1);
        }
    }
}
