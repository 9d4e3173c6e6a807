use crate::catalog::{Catalog, ScoreVector};

/// Maps a raw score vector back to the 1-based option number the respondent
/// picked, by exact component-wise equality against the question's options.
///
/// `None` means the vector matches nothing in the catalog — expected when the
/// client was built against a newer option set than the server, and treated
/// as "not meaningfully answered" rather than a failure. Ties are ruled out
/// by catalog validation; if one slipped in anyway, the first option in
/// catalog order wins.
pub fn resolve_response_index(
    catalog: &Catalog,
    question_id: &str,
    scores: &ScoreVector,
) -> Option<usize> {
    let question = catalog.question(question_id)?;
    question
        .responses
        .iter()
        .position(|option| option.scores == *scores)
        .map(|index| index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::QUESTION_IDS;

    #[test]
    fn test_every_option_resolves_to_its_own_index() {
        let catalog = Catalog::default();
        for id in QUESTION_IDS {
            let question = catalog.question(id).unwrap();
            for (i, option) in question.responses.iter().enumerate() {
                assert_eq!(
                    resolve_response_index(&catalog, id, &option.scores),
                    Some(i + 1),
                    "{id} option {}",
                    option.id
                );
            }
        }
    }

    #[test]
    fn test_unknown_vector_is_a_miss() {
        let catalog = Catalog::default();
        assert_eq!(resolve_response_index(&catalog, "Q1", &[10, 20, 30]), None);
        assert_eq!(resolve_response_index(&catalog, "Q1", &[25, 50, 25]), None);
    }

    #[test]
    fn test_unknown_question_is_a_miss() {
        let catalog = Catalog::default();
        assert_eq!(resolve_response_index(&catalog, "Q9", &[100, 0, 0]), None);
    }

    #[test]
    fn test_no_tolerance_matching() {
        let catalog = Catalog::default();
        assert_eq!(resolve_response_index(&catalog, "Q1", &[99, 0, 0]), None);
        assert_eq!(resolve_response_index(&catalog, "Q1", &[100, 0, 1]), None);
    }
}
