use crate::core::store::CardStore;
use crate::domain::model::Verdict;

/// Case folding shared by command dispatch and answer grading.
pub fn normalize(input: &str) -> String {
    input.to_lowercase()
}

pub fn same_text(left: &str, right: &str) -> bool {
    normalize(left) == normalize(right)
}

/// Grades `answer` against the card `term`. `None` if the card is gone.
pub fn grade(store: &CardStore, term: &str, answer: &str) -> Option<Verdict> {
    let expected = store.lookup_definition(term)?;
    if same_text(expected, answer) {
        return Some(Verdict::Correct);
    }

    // The asked card already failed `same_text`, so any match is another card.
    let verdict = match store.find_term_matching(answer, same_text) {
        Some(other) => Verdict::CorrectForOther(other.to_string()),
        None => Verdict::Wrong,
    };
    Some(verdict)
}
