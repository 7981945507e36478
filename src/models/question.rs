/// A multiple-choice question from the bank.
///
/// Ids are assigned by the system (bank loader or `QuizService`) and are
/// unique across all subjects. Sessions hold copies of bank questions, so
/// reordering options for one quiz never touches the bank entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub subject: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl Question {
    pub fn new(
        id: u32,
        subject: &str,
        text: &str,
        options: Vec<String>,
        correct_index: usize,
    ) -> Self {
        Self {
            id,
            subject: subject.to_string(),
            text: text.to_string(),
            options,
            correct_index,
        }
    }

    /// True iff `choice` picks the correct option.
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }
}
