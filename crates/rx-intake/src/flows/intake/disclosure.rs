use super::answers::AnswerSet;
use super::domain::ClinicalSection;
use super::screens::{self, InputKind, SubQuestion};

/// Progressive-disclosure view over one screen or section: the answered
/// prefix of the currently relevant questions plus the first unanswered one.
/// Completion is derived from the same relevance predicates as visibility.
#[derive(Debug)]
pub struct Disclosure {
    visible: Vec<&'static SubQuestion>,
    relevant_count: usize,
    complete: bool,
}

impl Disclosure {
    pub fn over(questions: &'static [SubQuestion], answers: &AnswerSet) -> Self {
        let relevant: Vec<&'static SubQuestion> = questions
            .iter()
            .filter(|question| (question.relevant)(answers))
            .collect();

        let mut visible = Vec::with_capacity(relevant.len());
        for question in &relevant {
            visible.push(*question);
            if !answers.answered(question.field) {
                break;
            }
        }

        let complete = relevant
            .iter()
            .all(|question| !question.required || answers.answered(question.field));

        Self {
            visible,
            relevant_count: relevant.len(),
            complete,
        }
    }

    pub fn for_section(section: ClinicalSection, answers: &AnswerSet) -> Self {
        Self::over(screens::section_questions(section), answers)
    }

    pub fn visible(&self) -> &[&'static SubQuestion] {
        &self.visible
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn relevant_count(&self) -> usize {
        self.relevant_count
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Single-choice answers reveal the next question without an explicit
    /// continue action. The settle delay before doing so belongs to the
    /// presentation layer; the core transition is synchronous.
    pub fn auto_advances(question: &SubQuestion) -> bool {
        matches!(question.input, InputKind::SingleChoice)
    }
}
