use serde::{Deserialize, Serialize};

use super::answers::AnswerSet;
use super::domain::{fields, ClinicalSection, FlowError, ScreenId};
use super::screens::{self, TOTAL_STEPS};

/// Position within the flow. Together with the answer set this fully
/// reconstructs where a resumed session stands; there are no hidden
/// counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowState {
    pub screen: ScreenId,
    pub section: usize,
}

impl FlowState {
    pub fn start() -> Self {
        Self {
            screen: ScreenId::Welcome,
            section: 0,
        }
    }

    pub fn at(screen: ScreenId) -> Self {
        Self { screen, section: 0 }
    }
}

/// Progress indicator for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowProgress {
    pub step: u8,
    pub total: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
}

pub fn progress(screen: ScreenId) -> FlowProgress {
    let descriptor = screens::descriptor(screen);
    FlowProgress {
        step: descriptor.step,
        total: TOTAL_STEPS,
        label: descriptor.label,
    }
}

/// The forward edge out of a screen. Pure in the screen id and answers so a
/// flow resumed from persisted answers lands on the same screen.
pub fn next_screen(current: ScreenId, answers: &AnswerSet) -> Result<ScreenId, FlowError> {
    match current {
        ScreenId::Welcome => Ok(ScreenId::Basics),
        ScreenId::Basics => Ok(ScreenId::ClinicalIntro),
        ScreenId::ClinicalIntro => Ok(ScreenId::ClinicalAssessment),
        ScreenId::ClinicalAssessment => Ok(ScreenId::Glp1Experience),
        ScreenId::Glp1Experience => {
            if answers.has_token(fields::GLP1_EXPERIENCE, "yes") {
                Ok(ScreenId::Glp1History)
            } else {
                Ok(ScreenId::MedicationChoice)
            }
        }
        ScreenId::Glp1History => Ok(ScreenId::MedicationChoice),
        ScreenId::MedicationChoice => Ok(ScreenId::Review),
        ScreenId::Review => Ok(ScreenId::Confirmation),
        ScreenId::Confirmation | ScreenId::Exclusion => Err(FlowError::NoForwardEdge(current)),
    }
}

/// The backward edge. Not "index minus one": which screen led into the
/// medication choice is reconstructed from the answers, since the history
/// screen is only visited when GLP-1 experience was reported.
pub fn previous_screen(current: ScreenId, answers: &AnswerSet) -> Result<ScreenId, FlowError> {
    match current {
        ScreenId::Basics => Ok(ScreenId::Welcome),
        ScreenId::ClinicalIntro => Ok(ScreenId::Basics),
        ScreenId::ClinicalAssessment => Ok(ScreenId::ClinicalIntro),
        ScreenId::Glp1Experience => Ok(ScreenId::ClinicalAssessment),
        ScreenId::Glp1History => Ok(ScreenId::Glp1Experience),
        ScreenId::MedicationChoice => {
            if answers.has_token(fields::GLP1_EXPERIENCE, "yes") {
                Ok(ScreenId::Glp1History)
            } else {
                Ok(ScreenId::Glp1Experience)
            }
        }
        ScreenId::Review => Ok(ScreenId::MedicationChoice),
        ScreenId::Welcome | ScreenId::Confirmation | ScreenId::Exclusion => {
            Err(FlowError::NoBackwardEdge(current))
        }
    }
}

/// Moves the state one step forward: within the clinical assessment this is
/// one section, otherwise one screen.
pub fn advance(state: FlowState, answers: &AnswerSet) -> Result<FlowState, FlowError> {
    if state.screen == ScreenId::ClinicalAssessment && state.section < ClinicalSection::last_index()
    {
        return Ok(FlowState {
            screen: state.screen,
            section: state.section + 1,
        });
    }
    Ok(FlowState::at(next_screen(state.screen, answers)?))
}

/// Moves the state one step back. Inside the clinical assessment this walks
/// sections until the first, after which it delegates to the screen-level
/// edge; stepping back into the assessment lands on its last section.
pub fn retreat(state: FlowState, answers: &AnswerSet) -> Result<FlowState, FlowError> {
    if state.screen == ScreenId::ClinicalAssessment && state.section > 0 {
        return Ok(FlowState {
            screen: state.screen,
            section: state.section - 1,
        });
    }
    let screen = previous_screen(state.screen, answers)?;
    let section = if screen == ScreenId::ClinicalAssessment {
        ClinicalSection::last_index()
    } else {
        0
    };
    Ok(FlowState { screen, section })
}
