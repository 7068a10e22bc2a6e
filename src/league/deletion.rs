use crate::errors::ApiError;
use crate::league::validation::LeagueValidator;

/// Phases of the league deletion confirmation flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionPhase {
    Idle,
    ConfirmRequested,
    Armed { note: String },
    Executing { note: String },
    Deleted,
}

/// Guarded two-step confirmation for league deletion, independent of any
/// rendering concern.
///
/// Transitions:
/// `Idle -> ConfirmRequested -> Armed(note) -> Executing -> Deleted`,
/// with execution failure falling back to `Armed` (the note survives a
/// retry) and cancel returning to `Idle` from every phase except
/// `Executing`. Arming requires a non-blank justification note, so a
/// blank note is rejected before any network or database call happens.
pub struct DeletionFlow {
    phase: DeletionPhase,
}

impl DeletionFlow {
    pub fn new() -> Self {
        Self {
            phase: DeletionPhase::Idle,
        }
    }

    pub fn phase(&self) -> &DeletionPhase {
        &self.phase
    }

    /// First confirmation step.
    pub fn request_confirmation(&mut self) -> Result<(), ApiError> {
        match self.phase {
            DeletionPhase::Idle => {
                self.phase = DeletionPhase::ConfirmRequested;
                Ok(())
            }
            _ => Err(ApiError::Conflict(
                "A deletion is already being confirmed".into(),
            )),
        }
    }

    /// Second confirmation step: arms the flow with the mandatory
    /// justification note. A blank note leaves the flow where it was.
    pub fn arm(&mut self, note: &str) -> Result<(), ApiError> {
        if self.phase != DeletionPhase::ConfirmRequested {
            return Err(ApiError::Conflict(
                "Deletion must be confirmed before it can be armed".into(),
            ));
        }
        let note = LeagueValidator::new().validate_deletion_note(note)?;
        self.phase = DeletionPhase::Armed { note };
        Ok(())
    }

    /// Move to `Executing` and hand the note to the caller. Only valid
    /// when armed.
    pub fn begin_execution(&mut self) -> Result<String, ApiError> {
        match std::mem::replace(&mut self.phase, DeletionPhase::Idle) {
            DeletionPhase::Armed { note } => {
                self.phase = DeletionPhase::Executing { note: note.clone() };
                Ok(note)
            }
            other => {
                self.phase = other;
                Err(ApiError::Conflict(
                    "Deletion is not armed for execution".into(),
                ))
            }
        }
    }

    /// The delete succeeded; the flow is finished.
    pub fn complete(&mut self) -> Result<(), ApiError> {
        match self.phase {
            DeletionPhase::Executing { .. } => {
                self.phase = DeletionPhase::Deleted;
                Ok(())
            }
            _ => Err(ApiError::Conflict("No deletion is executing".into())),
        }
    }

    /// The delete failed; fall back to `Armed` so the caller can retry
    /// without re-entering the note.
    pub fn fail(&mut self) -> Result<(), ApiError> {
        match std::mem::replace(&mut self.phase, DeletionPhase::Idle) {
            DeletionPhase::Executing { note } => {
                self.phase = DeletionPhase::Armed { note };
                Ok(())
            }
            other => {
                self.phase = other;
                Err(ApiError::Conflict("No deletion is executing".into()))
            }
        }
    }

    /// Abort the flow. Allowed from every phase except `Executing`.
    pub fn cancel(&mut self) -> Result<(), ApiError> {
        if matches!(self.phase, DeletionPhase::Executing { .. }) {
            return Err(ApiError::Conflict(
                "Cannot cancel while the deletion is executing".into(),
            ));
        }
        self.phase = DeletionPhase::Idle;
        Ok(())
    }
}

impl Default for DeletionFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut flow = DeletionFlow::new();
        flow.request_confirmation().unwrap();
        flow.arm("league created by mistake").unwrap();
        let note = flow.begin_execution().unwrap();
        assert_eq!(note, "league created by mistake");
        flow.complete().unwrap();
        assert_eq!(*flow.phase(), DeletionPhase::Deleted);
    }

    #[test]
    fn test_blank_note_rejected_before_arming() {
        let mut flow = DeletionFlow::new();
        flow.request_confirmation().unwrap();
        assert!(flow.arm("   ").is_err());
        // Still waiting on the second confirmation, nothing executed
        assert_eq!(*flow.phase(), DeletionPhase::ConfirmRequested);
        assert!(flow.begin_execution().is_err());
    }

    #[test]
    fn test_cannot_arm_without_confirmation() {
        let mut flow = DeletionFlow::new();
        assert!(flow.arm("note").is_err());
        assert_eq!(*flow.phase(), DeletionPhase::Idle);
    }

    #[test]
    fn test_failure_falls_back_to_armed_and_can_retry() {
        let mut flow = DeletionFlow::new();
        flow.request_confirmation().unwrap();
        flow.arm("cleanup").unwrap();
        flow.begin_execution().unwrap();
        flow.fail().unwrap();
        assert_eq!(
            *flow.phase(),
            DeletionPhase::Armed {
                note: "cleanup".to_string()
            }
        );
        // Retry succeeds without re-entering the note
        assert_eq!(flow.begin_execution().unwrap(), "cleanup");
        flow.complete().unwrap();
    }

    #[test]
    fn test_cancel_allowed_except_while_executing() {
        let mut flow = DeletionFlow::new();
        flow.request_confirmation().unwrap();
        flow.cancel().unwrap();
        assert_eq!(*flow.phase(), DeletionPhase::Idle);

        flow.request_confirmation().unwrap();
        flow.arm("note").unwrap();
        flow.cancel().unwrap();
        assert_eq!(*flow.phase(), DeletionPhase::Idle);

        flow.request_confirmation().unwrap();
        flow.arm("note").unwrap();
        flow.begin_execution().unwrap();
        assert!(flow.cancel().is_err());
    }

    #[test]
    fn test_note_is_trimmed() {
        let mut flow = DeletionFlow::new();
        flow.request_confirmation().unwrap();
        flow.arm("  winding down  ").unwrap();
        assert_eq!(flow.begin_execution().unwrap(), "winding down");
    }
}
