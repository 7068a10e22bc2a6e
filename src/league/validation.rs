use crate::errors::ApiError;
use crate::models::league::CreateLeagueRequest;

/// Centralized validation for league operations. Everything here runs
/// before any database statement is issued.
pub struct LeagueValidator;

impl LeagueValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a league creation request.
    pub fn validate_create_league(&self, request: &CreateLeagueRequest) -> Result<(), ApiError> {
        self.validate_league_name(&request.name)?;

        if request.max_users < 2 {
            return Err(ApiError::validation(format!(
                "A league needs room for at least 2 members, got {}",
                request.max_users
            )));
        }

        if request.max_users > 500 {
            return Err(ApiError::validation(format!(
                "Maximum 500 members allowed, got {}",
                request.max_users
            )));
        }

        if request.start_date > request.end_date {
            return Err(ApiError::validation(
                "League start date must not be after its end date",
            ));
        }

        Ok(())
    }

    /// Validate a league name.
    pub fn validate_league_name(&self, name: &str) -> Result<(), ApiError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(ApiError::validation("League name cannot be empty"));
        }

        if trimmed_name.len() > 255 {
            return Err(ApiError::validation(
                "League name too long (maximum 255 characters)",
            ));
        }

        if trimmed_name.contains('\0') {
            return Err(ApiError::validation(
                "League name contains invalid characters",
            ));
        }

        // Ensure name has actual content (not just whitespace/special chars)
        if !trimmed_name.chars().any(|c| c.is_alphanumeric()) {
            return Err(ApiError::validation(
                "League name must contain alphanumeric characters",
            ));
        }

        Ok(())
    }

    /// Validate the mandatory justification note for destructive
    /// operations. Returns the trimmed note.
    pub fn validate_deletion_note(&self, note: &str) -> Result<String, ApiError> {
        let trimmed = note.trim();

        if trimmed.is_empty() {
            return Err(ApiError::validation(
                "A justification note is required to delete a league",
            ));
        }

        Ok(trimmed.to_string())
    }
}
