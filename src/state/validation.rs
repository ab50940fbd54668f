//! Required-field validation
//!
//! Validation is a pure function of the form. The controller applies the
//! result wholesale, so flags never drift from the data they describe.

use super::attendee::Attendee;
use super::invitation::InvitationForm;

/// Error flags for one attendee
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: bool,
    pub age: bool,
}

impl FieldErrors {
    /// Flags for an attendee: blank (after trim) name, unset age
    pub fn check(attendee: &Attendee) -> Self {
        Self {
            name: attendee.name.trim().is_empty(),
            age: attendee.age_bracket.is_none(),
        }
    }

    pub fn any(&self) -> bool {
        self.name || self.age
    }

    pub fn count(&self) -> usize {
        usize::from(self.name) + usize::from(self.age)
    }
}

/// Result of one validation pass, shaped like the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub primary: FieldErrors,
    pub companions: Vec<FieldErrors>,
}

impl Validation {
    /// True when at least one field is invalid
    pub fn has_errors(&self) -> bool {
        self.primary.any() || self.companions.iter().any(FieldErrors::any)
    }

    /// Number of invalid fields across the whole form
    pub fn error_count(&self) -> usize {
        self.primary.count() + self.companions.iter().map(FieldErrors::count).sum::<usize>()
    }
}

/// Recompute every flag from scratch
pub fn validate(form: &InvitationForm) -> Validation {
    Validation {
        primary: FieldErrors::check(&form.primary),
        companions: form
            .companions
            .iter()
            .map(|entry| FieldErrors::check(&entry.attendee))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::attendee::AgeBracket;

    fn filled(name: &str) -> Attendee {
        Attendee::new(name, Some(AgeBracket::OverTen))
    }

    #[test]
    fn test_blank_attendee_has_both_errors() {
        let errors = FieldErrors::check(&Attendee::default());
        assert!(errors.name);
        assert!(errors.age);
        assert_eq!(errors.count(), 2);
    }

    #[test]
    fn test_whitespace_name_is_invalid() {
        let errors = FieldErrors::check(&Attendee::new(" \t ", Some(AgeBracket::UpToFive)));
        assert!(errors.name);
        assert!(!errors.age);
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        let mut form = InvitationForm::default();
        form.primary = filled("Ana");
        form.push_companion(filled("Leo"));

        let validation = validate(&form);
        assert!(!validation.has_errors());
        assert_eq!(validation.error_count(), 0);
        assert_eq!(validation.companions.len(), 1);
    }

    #[test]
    fn test_companion_errors_follow_index() {
        let mut form = InvitationForm::default();
        form.primary = filled("Ana");
        form.push_companion(filled("Leo"));
        form.push_companion(Attendee::new("", Some(AgeBracket::UpToFive)));

        let validation = validate(&form);
        assert_eq!(validation.companions[0], FieldErrors::default());
        assert_eq!(
            validation.companions[1],
            FieldErrors {
                name: true,
                age: false
            }
        );
        assert_eq!(validation.error_count(), 1);
    }

    #[test]
    fn test_validate_is_idempotent() {
        let mut form = InvitationForm::default();
        form.push_companion(Attendee::new("Leo", None));

        let first = validate(&form);
        let second = validate(&form);
        assert_eq!(first, second);
    }
}
