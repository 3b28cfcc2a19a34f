//! Submission Validation
//!
//! Pure checks that gate every submission before any network call is
//! issued. `can_submit` runs its checks in a fixed order and reports
//! only the first failure.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::domain::Submission;

/// Why a submission cannot go out. `Display` carries the inline message
/// shown on the form page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Apenas maiores de 18 anos podem assinar.")]
    Underage,
    #[error("Você precisa aceitar os termos para continuar.")]
    TermsNotAccepted,
    #[error("Por favor, adicione sua assinatura.")]
    SignatureMissing,
    #[error("Informe o nome completo do(s) filho(s) para registrá-los.")]
    MinorNamesMissing,
}

/// Whole years elapsed between `birth` and `today`, one less if today's
/// month/day still precedes the birthday. The 18th birthday itself
/// already counts as 18.
pub fn compute_age(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

pub fn is_eligible(birth: NaiveDate, today: NaiveDate) -> bool {
    compute_age(birth, today) >= 18
}

/// Gate a frozen submission. Check order is contractual: age, then
/// terms, then signature; the minor-names check runs last.
pub fn can_submit(submission: &Submission, today: NaiveDate) -> Result<(), ValidationError> {
    if !is_eligible(submission.birth_date, today) {
        return Err(ValidationError::Underage);
    }
    if !submission.accepts_terms {
        return Err(ValidationError::TermsNotAccepted);
    }
    if submission.signature.is_empty() {
        return Err(ValidationError::SignatureMissing);
    }
    if submission.register_minors && submission.minor_names.is_empty() {
        return Err(ValidationError::MinorNamesMissing);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Submission, SubmissionForm};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn submission(form: SubmissionForm) -> Submission {
        Submission::from_form(form).unwrap()
    }

    fn base_form() -> SubmissionForm {
        SubmissionForm {
            full_name: "Maria Souza".into(),
            email: "maria@example.com".into(),
            birth_date: "1990-05-14".into(),
            id_document: "123.456.789-00".into(),
            emergency_phone: "+55 12 99999-0000".into(),
            register_minors: false,
            minor_names: String::new(),
            accepts_terms: true,
            signature_image: "data:image/png;base64,iVBORw0KGgo=".into(),
        }
    }

    #[test]
    fn test_age_counts_whole_years() {
        assert_eq!(compute_age(ymd(1990, 5, 14), ymd(2026, 5, 13)), 35);
        assert_eq!(compute_age(ymd(1990, 5, 14), ymd(2026, 5, 14)), 36);
        assert_eq!(compute_age(ymd(1990, 5, 14), ymd(2026, 5, 15)), 36);
    }

    #[test]
    fn test_eighteenth_birthday_today_is_eligible() {
        assert!(is_eligible(ymd(2008, 8, 7), ymd(2026, 8, 7)));
    }

    #[test]
    fn test_one_day_short_of_eighteen_is_not_eligible() {
        assert!(!is_eligible(ymd(2008, 8, 8), ymd(2026, 8, 7)));
    }

    #[test]
    fn test_leap_day_birthday_counts_from_march_first() {
        // Feb 29 birth, non-leap year: the birthday has passed by Mar 1
        assert!(!is_eligible(ymd(2008, 2, 29), ymd(2026, 2, 28)));
        assert!(is_eligible(ymd(2008, 2, 29), ymd(2026, 3, 1)));
    }

    #[test]
    fn test_underage_reported_first() {
        // Everything fails at once; only the age failure is reported
        let sub = submission(SubmissionForm {
            birth_date: "2010-01-01".into(),
            accepts_terms: false,
            signature_image: String::new(),
            ..base_form()
        });
        assert_eq!(
            can_submit(&sub, ymd(2026, 8, 7)),
            Err(ValidationError::Underage)
        );
    }

    #[test]
    fn test_terms_reported_before_signature() {
        let sub = submission(SubmissionForm {
            accepts_terms: false,
            signature_image: String::new(),
            ..base_form()
        });
        assert_eq!(
            can_submit(&sub, ymd(2026, 8, 7)),
            Err(ValidationError::TermsNotAccepted)
        );
    }

    #[test]
    fn test_missing_signature_rejected() {
        let sub = submission(SubmissionForm {
            signature_image: String::new(),
            ..base_form()
        });
        assert_eq!(
            can_submit(&sub, ymd(2026, 8, 7)),
            Err(ValidationError::SignatureMissing)
        );
    }

    #[test]
    fn test_registering_minors_requires_names() {
        let sub = submission(SubmissionForm {
            register_minors: true,
            minor_names: "  ".into(),
            ..base_form()
        });
        assert_eq!(
            can_submit(&sub, ymd(2026, 8, 7)),
            Err(ValidationError::MinorNamesMissing)
        );

        let sub = submission(SubmissionForm {
            register_minors: true,
            minor_names: "João Souza".into(),
            ..base_form()
        });
        assert_eq!(can_submit(&sub, ymd(2026, 8, 7)), Ok(()));
    }

    #[test]
    fn test_valid_adult_passes() {
        let sub = submission(base_form());
        assert_eq!(can_submit(&sub, ymd(2026, 8, 7)), Ok(()));
    }
}
