//! Profile-completeness eligibility gate.
//!
//! A user may request admission only once every required profile field is
//! filled in. The gate is a pure predicate: it never touches storage and
//! has no side effects.

use serde::Serialize;

use crate::error::AdmissionError;
use crate::model::AttendeeProfile;

/// Profile fields that must be present before any admission request.
pub const REQUIRED_PROFILE_FIELDS: &[&str] = &[
    "first_name",
    "last_name",
    "phone",
    "email",
    "shirt_size",
    "dietary_restrictions",
    "accessibility_needs",
];

/// Completeness summary produced by the profile collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCompleteness {
    /// Required fields that are empty or absent, in declaration order.
    pub missing_fields: Vec<String>,
    /// Percentage of required fields present, 0-100.
    pub percent: u8,
}

/// Compute completeness from a stored profile.
///
/// A field counts as missing when it is absent or blank after trimming.
pub fn completeness(profile: &AttendeeProfile) -> ProfileCompleteness {
    let values: [(&str, &Option<String>); 7] = [
        ("first_name", &profile.first_name),
        ("last_name", &profile.last_name),
        ("phone", &profile.phone),
        ("email", &profile.email),
        ("shirt_size", &profile.shirt_size),
        ("dietary_restrictions", &profile.dietary_restrictions),
        ("accessibility_needs", &profile.accessibility_needs),
    ];

    let missing_fields: Vec<String> = values
        .iter()
        .filter(|(_, value)| match value {
            Some(v) => v.trim().is_empty(),
            None => true,
        })
        .map(|(name, _)| (*name).to_string())
        .collect();

    let total = REQUIRED_PROFILE_FIELDS.len();
    let present = total - missing_fields.len();
    let percent = (present * 100 / total) as u8;

    ProfileCompleteness {
        missing_fields,
        percent,
    }
}

/// Gate an admission request on profile completeness.
pub fn check_eligibility(completeness: &ProfileCompleteness) -> Result<(), AdmissionError> {
    if completeness.missing_fields.is_empty() {
        Ok(())
    } else {
        Err(AdmissionError::Ineligible {
            missing_fields: completeness.missing_fields.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn full_profile() -> AttendeeProfile {
        AttendeeProfile {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            phone: Some("+1 555 0100".into()),
            email: Some("ada@example.com".into()),
            shirt_size: Some("M".into()),
            dietary_restrictions: Some("none".into()),
            accessibility_needs: Some("none".into()),
            ..AttendeeProfile::default()
        }
    }

    #[test]
    fn complete_profile_is_eligible() {
        let c = completeness(&full_profile());
        assert_eq!(c.percent, 100);
        assert!(c.missing_fields.is_empty());
        assert!(check_eligibility(&c).is_ok());
    }

    #[test]
    fn missing_field_is_named_exactly() {
        let mut profile = full_profile();
        profile.dietary_restrictions = None;

        let c = completeness(&profile);
        assert_eq!(c.missing_fields, vec!["dietary_restrictions".to_string()]);

        assert_matches!(
            check_eligibility(&c),
            Err(AdmissionError::Ineligible { missing_fields })
                if missing_fields == vec!["dietary_restrictions".to_string()]
        );
    }

    #[test]
    fn blank_string_counts_as_missing() {
        let mut profile = full_profile();
        profile.phone = Some("   ".into());

        let c = completeness(&profile);
        assert_eq!(c.missing_fields, vec!["phone".to_string()]);
    }

    #[test]
    fn empty_profile_misses_every_field() {
        let c = completeness(&AttendeeProfile::default());
        assert_eq!(c.missing_fields.len(), REQUIRED_PROFILE_FIELDS.len());
        assert_eq!(c.percent, 0);
    }

    #[test]
    fn percent_reflects_partial_completion() {
        let mut profile = AttendeeProfile::default();
        profile.first_name = Some("Ada".into());
        profile.last_name = Some("Lovelace".into());
        profile.email = Some("ada@example.com".into());

        // 3 of 7 fields present.
        let c = completeness(&profile);
        assert_eq!(c.percent, 42);
        assert_eq!(c.missing_fields.len(), 4);
    }
}
