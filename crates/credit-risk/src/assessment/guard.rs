use super::domain::ApplicantProfile;

/// Range violations caught before a profile reaches the encoder.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileViolation {
    #[error("{field} must be between {min} and {max} (found {found})")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        found: f64,
    },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

/// Inclusive bounds for the numeric intake fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileLimits {
    pub age: (u32, u32),
    pub employment_length_years: (u32, u32),
    pub credit_history_years: (u32, u32),
    pub interest_rate_pct: (f64, f64),
    pub min_loan_amount: f64,
}

impl Default for ProfileLimits {
    fn default() -> Self {
        Self {
            age: (18, 100),
            employment_length_years: (0, 50),
            credit_history_years: (0, 50),
            interest_rate_pct: (0.0, 100.0),
            min_loan_amount: 0.0,
        }
    }
}

/// Re-checks intake ranges for callers that bypass the form widgets.
///
/// Income positivity and category membership are left to the encoder.
#[derive(Debug, Clone, Default)]
pub struct ProfileGuard {
    limits: ProfileLimits,
}

impl ProfileGuard {
    pub fn with_limits(limits: ProfileLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ProfileLimits {
        &self.limits
    }

    pub fn check(&self, profile: &ApplicantProfile) -> Result<(), ProfileViolation> {
        let limits = &self.limits;

        whole_in_range("age", profile.age, limits.age)?;
        whole_in_range(
            "employment_length_years",
            profile.employment_length_years,
            limits.employment_length_years,
        )?;
        whole_in_range(
            "credit_history_years",
            profile.credit_history_years,
            limits.credit_history_years,
        )?;

        finite("annual_income", profile.annual_income)?;
        finite("loan_amount", profile.loan_amount)?;
        finite("interest_rate_pct", profile.interest_rate_pct)?;

        decimal_in_range(
            "interest_rate_pct",
            profile.interest_rate_pct,
            limits.interest_rate_pct,
        )?;
        decimal_in_range(
            "loan_amount",
            profile.loan_amount,
            (limits.min_loan_amount, f64::MAX),
        )?;

        Ok(())
    }
}

fn whole_in_range(
    field: &'static str,
    value: u32,
    (min, max): (u32, u32),
) -> Result<(), ProfileViolation> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ProfileViolation::OutOfRange {
            field,
            min: f64::from(min),
            max: f64::from(max),
            found: f64::from(value),
        })
    }
}

fn decimal_in_range(
    field: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), ProfileViolation> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ProfileViolation::OutOfRange {
            field,
            min,
            max,
            found: value,
        })
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ProfileViolation> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ProfileViolation::NotFinite { field })
    }
}
