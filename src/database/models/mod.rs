pub mod tooth_attachment;
pub mod treatment_plan;

pub use tooth_attachment::{CreateToothAttachment, NewToothAttachment, ToothAttachment};
pub use treatment_plan::{CreateTreatmentPlan, NewTreatmentPlan, PlanStatus, TreatmentPlan};

use thiserror::Error;

/// A create payload was missing one or more mandatory fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", required_fields_message(.required))]
pub struct MissingFields {
    /// Every mandatory field of the payload, in declaration order.
    pub required: &'static [&'static str],
    /// The subset that was absent or empty.
    pub missing: Vec<&'static str>,
}

/// "a, b, and c are required"
pub fn required_fields_message(fields: &[&str]) -> String {
    match fields {
        [] => "Required fields missing".to_string(),
        [only] => format!("{} is required", only),
        [first, second] => format!("{} and {} are required", first, second),
        [init @ .., last] => format!("{}, and {} are required", init.join(", "), last),
    }
}

/// Treat empty strings the same as absent values.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Build the error for a payload, given which of `required` were present.
pub(crate) fn missing_fields(required: &'static [&'static str], present: &[bool]) -> MissingFields {
    let missing = required
        .iter()
        .zip(present)
        .filter(|(_, ok)| !**ok)
        .map(|(name, _)| *name)
        .collect();

    MissingFields { required, missing }
}
