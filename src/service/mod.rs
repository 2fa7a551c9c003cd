pub mod intake;
pub mod validator;

pub use intake::{ApplyOutcome, IntakeService};
pub use validator::{parse_apply_payload, validate_apply_payload};
