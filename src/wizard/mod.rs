pub mod driver;
pub mod form;
pub mod session;
pub mod step;
pub mod submission;
pub mod validation;
pub mod view;

pub use form::{Field, FieldError, FormData};
pub use session::{
    Advance, Applied, NetworkRequest, SubmitRequest, Submission, SubnetRequest, WizardError,
    WizardSession,
};
pub use step::Step;
pub use submission::{build_payload, SubmissionError, SubmissionResult};
pub use validation::{validate_step, Resolved};
pub use view::{InFlight, SubmissionView, WizardView};
