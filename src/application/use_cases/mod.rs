//! Use case implementations.

mod login_use_case;
mod logout_use_case;
mod resolve_session_use_case;
mod submit_form_use_case;

pub use login_use_case::LoginUseCase;
pub use logout_use_case::LogoutUseCase;
pub use resolve_session_use_case::{ResolveSessionUseCase, ResolvedSession};
pub use submit_form_use_case::{SubmitFormUseCase, SubmitOutcome};
