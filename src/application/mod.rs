//! Application layer with use cases, forms and the session-gated client.

/// Data transfer objects.
pub mod dto;
/// Entity form schemas and state.
pub mod forms;
/// Application services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{LoginRequest, LoginResponse, SessionSource};
pub use services::{GestaoClient, NotificationManager, SessionAccessor};
pub use use_cases::{
    LoginUseCase, LogoutUseCase, ResolveSessionUseCase, ResolvedSession, SubmitFormUseCase,
    SubmitOutcome,
};
