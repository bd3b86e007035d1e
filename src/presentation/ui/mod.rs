//! Terminal screens and the loop that drives them.

mod app;
mod backend;
mod login_screen;
mod notification_popup;
pub mod pages;

pub use app::App;
pub use backend::{Action, Backend, BackendCommand, DashboardCounts, Epoch, PageData};
pub use login_screen::{LoginAction, LoginScreen, LoginState};
pub use notification_popup::NotificationPopup;
