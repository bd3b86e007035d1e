mod data_table;
mod input;
mod status_bar;

pub use data_table::{DataTable, TableCursor};
pub use input::TextInput;
pub use status_bar::{StatusBar, StatusLevel};
