pub mod selection_model;

pub use selection_model::{resolve_choice, Dropdown, DropdownOption, SelectionModel, TeamChoice};
