pub mod check_in_commands;
pub mod registration_commands;
