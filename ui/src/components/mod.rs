// Reusable view pieces
pub mod buttons;
pub mod forms;
pub mod layout;
pub mod notifications;
pub mod tables;
