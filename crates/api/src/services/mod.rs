pub mod chips;
pub mod lifecycle;
pub mod players;
pub mod registration;
pub mod seating;
