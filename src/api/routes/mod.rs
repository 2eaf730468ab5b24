pub mod health;
pub mod highlights;
pub mod magic;
pub mod standings;
pub mod teams;
