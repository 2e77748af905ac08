pub mod conversation;
pub mod grade;
