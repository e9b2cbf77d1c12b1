pub mod contact;
pub mod mailjet;
