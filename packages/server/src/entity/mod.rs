pub mod certificate;
pub mod experience;
pub mod job;
pub mod media;
pub mod project;
pub mod project_tag;
pub mod project_technology;
pub mod social;
pub mod tag;
pub mod technology;
pub mod user;
