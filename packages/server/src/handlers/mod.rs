pub mod auth;
pub mod certificates;
pub mod experiences;
pub mod i18n;
pub mod jobs;
pub mod media;
pub mod projects;
pub mod socials;
pub mod tags;
pub mod technologies;
