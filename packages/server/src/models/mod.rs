pub mod auth;
pub mod certificate;
pub mod experience;
pub mod i18n;
pub mod job;
pub mod project;
pub mod shared;
pub mod social;
pub mod tag;
pub mod technology;
