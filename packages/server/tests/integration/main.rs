mod common;

mod auth;
mod certificates;
mod i18n;
mod media;
mod tags;
mod technologies;
