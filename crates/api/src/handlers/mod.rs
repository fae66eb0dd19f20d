pub mod auth;
pub mod catalog;
pub mod materials;
pub mod users;
pub mod vehicles;
