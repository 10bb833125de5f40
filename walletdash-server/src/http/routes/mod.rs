//! Route handlers organized by resource

pub mod email;
pub mod health;
pub mod innkeeper;
pub mod items;
pub mod profiles;
pub mod tables;
