//! Campus Assist — campus-information chat agent.

pub mod catalog;
pub mod channels;
pub mod config;
pub mod content;
pub mod dialog;
pub mod error;
pub mod resolver;
pub mod rotation;
pub mod session;
