//! bookstall application library
//!
//! Hosts the project-specific modules mounted by the bookstall framework.

pub mod modules;
