//! HTTP request handlers

pub mod ai;
pub mod health;
