//! Command handlers

pub mod convert;
pub mod inspect;
