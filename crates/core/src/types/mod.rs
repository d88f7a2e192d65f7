//! Core types for Bizniz.
//!
//! This module provides the entity structs exchanged with the remote API and
//! type-safe wrappers for their identifiers.

pub mod company;
pub mod employee;
pub mod id;

pub use company::{Company, CompanyDraft};
pub use employee::{Employee, EmployeeDraft};
pub use id::*;
