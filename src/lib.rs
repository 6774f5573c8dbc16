//! Attendance Eligibility Engine for shift-based check-in and check-out.
//!
//! This crate decides, for an employee, a scheduled shift, the current time
//! and the current location, whether a check-in or check-out is permitted.
//! It also aggregates attendance records into weekly summaries, payroll
//! lines and period statistics, and validates schedule drafts and settings
//! updates before they are sent to the backend.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
