//! Weekly timetable generator.
//!
//! Courses are read from a CSV sheet ([`parser`]), the day's slots come from
//! a [`schedule::SlotConfig`] (built-in or from form fields, see [`form`]),
//! and [`schedule::schedule_courses`] places lab, lecture and tutorial
//! sessions across Monday to Friday. The result can be printed, rendered to
//! HTML ([`display`]), exported to CSV or served over HTTP ([`web`]).

pub mod parser;
pub mod schedule;
pub mod form;
pub mod display;
pub mod web;
