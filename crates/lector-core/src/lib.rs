#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

//! # Lector Core
//!
//! Foundational types for the lector document reading service. This crate
//! defines the task record that tracks one upload from creation to its
//! terminal state, plus the language-code helpers shared by the detection
//! and translation layers. It contains no I/O.

mod lang;
mod task;

pub use crate::lang::{DEFAULT_LANGUAGE, to_iso639_1};
pub use crate::task::{TaskRecord, TaskStatus};
