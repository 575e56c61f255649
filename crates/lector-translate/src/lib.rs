#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod config;
pub mod error;
mod provider;

pub use crate::client::TranslateClient;
pub use crate::config::TranslateConfig;
pub use crate::error::{Error, Result};
pub use crate::provider::TranslationProvider;
