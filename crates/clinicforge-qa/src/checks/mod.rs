//! The eight audit categories run against a customized site.

pub mod accessibility;
pub mod code_quality;
pub mod content;
pub mod cross_platform;
pub mod integration;
pub mod performance;
pub mod security;
pub mod seo;
