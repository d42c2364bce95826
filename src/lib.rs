pub mod catalog;
pub mod comparison;
pub mod config;
pub mod error;
pub mod fallback;
pub mod llm;
pub mod logger;
pub mod mock;
pub mod models;
pub mod normalize;
pub mod prompts;
pub mod recommend;
pub mod router;
pub mod session;
pub mod shape;
