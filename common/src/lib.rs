//! Reizo-Dad Common Library
//!
//! CLIとWeb(WASM)で共有される型・プロンプト・セッション状態機械

pub mod types;
pub mod image;
pub mod error;
pub mod prompts;
pub mod parser;
pub mod session;

pub use types::{AnalysisResult, Difficulty, Ingredient, Recipe};
pub use image::ImagePayload;
pub use error::{Error, Result};
pub use prompts::{response_schema, ANALYSIS_ERROR_MESSAGE, SYSTEM_INSTRUCTION, USER_PROMPT};
pub use parser::{extract_json, parse_analysis_response};
pub use session::{AnalysisTicket, Phase, Session};
