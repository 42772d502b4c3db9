//! Output generation for the finished report.
//!
//! # Submodules
//!
//! - [`markdown`]: prints the report and saves it to the working directory
//!
//! # Output Structure
//!
//! ```text
//! ./
//! └── news_20250430_1320.md
//! ```

pub mod markdown;
