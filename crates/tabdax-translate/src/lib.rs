//! # tabdax-translate
//!
//! Translates Tableau calculated-field expressions to DAX.
//!
//! This crate provides:
//! - An ordered rule catalogue (function name → DAX template)
//! - A single-pass rule engine over that catalogue
//! - Level-of-detail (`{FIXED ...}`) conversion
//! - `IF`/`ELSEIF` and `CASE` rewriting into `SWITCH(TRUE(), ...)`
//! - A dispatcher that picks the right converter per expression
//!
//! Translation is textual and total: unrecognized text passes through
//! unchanged and no expression produces an error.
//!
//! ## Example
//!
//! ```rust
//! use tabdax_translate::{TranslateOptions, Translator};
//!
//! let translator = Translator::new(TranslateOptions::for_table("Table"));
//! assert_eq!(
//!     translator.translate(Some("{FIXED [Region]: SUM([Sales])}")).as_deref(),
//!     Some("CALCULATE(SUM([Sales]), ALLEXCEPT('Table', 'Table'[Region]))")
//! );
//! ```

pub mod branch;
pub mod case;
pub mod chain;
pub mod engine;
pub mod error;
pub mod lod;
pub mod rules;
pub mod scanner;
pub mod table;
pub mod translator;

pub use case::CaseSubject;
pub use chain::{ConditionalBlock, ConditionalChain};
pub use engine::RuleEngine;
pub use error::{TranslateError, TranslateResult};
pub use lod::{LodConverter, Scope, ScopedAggregation};
pub use rules::{Family, Rewrite, Rule, RuleInfo, RuleTable};
pub use table::{TableName, DEFAULT_TABLE_NAME};
pub use translator::{
    translate, Explanation, Route, TranslateOptions, Translator, DEFAULT_MAX_INPUT_LEN,
};
