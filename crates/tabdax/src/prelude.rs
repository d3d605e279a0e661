//! Prelude module - common imports for tabdax users
//!
//! ```rust
//! use tabdax::prelude::*;
//! ```

pub use crate::{
    // Batch conversion
    ConversionOptions,
    ConversionStats,
    SheetConverter,

    // Translation
    CaseSubject,
    Route,
    RuleTable,
    TableName,
    TranslateOptions,
    Translator,

    // I/O types
    SheetReader,
    SheetWriter,

    Error,
    Result,
};
