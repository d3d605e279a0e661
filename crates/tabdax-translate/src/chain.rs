//! Conditional chains and their `SWITCH(TRUE(), ...)` rendering

use std::fmt;

/// Ordered condition → result pairs with an optional default
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionalChain {
    pub branches: Vec<(String, String)>,
    pub default: Option<String>,
}

impl ConditionalChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, condition: impl Into<String>, result: impl Into<String>) {
        self.branches.push((condition.into(), result.into()));
    }

    /// Set the fallback result; blank text means no fallback
    pub fn set_default(&mut self, default: impl Into<String>) {
        let default = default.into();
        self.default = if default.trim().is_empty() {
            None
        } else {
            Some(default)
        };
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// `SWITCH(TRUE(), c1, r1, c2, r2, ..., default)`
    pub fn to_switch(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ConditionalChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SWITCH(TRUE()")?;
        for (condition, result) in &self.branches {
            write!(f, ", {condition}, {result}")?;
        }
        if let Some(default) = &self.default {
            write!(f, ", {default}")?;
        }
        f.write_str(")")
    }
}

/// A parsed conditional block plus whatever followed its closing `END`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalBlock {
    pub chain: ConditionalChain,
    pub trailing: String,
}

impl ConditionalBlock {
    /// The switch form, followed by any trailing text
    pub fn render(&self) -> String {
        if self.trailing.is_empty() {
            self.chain.to_switch()
        } else {
            format!("{} {}", self.chain, self.trailing)
        }
    }
}
