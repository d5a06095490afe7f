//! Classified statement types
//!
//! Lines are classified one at a time, right before they run. Expressions
//! stay as source text because their meaning depends on which variables
//! exist at the moment they are evaluated.

use serde::{Deserialize, Serialize};

/// Declared type of a variable slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    Int,
    Float,
    Bool,
    #[serde(rename = "string")]
    Str,
}

impl VarType {
    /// Map a type keyword (either spelling) onto its canonical type
    ///
    /// Unknown type words declare a string slot, since such slots accept
    /// input verbatim.
    pub fn from_keyword(word: &str) -> Self {
        match word {
            "int" | "core" => VarType::Int,
            "float" | "flux" => VarType::Float,
            "bool" | "sig" => VarType::Bool,
            "string" | "glyph" => VarType::Str,
            _ => VarType::Str,
        }
    }
}

/// One `name` or `name = expr` entry of a declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declarator {
    pub name: String,
    pub init: Option<String>,
}

/// Statement classified from a single line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Stmt {
    /// `var int a, b = 1` / `shard core a, b = 1`
    Declare {
        ty: VarType,
        decls: Vec<Declarator>,
    },
    /// `input x` / `listen x`
    Input { name: String },
    /// `output expr` / `broadcast expr`
    Output { expr: String },
    /// `name = expr`
    Assign { name: String, expr: String },
    /// `if (test)` / `probe (test)` header; the blocks follow on later lines
    If { test: String },
    /// `while (test)` / `pulse (test)` header
    While { test: String },
    /// Brace lines, else-introducers and anything unrecognised
    Nop,
}
