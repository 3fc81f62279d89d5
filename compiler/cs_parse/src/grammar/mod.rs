//! Grammar productions.
//!
//! Each module extends `Parser` with the methods for one area:
//!
//! - [`item`]: compilation unit, namespaces, type and member declarations
//! - [`ty`]: types and names
//! - [`stmt`]: statements
//! - [`expr`]: expressions, lambdas, object and array creation
//! - [`query`]: query expressions (`from ... select ...`)
//!
//! Productions never fail: a production always leaves a node of the kind
//! it promises, with missing tokens where the input fell short.

mod expr;
mod item;
mod query;
mod stmt;
mod ty;
