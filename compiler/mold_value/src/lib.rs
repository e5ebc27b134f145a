//! Mold Value - the data model shared by the parser and the evaluator.
//!
//! Documents enter the engine as a [`Value`] tree and evaluation produces a
//! [`Value`] tree again. Numbers are exact [`Decimal`]s: literals such as
//! `0.1` are stored as an integer magnitude plus a scale and never pass
//! through binary floating point.
//!
//! # Contents
//!
//! - [`Decimal`]: arbitrary precision decimal with cycle-detecting division
//! - [`Value`], [`Map`]: the tagged union and its insertion-ordered map
//! - [`Segment`]: one step of a `select` projection
//! - [`merge`]: structural merge of map and sequence fragments

mod decimal;
mod merge;
mod value;

pub use decimal::{Decimal, DecimalError, DEFAULT_MIN_SCALE};
pub use merge::{merge, MergeError};
pub use value::{Map, Segment, Value};
