//! Integration tests for Layer 1: Grammar
//!
//! Tests for rule primitives, combinators, transforms, and the dispatcher.

mod combinators;
mod dispatch;
mod primitives;
mod properties;
