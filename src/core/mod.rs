//! Core markup scanning primitives
//!
//! This module contains the building blocks shared by the locator and merger:
//! - Scanner: SIMD-accelerated delimiter detection using memchr
//! - Attributes: span-level attribute tokenizing inside an opening tag
//! - Compound: the `prop: value; prop: value` mini-syntax

pub mod attributes;
pub mod compound;
pub mod scanner;
