//! SML: a small register machine.
//!
//! Source text is translated by [`sml::asm`] into a [`sml::Program`] and its
//! [`sml::Labels`], which a [`sml::Machine`] then runs against eight `i32` registers.

pub mod sml;
