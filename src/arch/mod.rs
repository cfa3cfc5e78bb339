//! Implementations of specific processor architectures

pub mod w65c816;
