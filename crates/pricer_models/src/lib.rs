//! # Pricer Models (L2: Business Logic)
//!
//! Stochastic process models driven by live market quotes.
//!
//! This crate provides:
//! - The one-dimensional stochastic process contract used by path generators
//! - Euler and end-of-step Euler discretizations
//! - A Black-Scholes process with constant rate, dividend yield and volatility
//! - Configuration loading (TOML / environment) for process parameters
//!
//! ## Design Principles
//!
//! - **Generic parameters and enums** for static dispatch
//! - **Quotes read on demand** so parameter updates apply without rebuilding models
//! - **Errors surfaced, never swallowed**: an unset quote fails the call that reads it

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod processes;
