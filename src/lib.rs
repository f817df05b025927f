//! Sluice - Cache-Backed Sliding-Window Rate Limiting
//!
//! This crate implements a sliding-window rate limiter that keeps all of
//! its state in a shared key-value cache, so any number of processes
//! pointed at the same cache enforce one logical quota. The cache is an
//! opaque collaborator behind the [`cache::Cache`] trait; an in-process
//! backend is provided, and networked backends plug in without touching
//! the algorithm.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod ratelimit;
