// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Custom error types for ringkit.
//!
//! Explicit enum error types only. No `Box<dyn Error>`, no `anyhow::Result`.
//! Every failure is reported to the immediate caller; nothing here retries.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for ringkit.
#[derive(Debug, Error)]
pub enum RingkitError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    // =========================================================================
    // Ring Buffer Errors
    // =========================================================================
    #[error("Ring buffer error: {0}")]
    Ring(#[from] RingError),

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the ring buffers and the mapping primitive beneath them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RingError {
    /// Heap allocation, backing object creation or address space reservation failed.
    #[error("Failed to allocate {requested} bytes: {reason}")]
    AllocationFailure { requested: usize, reason: String },

    /// A fixed mapping failed after address space was reserved.
    /// The reservation has already been released when this is returned.
    #[error("Failed to map ring storage: {reason}")]
    MappingFailure { reason: String },

    #[error("Not enough space: {requested} requested, {available} available")]
    InsufficientSpace { requested: usize, available: usize },

    #[error("Not enough data: {requested} requested, {available} available")]
    InsufficientData { requested: usize, available: usize },

    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

/// Validation errors for configuration values.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unknown buffer kind: {value} (expected one of: bounded, mapped)")]
    UnknownBufferKind { value: String },
}

/// Result type alias using RingkitError.
pub type RingkitResult<T> = Result<T, RingkitError>;
