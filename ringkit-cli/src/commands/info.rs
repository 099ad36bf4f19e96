// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `ringkit info` command - Show buffer geometry for a requested length.

use ringkit_core::ring::page_size;
use ringkit_core::{BoundedRingBuffer, Capacity, ConfigLoader, MappedRingBuffer};

pub fn execute(capacity: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    let requested = match capacity {
        Some(bytes) => Capacity::new(bytes)?,
        None => ConfigLoader::defaults()?.buffer.capacity,
    };
    let length = requested.bytes();
    tracing::debug!(length, "Inspecting buffer geometry");

    let page = page_size()?;
    let bounded = BoundedRingBuffer::new(length)?;
    let mapped = MappedRingBuffer::new(length)?;

    println!("Requested Length:   {} bytes", length);
    println!("Page Size:          {} bytes", page);
    println!();
    println!("Bounded Buffer:");
    println!("  Storage Slots:    {}", bounded.capacity() + 1);
    println!("  Capacity:         {} bytes", bounded.capacity());
    println!();
    println!("Mapped Buffer:");
    println!("  Mapped Length:    {} bytes", mapped.mapped_len());
    println!("  Reserved Span:    {} bytes", mapped.mapped_len() * 2);
    println!("  Capacity:         {} bytes", mapped.capacity());

    Ok(())
}
