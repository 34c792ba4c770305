// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Database factory and the connection descriptors it produces

pub mod database;
pub mod descriptor;

pub use database::{DatabaseFactory, CURRENT_RELEASE};
pub use descriptor::{mart_dataset_prefix_for, ConnectionDescriptor, DatabaseKind};
