// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! commit-timeline library
//!
//! This module exports the configuration and run loop of the commit-timeline
//! binary for use in integration tests.

pub mod app;
pub mod config;
