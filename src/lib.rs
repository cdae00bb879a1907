// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod command;
pub mod config;
pub mod constants;
pub mod diff;
pub mod error;
pub mod payload;
pub mod reconcilers;
pub mod types;

#[cfg(test)]
pub mod test_utils;
