// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod aws;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod handlers;
pub mod normalize;
pub mod response;
pub mod types;

#[cfg(test)]
pub mod test_utils;
