// ABOUTME: Utility modules shared across the bridge
// ABOUTME: Currently just timeout-bounded HTTP client construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// HTTP client configuration and helpers
pub mod http_client;
