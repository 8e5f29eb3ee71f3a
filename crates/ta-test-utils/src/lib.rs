//! # TA Test Utilities
//!
//! Shared test utilities for the text analysis service.
//!
//! This crate provides:
//! - Test data builders (TestTokenBuilder for forging JWTs)
//! - Server test harness (TestServer for E2E tests)
//! - Custom assertions (TokenAssertions trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ta_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), anyhow::Error> {
//!     let server = TestServer::spawn().await?;
//!     let token = server.obtain_token().await?;
//!
//!     token.assert_valid_jwt()
//!          .assert_for_subject("1");
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod server_harness;
pub mod token_builders;

// Re-export commonly used items
pub use assertions::*;
pub use server_harness::*;
pub use token_builders::*;
