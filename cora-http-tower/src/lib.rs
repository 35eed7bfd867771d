/*
 * Copyright the Cora project authors. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Tower-compatible shims for Cora middleware.
//!
//! [`MapRequestLayer`](map_request::MapRequestLayer) runs a synchronous
//! [`MapRequest`](cora_http::middleware::MapRequest) stage inside a
//! [`tower::Service`] stack, and [`DispatchLayer`](dispatch::DispatchLayer)
//! terminates the stack by handing the finished request to an HTTP
//! connector.

pub mod dispatch;
pub mod map_request;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error occurred attempting to send an operation to a service.
#[derive(Debug, Error)]
pub enum SendOperationError {
    /// The request could not be constructed
    ///
    /// These errors stem from a middleware stage failing during the request
    /// preparation chain. The stage's own error is preserved as the source.
    #[error("failed to construct request: {0}")]
    RequestConstructionError(#[source] BoxError),

    /// The request could not be dispatched by the connector
    #[error("failed to dispatch request: {0}")]
    RequestDispatchError(#[source] BoxError),
}
