/*
 * Copyright the Cora project authors. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! This module defines the core, framework agnostic, HTTP middleware
//! interface of the pipeline
//!
//! `cora-http-tower` provides Tower-specific middleware utilities.

use crate::operation;
use std::error::Error;

type BoxError = Box<dyn Error + Send + Sync>;

/// [`MapRequest`] defines a synchronous middleware that transforms an
/// [`operation::Request`].
///
/// The hosting pipeline invokes each stage exactly once per outgoing
/// request, immediately before the request is handed to the connector.
/// Stages typically read configuration from the
/// [`PropertyBag`](crate::property_bag::PropertyBag) and use it to augment
/// the request.
///
/// ```rust
/// # use cora_http::middleware::MapRequest;
/// # use std::convert::Infallible;
/// # use cora_http::operation;
/// use http::header::{HeaderValue, HOST};
/// /// The resolved endpoint, written to the property bag during operation construction
/// struct Endpoint(HeaderValue);
/// struct SetHost;
/// impl MapRequest for SetHost {
///     type Error = Infallible;
///     fn apply(&self, request: operation::Request) -> Result<operation::Request, Self::Error> {
///         request.augment(|mut request, properties| {
///             if let Some(endpoint) = properties.get::<Endpoint>() {
///                 let host = endpoint.0.clone();
///                 request.headers_mut().insert(HOST, host);
///             }
///             Ok(request)
///         })
///     }
/// }
/// ```
pub trait MapRequest {
    /// The error type returned by this stage.
    ///
    /// Stages that cannot fail use [`std::convert::Infallible`].
    type Error: Into<BoxError>;

    /// Apply this middleware to a request.
    ///
    /// Implementations will usually use
    /// [`Request::augment`](crate::operation::Request::augment) to be able
    /// to transform an owned `http::Request`. Failures are surfaced to the
    /// pipeline without translation.
    fn apply(&self, request: operation::Request) -> Result<operation::Request, Self::Error>;
}
