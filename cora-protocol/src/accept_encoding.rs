/*
 * Copyright the Cora project authors. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use cora_http::middleware::MapRequest;
use cora_http::operation::Request;
use http::header::ACCEPT_ENCODING;
use http::HeaderValue;
use std::convert::Infallible;

const GZIP_CODEC: &str = "gzip";

/// Accept-Encoding Middleware
///
/// This stage advertises gzip support to the server so the response body may
/// be sent compressed. If the outgoing request already carries an
/// `Accept-Encoding` header the caller's preference stands, whatever its
/// value, and the request passes through untouched. Otherwise
/// `Accept-Encoding: gzip` is inserted.
///
/// Decompressing the response belongs to the HTTP stack the pipeline is
/// mounted on, not to this stage.
#[non_exhaustive]
#[derive(Debug, Default, Clone)]
pub struct AcceptEncodingStage;

impl AcceptEncodingStage {
    /// Creates a new `AcceptEncodingStage`
    pub fn new() -> Self {
        Self::default()
    }
}

impl MapRequest for AcceptEncodingStage {
    type Error = Infallible;

    fn apply(&self, request: Request) -> Result<Request, Self::Error> {
        request.augment(|mut req, _properties| {
            if !req.headers().contains_key(ACCEPT_ENCODING) {
                req.headers_mut()
                    .insert(ACCEPT_ENCODING, HeaderValue::from_static(GZIP_CODEC));
            }
            Ok(req)
        })
    }
}
