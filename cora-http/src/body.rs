/*
 * Copyright the Cora project authors. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use bytes::Bytes;
use http::{HeaderMap, HeaderValue};
use std::error::Error;
use std::pin::Pin;
use std::task::{Context, Poll};

type BodyError = Box<dyn Error + Send + Sync>;

/// Body type for outgoing requests
///
/// This is the body used when dispatching requests through the middleware
/// pipeline. Response bodies are owned by whatever HTTP stack the pipeline
/// is mounted on.
#[derive(Debug)]
pub enum Body {
    Once(Option<Bytes>),
}

impl Body {
    pub fn empty() -> Self {
        Body::Once(None)
    }

    /// The contents of this body, if it is loaded into memory
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Body::Once(Some(bytes)) => Some(bytes),
            Body::Once(None) => Some(&[]),
        }
    }

    /// Attempt to clone this body so the request can be replayed
    ///
    /// In-memory bodies always clone. Bodies that cannot be replayed return
    /// `None`.
    pub fn try_clone(&self) -> Option<Body> {
        match self {
            Body::Once(bytes) => Some(Body::Once(bytes.clone())),
        }
    }

    fn poll_inner(&mut self) -> Poll<Option<Result<Bytes, BodyError>>> {
        match self {
            Body::Once(ref mut opt) => {
                let data = opt.take();
                match data {
                    Some(bytes) => Poll::Ready(Some(Ok(bytes))),
                    None => Poll::Ready(None),
                }
            }
        }
    }
}

impl From<&str> for Body {
    fn from(s: &str) -> Self {
        Body::Once(Some(Bytes::copy_from_slice(s.as_bytes())))
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Body::Once(Some(Bytes::from(s)))
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Once(Some(bytes))
    }
}

impl From<Vec<u8>> for Body {
    fn from(data: Vec<u8>) -> Body {
        Self::from(Bytes::from(data))
    }
}

impl http_body::Body for Body {
    type Data = Bytes;
    type Error = BodyError;

    fn poll_data(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Self::Data, Self::Error>>> {
        self.poll_inner()
    }

    fn poll_trailers(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Result<Option<HeaderMap<HeaderValue>>, Self::Error>> {
        Poll::Ready(Ok(None))
    }

    fn is_end_stream(&self) -> bool {
        matches!(self, Body::Once(None))
    }

    fn size_hint(&self) -> http_body::SizeHint {
        match self {
            Body::Once(Some(bytes)) => http_body::SizeHint::with_exact(bytes.len() as u64),
            Body::Once(None) => http_body::SizeHint::with_exact(0),
        }
    }
}
