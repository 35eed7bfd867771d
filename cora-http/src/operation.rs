/*
 * Copyright the Cora project authors. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::body::Body;
use crate::property_bag::PropertyBag;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex};

/// The mutable representation of an outgoing request inside the middleware
/// pipeline.
#[derive(Debug)]
pub struct Request {
    /// The underlying HTTP request
    inner: http::Request<Body>,

    /// Properties attached to this request by middleware
    ///
    /// The bag is shared between a request and its clones so that a retried
    /// dispatch observes the same configuration.
    properties: Arc<Mutex<PropertyBag>>,
}

impl Request {
    pub fn new(base: http::Request<Body>) -> Self {
        Request {
            inner: base,
            properties: Arc::new(Mutex::new(PropertyBag::new())),
        }
    }

    /// Transform the request with `f`, giving the closure mutable access to
    /// the property bag alongside the owned HTTP request.
    ///
    /// Errors returned by the closure are surfaced to the caller unchanged.
    pub fn augment<T>(
        self,
        f: impl FnOnce(http::Request<Body>, &mut PropertyBag) -> Result<http::Request<Body>, T>,
    ) -> Result<Request, T> {
        let inner = {
            let properties: &mut PropertyBag = &mut self.properties.lock().unwrap();
            f(self.inner, properties)?
        };
        Ok(Request {
            inner,
            properties: self.properties,
        })
    }

    pub fn http(&self) -> &http::Request<Body> {
        &self.inner
    }

    pub fn http_mut(&mut self) -> &mut http::Request<Body> {
        &mut self.inner
    }

    pub fn properties(&self) -> impl Deref<Target = PropertyBag> + '_ {
        self.properties.lock().unwrap()
    }

    pub fn properties_mut(&mut self) -> impl DerefMut<Target = PropertyBag> + '_ {
        self.properties.lock().unwrap()
    }

    /// Clone this request, if its body is replayable
    ///
    /// The clone shares the property bag with the original.
    pub fn try_clone(&self) -> Option<Request> {
        let cloned_body = self.inner.body().try_clone()?;
        let mut cloned_request = http::Request::builder()
            .uri(self.inner.uri().clone())
            .method(self.inner.method());
        *cloned_request
            .headers_mut()
            .expect("builder has not been modified, headers must be valid") =
            self.inner.headers().clone();
        let inner = cloned_request
            .body(cloned_body)
            .expect("a clone of a valid request should be a valid request");
        Some(Request {
            inner,
            properties: self.properties.clone(),
        })
    }

    pub fn into_parts(self) -> (http::Request<Body>, Arc<Mutex<PropertyBag>>) {
        (self.inner, self.properties)
    }
}
