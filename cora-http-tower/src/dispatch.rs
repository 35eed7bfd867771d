/*
 * Copyright the Cora project authors. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::SendOperationError;
use cora_http::body::Body;
use cora_http::operation;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{BoxError, Layer, Service};
use tracing::debug;

/// `DispatchLayer` terminates a middleware stack by handing the finished
/// request to an HTTP connector.
#[derive(Debug, Default, Clone)]
pub struct DispatchLayer;

impl DispatchLayer {
    pub fn new() -> Self {
        DispatchLayer
    }
}

impl<S> Layer<S> for DispatchLayer
where
    S: Service<http::Request<Body>>,
{
    type Service = DispatchService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DispatchService { inner }
    }
}

/// A Tower service which strips the property bag from an
/// [`operation::Request`] and dispatches the bare HTTP request to the inner
/// connector
///
/// Connector errors surface as
/// [`SendOperationError::RequestDispatchError`].
#[derive(Debug, Clone)]
pub struct DispatchService<S> {
    inner: S,
}

type BoxedResultFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

impl<S, B> Service<operation::Request> for DispatchService<S>
where
    S: Service<http::Request<Body>, Response = http::Response<B>>,
    S::Error: Into<BoxError>,
    S::Future: Send + 'static,
    B: 'static,
{
    type Response = http::Response<B>;
    type Error = SendOperationError;
    type Future = BoxedResultFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner
            .poll_ready(cx)
            .map_err(|e| SendOperationError::RequestDispatchError(e.into()))
    }

    fn call(&mut self, req: operation::Request) -> Self::Future {
        let (req, _properties) = req.into_parts();
        debug!(method = %req.method(), uri = %req.uri(), "dispatching request");
        let future = self.inner.call(req);
        Box::pin(async move {
            future
                .await
                .map_err(|e| SendOperationError::RequestDispatchError(e.into()))
        })
    }
}

#[cfg(test)]
mod test {
    use crate::dispatch::DispatchLayer;
    use crate::SendOperationError;
    use cora_http::body::Body;
    use cora_http::operation;
    use std::convert::Infallible;
    use tower::{service_fn, Layer, Service, ServiceExt};

    #[tokio::test]
    async fn strips_the_property_bag_and_forwards_the_request() {
        let mut service = DispatchLayer::new().layer(service_fn(
            |req: http::Request<Body>| async move {
                assert_eq!(req.uri(), "http://localhost/ping");
                Ok::<_, Infallible>(http::Response::new(Body::from("pong")))
            },
        ));
        let mut request = operation::Request::new(
            http::Request::builder()
                .uri("http://localhost/ping")
                .body(Body::empty())
                .expect("valid request"),
        );
        request.properties_mut().insert("some property");
        let response = service
            .ready()
            .await
            .expect("connector is ready")
            .call(request)
            .await
            .expect("dispatch succeeds");
        assert_eq!(response.body().bytes().unwrap(), "pong".as_bytes());
    }

    #[tokio::test]
    async fn connector_errors_surface_as_dispatch_errors() {
        let mut service = DispatchLayer::new().layer(service_fn(
            |_req: http::Request<Body>| async move {
                Err::<http::Response<Body>, _>(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))
            },
        ));
        let request = operation::Request::new(
            http::Request::builder()
                .uri("http://localhost")
                .body(Body::empty())
                .expect("valid request"),
        );
        let err = service
            .ready()
            .await
            .expect("connector is ready")
            .call(request)
            .await
            .expect_err("connector failed");
        assert!(matches!(err, SendOperationError::RequestDispatchError(_)));
    }
}
