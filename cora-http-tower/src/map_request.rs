/*
 * Copyright the Cora project authors. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::SendOperationError;
use cora_http::middleware::MapRequest;
use cora_http::operation;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// `MapRequestLayer` mounts a synchronous [`MapRequest`] stage into a Tower
/// service stack.
#[derive(Debug, Default, Clone)]
pub struct MapRequestLayer<M> {
    mapper: M,
}

impl<M> MapRequestLayer<M> {
    /// Mount `mapper` as a layer
    pub fn for_mapper(mapper: M) -> Self {
        MapRequestLayer { mapper }
    }
}

impl<S, M> Layer<S> for MapRequestLayer<M>
where
    M: Clone,
{
    type Service = MapRequestService<S, M>;

    fn layer(&self, inner: S) -> Self::Service {
        MapRequestService {
            inner,
            mapper: self.mapper.clone(),
        }
    }
}

/// A Tower service which transforms requests with a [`MapRequest`] stage
/// before passing them to the inner service
///
/// A mapper failure short-circuits the stack: the inner service is not
/// called and the error surfaces as
/// [`SendOperationError::RequestConstructionError`].
#[derive(Debug, Clone)]
pub struct MapRequestService<S, M> {
    inner: S,
    mapper: M,
}

type BoxedResultFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

impl<S, M> Service<operation::Request> for MapRequestService<S, M>
where
    S: Service<operation::Request, Error = SendOperationError>,
    S::Response: 'static,
    S::Future: Send + 'static,
    M: MapRequest,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxedResultFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: operation::Request) -> Self::Future {
        match self
            .mapper
            .apply(req)
            .map_err(|e| SendOperationError::RequestConstructionError(e.into()))
        {
            Err(e) => Box::pin(async move { Err(e) }),
            Ok(req) => Box::pin(self.inner.call(req)),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::map_request::MapRequestLayer;
    use crate::SendOperationError;
    use cora_http::body::Body;
    use cora_http::middleware::MapRequest;
    use cora_http::operation;
    use http::header::{HeaderName, HeaderValue};
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tower::{service_fn, Layer, Service, ServiceExt};

    fn test_request() -> operation::Request {
        operation::Request::new(
            http::Request::builder()
                .uri("http://localhost")
                .body(Body::empty())
                .expect("valid request"),
        )
    }

    #[derive(Clone)]
    struct AddHeader(&'static str, &'static str);

    impl MapRequest for AddHeader {
        type Error = Infallible;

        fn apply(&self, request: operation::Request) -> Result<operation::Request, Self::Error> {
            request.augment(|mut request, _properties| {
                request.headers_mut().insert(
                    HeaderName::from_static(self.0),
                    HeaderValue::from_static(self.1),
                );
                Ok(request)
            })
        }
    }

    #[derive(Clone)]
    struct Poisoned;

    impl MapRequest for Poisoned {
        type Error = std::io::Error;

        fn apply(&self, _request: operation::Request) -> Result<operation::Request, Self::Error> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))
        }
    }

    #[tokio::test]
    async fn mapper_runs_before_the_inner_service() {
        let mut service = MapRequestLayer::for_mapper(AddHeader("x-test", "value")).layer(
            service_fn(|req: operation::Request| async move {
                let (req, _properties) = req.into_parts();
                assert_eq!(req.headers().get("x-test").unwrap(), "value");
                Ok::<_, SendOperationError>(http::Response::new(Body::empty()))
            }),
        );
        service
            .ready()
            .await
            .expect("poll_ready is infallible here")
            .call(test_request())
            .await
            .expect("mapper and inner service succeed");
    }

    #[tokio::test]
    async fn mapper_failure_short_circuits() {
        let called = Arc::new(AtomicBool::new(false));
        let called_flag = called.clone();
        let mut service =
            MapRequestLayer::for_mapper(Poisoned).layer(service_fn(move |_req: operation::Request| {
                let called = called_flag.clone();
                async move {
                    called.store(true, Ordering::SeqCst);
                    Ok::<_, SendOperationError>(http::Response::new(Body::empty()))
                }
            }));
        let err = service
            .ready()
            .await
            .expect("poll_ready is infallible here")
            .call(test_request())
            .await
            .expect_err("mapper failure must surface");
        assert!(matches!(
            err,
            SendOperationError::RequestConstructionError(_)
        ));
        assert!(!called.load(Ordering::SeqCst));
    }
}
