/*
 * Copyright the Cora project authors. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Core HTTP middleware interface for the Cora client pipeline.
//!
//! This crate defines the framework-agnostic pieces of the request pipeline:
//! the [`Body`](body::Body) dispatched with each request, the
//! [`PropertyBag`](property_bag::PropertyBag) of per-request configuration,
//! the in-flight [`operation::Request`], and the
//! [`MapRequest`](middleware::MapRequest) trait implemented by middleware
//! stages.
//!
//! Tower-specific shims for mounting these stages live in `cora-http-tower`.

pub mod body;
pub mod middleware;
pub mod operation;
pub mod property_bag;
