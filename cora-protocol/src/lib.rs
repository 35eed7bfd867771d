/*
 * Copyright the Cora project authors. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Protocol-level middleware stages for the Cora client pipeline.

pub mod accept_encoding;
