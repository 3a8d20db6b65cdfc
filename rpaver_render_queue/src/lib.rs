// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! RPAVER Render Queue: staged admission of images into a gallery strip.
//!
//! A gallery mounts one image slot per index `0..total`. Starting every network
//! fetch at once makes the whole strip stall behind the slowest file, so this
//! crate decides which slots are allowed to start loading and admits exactly one
//! more slot each time an admitted image settles (loads or fails).
//!
//! The core concepts are:
//!
//! - [`admission_order`]: the outside-in permutation of `0..total` in which
//!   slots are admitted. Both ends of the strip fill first and admission works
//!   its way toward the middle.
//! - [`RenderScheduler`]: the owned state holder. Hosts query
//!   [`RenderScheduler::is_admitted`] when deciding whether to mount an `<img>`
//!   (or platform equivalent), and forward every load or error event to
//!   [`RenderScheduler::on_settled`].
//!
//! ## Minimal example
//!
//! ```rust
//! use rpaver_render_queue::RenderScheduler;
//!
//! let mut scheduler = RenderScheduler::new(5);
//! assert_eq!(scheduler.order(), &[0, 4, 1, 3, 2]);
//!
//! // Only the first slot may start loading.
//! assert!(scheduler.is_admitted(0));
//! assert!(!scheduler.is_admitted(4));
//!
//! // Image 0 finished loading: slot 4 is admitted next.
//! assert_eq!(scheduler.on_load(0), Some(4));
//!
//! // Image 4 failed: failures advance the queue exactly like successes.
//! assert_eq!(scheduler.on_error(4), Some(1));
//! assert_eq!(scheduler.admitted_len(), 3);
//! ```
//!
//! ## Settle contract
//!
//! The scheduler does not track *which* image settled, only that one did. Each
//! admitted image is expected to settle exactly once. Extra calls keep advancing
//! until every slot is admitted and are no-ops afterwards. An admitted image that
//! never settles stalls admission; there is no timeout.
//!
//! Opening a different folder is modeled as [`RenderScheduler::initialize`] with
//! the new length, which discards all prior admission state.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod order;
mod scheduler;

pub use order::admission_order;
pub use scheduler::RenderScheduler;
