// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Logging macros that forward to `tracing` when the `tracing` feature is
//! enabled and compile to nothing otherwise.

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub use tracing::{debug, info, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop {
    macro_rules! noop_debug {
        ($($arg:tt)*) => {};
    }
    macro_rules! noop_info {
        ($($arg:tt)*) => {};
    }
    macro_rules! noop_trace {
        ($($arg:tt)*) => {};
    }
    macro_rules! noop_warn {
        ($($arg:tt)*) => {};
    }
    // `warn` would clash with the built-in lint attribute under its own name.
    #[allow(unused_imports)]
    pub(crate) use {noop_debug as debug, noop_info as info, noop_trace as trace, noop_warn as warn};
}

#[cfg(not(feature = "tracing"))]
#[allow(unused_imports)]
pub(crate) use noop::*;

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    // Builds with and without the `tracing` feature.
    #[test]
    fn macros_accept_structured_fields() {
        debug!(blocks = 4, "debug");
        info!(width = 8, height = 8, "info");
        trace!(count = 12, "trace");
        warn!(path = %std::path::Path::new("frame.bpeg").display(), "warn");
    }
}
