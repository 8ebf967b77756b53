pub use std::sync::Arc;
pub use std::time::{Duration as StdDuration, Instant};

pub use anyhow::{anyhow, Context as _};
pub use tracing::{debug, error, info, instrument, warn};

pub type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;
