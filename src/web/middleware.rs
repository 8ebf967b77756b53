pub use self::error::ErrorMiddleware;
pub use self::sentry::SentryMiddleware;

mod error;
mod sentry;
