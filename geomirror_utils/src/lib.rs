mod logging;
mod mirror_args;

pub use logging::init_logging;
pub use mirror_args::MirrorArgs;

pub use tracing;
