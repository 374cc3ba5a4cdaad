// src/logging.rs

use anyhow::Result;
use flexi_logger::{FileSpec, Logger, LoggerHandle};

/// Routes the `log` facade to `parley.log` in the working directory. The
/// terminal owns stdout while the widget is mounted, so nothing may log
/// there. The returned handle must stay alive for the program's lifetime.
pub fn init_logging() -> Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str("info")?
        .log_to_file(FileSpec::default().basename("parley").suppress_timestamp())
        .start()?;
    Ok(handle)
}
