use std::fs::OpenOptions;
use std::io;
use std::path::Path;

/// Routes `log` output to a file so it does not draw over the terminal UI.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    env_logger::Builder::from_env(env_logger::Env::new().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}
