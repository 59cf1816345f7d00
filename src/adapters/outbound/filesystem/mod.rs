/// Filesystem adapters for writing rendered artifacts
mod output_directory;

pub use output_directory::OutputDirectory;
