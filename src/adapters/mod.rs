// Adapters - External system implementations

pub mod clip_name;
pub mod exec_ffmpeg;
pub mod fs_local;
pub mod mock;
pub mod probe_ffprobe;
pub mod toml_config;

// Re-export adapters
pub use clip_name::ClipNameAdapter;
pub use exec_ffmpeg::FFmpegAdapter;
pub use fs_local::FsLocalAdapter;
pub use mock::{ExecCall, MockExecutionAdapter, MockProbeAdapter};
pub use probe_ffprobe::FFprobeAdapter;
pub use toml_config::TomlConfigAdapter;
