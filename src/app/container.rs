use std::sync::Arc;

use crate::adapters::{ClipNameAdapter, FFmpegAdapter, FFprobeAdapter, FsLocalAdapter};
use crate::app::stitch_interactor::StitchInteractor;
use crate::config_initialization::StitchConfig;
use crate::ports::{ClipNamePort, ExecutePort, FsPort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn stitch_interactor(&self) -> Arc<StitchInteractor>;
}

/// Wires the interactor to the local filesystem and the ffmpeg tools
pub struct DefaultAppContainer {
    stitch_interactor: Arc<StitchInteractor>,
}

impl DefaultAppContainer {
    pub fn new(config: StitchConfig) -> Self {
        let fs_port = Arc::new(FsLocalAdapter::new());
        let name_port = Arc::new(ClipNameAdapter::new(config.name_format.clone()));
        let probe_port = Arc::new(FFprobeAdapter::new(config.ffprobe_path.clone()));
        let execute_port = Arc::new(FFmpegAdapter::new(config.ffmpeg_path.clone()));

        let stitch_interactor = Arc::new(StitchInteractor::new(
            fs_port as Arc<dyn FsPort>,
            name_port as Arc<dyn ClipNamePort>,
            probe_port as Arc<dyn ProbePort>,
            execute_port as Arc<dyn ExecutePort>,
            config,
        ));

        Self { stitch_interactor }
    }
}

impl AppContainer for DefaultAppContainer {
    fn stitch_interactor(&self) -> Arc<StitchInteractor> {
        Arc::clone(&self.stitch_interactor)
    }
}
