use thiserror::Error;

/// Engine errors. Nothing here is fatal to the host: `InvalidMonitor` and
/// `NoMonitors` signal a broken host contract, `UnknownDisplay` is a
/// recoverable miss the caller answers by recomputing for the window's
/// current monitor.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("monitor {id:?} reported degenerate geometry ({width}x{height} @ scale {scale_factor})")]
    InvalidMonitor {
        id: String,
        width: i32,
        height: i32,
        scale_factor: f64,
    },

    #[error("host returned an empty monitor enumeration")]
    NoMonitors,

    #[error("no attached display matches fingerprint {fingerprint:?}")]
    UnknownDisplay { fingerprint: String },
}
