//! Error types for liquid-lab.

use thiserror::Error;

/// Longest frame interval a run may request, in milliseconds.
pub const MAX_FRAME_MS: f64 = 60_000.0;

/// Errors produced by simulation, surface, and host operations.
///
/// None of these are fatal to a running simulation: a surface failure drops
/// one frame, a scheduling failure parks the loop in `Idle`.
#[derive(Debug, Error)]
pub enum LabError {
    /// Width or height was zero, negative, or not finite.
    #[error("invalid dimensions: width and height must be positive and finite")]
    InvalidDimensions,

    /// A frame interval was negative, not finite, or too long to pace.
    #[error("invalid frame interval: {0} ms (expected 0 to {max} ms)", max = MAX_FRAME_MS)]
    InvalidFrameInterval(f64),

    /// A field mode name was not recognized.
    #[error("unknown field mode: {0} (expected attract or repel)")]
    UnknownMode(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A render surface rejected a frame.
    #[error("render surface error: {0}")]
    Surface(String),

    /// A frame host could not schedule the next frame.
    #[error("frame scheduling failed: {0}")]
    Schedule(String),

    /// Reading or writing an external file failed.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = LabError::InvalidDimensions.to_string();
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn invalid_frame_interval_includes_value_and_limit() {
        let msg = LabError::InvalidFrameInterval(-5.0).to_string();
        assert!(msg.contains("-5 ms") && msg.contains("60000"), "got: {msg}");
    }

    #[test]
    fn unknown_mode_includes_name_and_choices() {
        let msg = LabError::UnknownMode("vortex".into()).to_string();
        assert!(msg.contains("vortex"), "missing mode name in: {msg}");
        assert!(msg.contains("attract") && msg.contains("repel"));
    }

    #[test]
    fn surface_error_includes_message() {
        let msg = LabError::Surface("non-finite center".into()).to_string();
        assert!(msg.contains("non-finite center"), "missing message in: {msg}");
    }

    #[test]
    fn schedule_error_includes_message() {
        let msg = LabError::Schedule("no window".into()).to_string();
        assert!(msg.contains("no window"), "missing message in: {msg}");
    }

    #[test]
    fn lab_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LabError>();
    }

    #[test]
    fn lab_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<LabError>();
    }
}
