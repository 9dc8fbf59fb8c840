//! Ambient sound playback.
//!
//! Sound is a capability behind the [`AmbientSound`] trait so the engine
//! stays testable without an audio device. Playback failures are never
//! surfaced to the caller — blocked or missing audio must not break the
//! viewing experience, so every implementation logs and carries on.

/// Ambient-track playback controls. Infallible by contract: errors are
/// swallowed and logged by implementations.
pub trait AmbientSound {
    /// Start (or resume) the ambient track.
    fn play(&mut self);
    /// Pause the ambient track.
    fn pause(&mut self);
}

/// Silent implementation for headless use and tests.
#[derive(Debug, Default)]
pub struct NullSound;

impl AmbientSound for NullSound {
    fn play(&mut self) {}
    fn pause(&mut self) {}
}

#[cfg(feature = "viewer")]
pub use rodio_sound::RodioSound;

#[cfg(feature = "viewer")]
mod rodio_sound {
    use std::fs::File;
    use std::io::BufReader;

    use rodio::source::Source;
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

    use super::AmbientSound;

    /// Rodio-backed ambient sound: decodes the configured track once and
    /// loops it on a paused sink until the pointer enters the viewport.
    ///
    /// Construction failures (no output device, missing or undecodable
    /// track) degrade to silence with a log line.
    pub struct RodioSound {
        // The stream must outlive the sink or playback stops.
        _stream: Option<OutputStream>,
        _handle: Option<OutputStreamHandle>,
        sink: Option<Sink>,
    }

    impl RodioSound {
        /// Set up playback for `track`, or a silent fallback on failure.
        #[must_use]
        pub fn new(track: Option<&str>) -> Self {
            let silent = Self {
                _stream: None,
                _handle: None,
                sink: None,
            };
            let Some(track) = track else {
                return silent;
            };

            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    log::warn!("no audio output device: {e}");
                    return silent;
                }
            };
            let sink = match Sink::try_new(&handle) {
                Ok(sink) => sink,
                Err(e) => {
                    log::warn!("failed to create audio sink: {e}");
                    return silent;
                }
            };
            let file = match File::open(track) {
                Ok(file) => file,
                Err(e) => {
                    log::warn!("cannot open ambient track {track:?}: {e}");
                    return silent;
                }
            };
            let source = match Decoder::new(BufReader::new(file)) {
                Ok(decoder) => decoder.repeat_infinite(),
                Err(e) => {
                    log::warn!("cannot decode ambient track {track:?}: {e}");
                    return silent;
                }
            };

            sink.append(source);
            sink.pause();
            log::debug!("ambient track {track:?} ready");

            Self {
                _stream: Some(stream),
                _handle: Some(handle),
                sink: Some(sink),
            }
        }
    }

    impl AmbientSound for RodioSound {
        fn play(&mut self) {
            if let Some(sink) = &self.sink {
                sink.play();
            }
        }

        fn pause(&mut self) {
            if let Some(sink) = &self.sink {
                sink.pause();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_sound_is_inert() {
        let mut sound = NullSound;
        sound.play();
        sound.pause();
        sound.play();
    }
}
