use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::domain::error::DomainError;

/// Sample rate the recorder is asked for and whisper expects.
pub const SAMPLE_RATE: u32 = 16_000;

/// Size of the canonical WAV header emitted by the recorder before the
/// PCM payload. The recorder is invoked with fixed format arguments, so
/// the header size is a constant rather than something parsed per file.
pub const WAV_HEADER_LEN: usize = 44;

/// Recorder state machine.
///
/// State transitions:
/// - Idle -> Recording (start, only after the subprocess spawned)
/// - Recording -> Stopping (stop requested, awaiting process exit)
/// - Stopping -> Idle (process exited, buffer converted)
///
/// A failure during start leaves the state at Idle and propagates the
/// error; there is no retry. A failed start must be re-invoked by the
/// caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecorderState {
    /// Ready to record, no active session.
    Idle,
    /// Subprocess running, accumulating audio.
    Recording,
    /// Termination signalled, waiting for process exit.
    Stopping,
}

impl RecorderState {
    #[must_use]
    pub fn can_start(&self) -> bool {
        matches!(self, RecorderState::Idle)
    }

    #[must_use]
    pub fn can_stop(&self) -> bool {
        matches!(self, RecorderState::Recording)
    }
}

/// Normalized audio samples produced from one recording session.
///
/// Amplitudes are in [-1.0, 1.0), fixed 16 kHz mono. Produced once per
/// session by [`decode_wav_pcm16`] and immutable afterwards. Samples are
/// zeroed on drop; captured audio never outlives the pipeline run.
#[derive(Debug, Zeroize)]
#[zeroize(drop)]
pub struct SampleBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl SampleBuffer {
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration of the captured audio in seconds.
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    #[cfg(test)]
    pub fn from_samples(samples: Vec<f32>) -> Self {
        Self {
            samples,
            sample_rate: SAMPLE_RATE,
        }
    }
}

/// Convert the raw bytes of a WAV-framed PCM16 stream into normalized
/// f32 samples.
///
/// Skips the fixed 44-byte header, then reads the payload as
/// little-endian signed 16-bit integers, two bytes per sample, each
/// divided by 32768.0. An input of i16::MIN maps to exactly -1.0 and
/// i16::MAX to ~0.999969.
///
/// Fails with `NoAudioCaptured` when there is no payload at all and with
/// `CorruptedAudio` when the payload length is odd (a sample was cut in
/// half somewhere between the recorder and us).
pub fn decode_wav_pcm16(raw: &[u8]) -> Result<SampleBuffer, DomainError> {
    if raw.len() <= WAV_HEADER_LEN {
        return Err(DomainError::NoAudioCaptured);
    }

    let payload = &raw[WAV_HEADER_LEN..];
    if payload.len() % 2 != 0 {
        return Err(DomainError::CorruptedAudio);
    }

    let samples: Vec<f32> = payload
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0)
        .collect();

    Ok(SampleBuffer {
        samples,
        sample_rate: SAMPLE_RATE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes(payload: &[u8]) -> Vec<u8> {
        let mut raw = vec![0u8; WAV_HEADER_LEN];
        raw.extend_from_slice(payload);
        raw
    }

    #[test]
    fn test_recorder_state_transitions() {
        assert!(RecorderState::Idle.can_start());
        assert!(!RecorderState::Recording.can_start());
        assert!(!RecorderState::Stopping.can_start());

        assert!(!RecorderState::Idle.can_stop());
        assert!(RecorderState::Recording.can_stop());
        assert!(!RecorderState::Stopping.can_stop());
    }

    #[test]
    fn test_decode_produces_half_payload_samples() {
        let payload = vec![0u8; 320];
        let buffer = decode_wav_pcm16(&wav_bytes(&payload)).unwrap();
        assert_eq!(buffer.len(), 160);
        assert_eq!(buffer.sample_rate(), SAMPLE_RATE);
    }

    #[test]
    fn test_decode_normalization_extremes() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&i16::MIN.to_le_bytes());
        payload.extend_from_slice(&i16::MAX.to_le_bytes());
        payload.extend_from_slice(&0i16.to_le_bytes());

        let buffer = decode_wav_pcm16(&wav_bytes(&payload)).unwrap();
        let samples = buffer.samples();
        assert_eq!(samples[0], -1.0);
        assert!((samples[1] - 0.999_969).abs() < 1e-5);
        assert_eq!(samples[2], 0.0);
    }

    #[test]
    fn test_decode_all_samples_in_range() {
        let payload: Vec<u8> = (0..1000i16)
            .flat_map(|n| (n.wrapping_mul(113)).to_le_bytes())
            .collect();
        let buffer = decode_wav_pcm16(&wav_bytes(&payload)).unwrap();
        assert!(buffer
            .samples()
            .iter()
            .all(|&s| (-1.0..1.0).contains(&s)));
    }

    #[test]
    fn test_decode_header_only_is_no_audio() {
        let raw = vec![0u8; WAV_HEADER_LEN];
        assert!(matches!(
            decode_wav_pcm16(&raw),
            Err(DomainError::NoAudioCaptured)
        ));
    }

    #[test]
    fn test_decode_short_buffer_is_no_audio() {
        let raw = vec![0u8; 10];
        assert!(matches!(
            decode_wav_pcm16(&raw),
            Err(DomainError::NoAudioCaptured)
        ));
        assert!(matches!(
            decode_wav_pcm16(&[]),
            Err(DomainError::NoAudioCaptured)
        ));
    }

    #[test]
    fn test_decode_odd_payload_is_corrupted() {
        let raw = wav_bytes(&[1, 2, 3]);
        assert!(matches!(
            decode_wav_pcm16(&raw),
            Err(DomainError::CorruptedAudio)
        ));
    }

    #[test]
    fn test_decode_does_not_mutate_input() {
        let raw = wav_bytes(&[7, 8, 9, 10]);
        let copy = raw.clone();
        let _ = decode_wav_pcm16(&raw).unwrap();
        assert_eq!(raw, copy);
    }

    #[test]
    fn test_sample_buffer_duration() {
        let buffer = SampleBuffer::from_samples(vec![0.0; 16_000]);
        assert!((buffer.duration_secs() - 1.0).abs() < 0.001);
    }
}
