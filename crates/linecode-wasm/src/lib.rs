//! WASM bindings for the line code toolkit.
//!
//! Scheme names cross the boundary as strings and are parsed once here;
//! bit strings cross as text made of `0` and `1`. Every core error is
//! surfaced as a `JsError` carrying its display text.

use linecode_core::{
    BitString, CodecError, DecoderMode, LineCode, LineDecoder, LineEncoder, SamplingConfig,
    Scrambling, Waveform,
};
use wasm_bindgen::prelude::*;

fn js_error(err: CodecError) -> JsError {
    JsError::new(&err.to_string())
}

/// Encoder/decoder pair sharing one sampling grid, holding the most
/// recently encoded waveform.
#[wasm_bindgen]
pub struct CodecSession {
    encoder: LineEncoder,
    decoder: LineDecoder,
    waveform: Option<(Waveform, LineCode)>,
}

#[wasm_bindgen]
impl CodecSession {
    /// Create a session sampling each bit `samples_per_bit` times.
    #[wasm_bindgen(constructor)]
    pub fn new(samples_per_bit: usize) -> Result<CodecSession, JsError> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let config = SamplingConfig::new(samples_per_bit).map_err(js_error)?;
        Ok(Self {
            encoder: LineEncoder::new(config).map_err(js_error)?,
            decoder: LineDecoder::new(config).map_err(js_error)?,
            waveform: None,
        })
    }

    /// Samples per bit interval.
    #[wasm_bindgen(getter)]
    pub fn samples_per_bit(&self) -> usize {
        self.encoder.config().samples_per_bit
    }

    /// Track the line level across bits while decoding, so NRZ-I and
    /// Differential Manchester decode exactly.
    #[wasm_bindgen]
    pub fn set_line_state(&mut self, enabled: bool) {
        let mode = if enabled {
            DecoderMode::LineState
        } else {
            DecoderMode::Memoryless
        };
        self.decoder = self.decoder.clone().with_mode(mode);
    }

    /// Encode `bits` and keep the waveform for `time`, `voltage` and `decode`.
    #[wasm_bindgen]
    pub fn encode(&mut self, bits: &str, scheme: &str) -> Result<(), JsError> {
        let bits: BitString = bits.parse().map_err(js_error)?;
        let line_code: LineCode = scheme.parse().map_err(js_error)?;
        let waveform = self.encoder.encode(&bits, line_code).map_err(js_error)?;
        self.waveform = Some((waveform, line_code));
        Ok(())
    }

    /// Time axis of the last waveform (empty before the first encode).
    #[wasm_bindgen]
    pub fn time(&self) -> Vec<f64> {
        self.waveform
            .as_ref()
            .map(|(w, _)| w.time().to_vec())
            .unwrap_or_default()
    }

    /// Voltage samples of the last waveform (empty before the first encode).
    #[wasm_bindgen]
    pub fn voltage(&self) -> Vec<f32> {
        self.waveform
            .as_ref()
            .map(|(w, _)| w.voltage().to_vec())
            .unwrap_or_default()
    }

    /// Decode the last waveform with the scheme it was encoded with.
    #[wasm_bindgen]
    pub fn decode(&self) -> Result<String, JsError> {
        match &self.waveform {
            Some((waveform, line_code)) => self
                .decoder
                .decode_waveform(waveform, *line_code)
                .map(|bits| bits.to_string())
                .map_err(js_error),
            None => Ok(String::new()),
        }
    }

    /// Decode arbitrary voltage samples.
    #[wasm_bindgen]
    pub fn decode_voltage(&self, voltage: &[f32], scheme: &str) -> Result<String, JsError> {
        let line_code: LineCode = scheme.parse().map_err(js_error)?;
        self.decoder
            .decode(voltage, line_code)
            .map(|bits| bits.to_string())
            .map_err(js_error)
    }

    /// Scramble `bits` with `b8zs` or `hdb3`; the result uses `0`, `1`, `B`, `V`.
    #[wasm_bindgen]
    pub fn scramble(&self, bits: &str, scheme: &str) -> Result<String, JsError> {
        let bits: BitString = bits.parse().map_err(js_error)?;
        let scheme: Scrambling = scheme.parse().map_err(js_error)?;
        Ok(linecode_core::scramble(&bits, scheme).to_string())
    }

    /// PCM encode analog samples.
    #[wasm_bindgen]
    pub fn pcm_encode(&self, samples: &[f32], bit_depth: u8) -> Result<String, JsError> {
        linecode_core::pcm_encode(samples, bit_depth)
            .map(|bits| bits.to_string())
            .map_err(js_error)
    }

    /// Delta modulate analog samples.
    #[wasm_bindgen]
    pub fn delta_modulate(&self, samples: &[f32], step: f32) -> Result<String, JsError> {
        linecode_core::delta_modulate(samples, step)
            .map(|bits| bits.to_string())
            .map_err(js_error)
    }

    /// Longest palindromic substring of `text`.
    #[wasm_bindgen]
    pub fn longest_palindrome(&self, text: &str) -> PalindromeResult {
        let found = linecode_core::find_longest_palindrome(text);
        PalindromeResult {
            text: found.text,
            start: found.start,
            length: found.length,
        }
    }
}

/// Longest palindrome found by [`CodecSession::longest_palindrome`].
#[wasm_bindgen]
pub struct PalindromeResult {
    text: String,
    start: usize,
    length: usize,
}

#[wasm_bindgen]
impl PalindromeResult {
    /// The palindromic substring.
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }

    /// Offset of the first character.
    #[wasm_bindgen(getter)]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Length in characters.
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.length
    }
}

/// Create a new codec session (factory function).
#[wasm_bindgen]
pub fn create_session(samples_per_bit: usize) -> Result<CodecSession, JsError> {
    CodecSession::new(samples_per_bit)
}
