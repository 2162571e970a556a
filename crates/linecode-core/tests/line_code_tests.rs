//! Line Coding Tests
//!
//! Tests for the line encoders and decoders through the public API.

use linecode_core::encoder::{bit_levels, BitLevels};
use linecode_core::{
    decode, encode, BitString, CodecError, DecoderMode, LineCode, LineDecoder, LineEncoder,
    SamplingConfig,
};

const SAMPLES_PER_BIT: usize = 100;

fn bits(s: &str) -> BitString {
    s.parse().unwrap()
}

/// Encoder with a small grid to keep per-sample assertions readable
fn small_encoder() -> LineEncoder {
    LineEncoder::new(SamplingConfig::new(4).unwrap()).unwrap()
}

// ============================================================================
// Waveform Shape Tests
// ============================================================================

#[test]
fn test_waveform_lengths() {
    let input = bits("1100100100110");
    for code in LineCode::ALL {
        let waveform = encode(&input, code).unwrap();
        assert_eq!(waveform.time().len(), input.len() * SAMPLES_PER_BIT);
        assert_eq!(waveform.voltage().len(), input.len() * SAMPLES_PER_BIT);
        assert_eq!(waveform.bit_count(), input.len());
    }
}

#[test]
fn test_time_axis_strictly_increasing() {
    let waveform = encode(&bits("0110"), LineCode::Manchester).unwrap();
    assert!(waveform.time().windows(2).all(|w| w[0] < w[1]));
    assert_eq!(waveform.time()[0], 0.0);
    assert!(waveform.time().last().copied().unwrap() < 4.0);
}

#[test]
fn test_bit_windows_start_on_bit_boundaries() {
    let waveform = encode(&bits("101"), LineCode::NrzL).unwrap();
    for i in 0..3 {
        assert!((waveform.time()[i * SAMPLES_PER_BIT] - i as f64).abs() < 1e-4);
    }
}

#[test]
fn test_time_axis_increasing_for_long_inputs() {
    // 140k bits at 100 samples per bit runs well past 2^24 samples.
    let input = BitString::from(vec![true; 140_000]);
    let waveform = encode(&input, LineCode::NrzL).unwrap();
    let time = waveform.time();
    assert_eq!(time.len(), 14_000_000);
    assert!(time.windows(2).all(|w| w[0] < w[1]));
    assert!((time[time.len() - 1] - 139_999.99).abs() < 1e-6);
}

#[test]
fn test_levels_within_scheme_alphabet() {
    let input = bits("1011000101");
    for code in LineCode::ALL {
        let waveform = encode(&input, code).unwrap();
        let allowed: &[f32] = if code == LineCode::Ami {
            &[-1.0, 0.0, 1.0]
        } else {
            &[-1.0, 1.0]
        };
        assert!(
            waveform.voltage().iter().all(|v| allowed.contains(v)),
            "{code} produced an unexpected level"
        );
    }
}

#[test]
fn test_nrz_l_levels() {
    let waveform = small_encoder().encode(&bits("10"), LineCode::NrzL).unwrap();
    assert_eq!(waveform.voltage(), &[1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0]);
}

#[test]
fn test_nrz_i_starts_from_low() {
    let levels = bit_levels(&bits("1101"), LineCode::NrzI);
    assert_eq!(
        levels,
        vec![
            BitLevels::Full(1.0),
            BitLevels::Full(-1.0),
            BitLevels::Full(-1.0),
            BitLevels::Full(1.0),
        ]
    );
}

#[test]
fn test_manchester_mid_bit_transition() {
    let waveform = small_encoder()
        .encode(&bits("10"), LineCode::Manchester)
        .unwrap();
    assert_eq!(waveform.voltage(), &[-1.0, -1.0, 1.0, 1.0, 1.0, 1.0, -1.0, -1.0]);
}

#[test]
fn test_differential_manchester_levels() {
    let levels = bit_levels(&bits("100"), LineCode::DifferentialManchester);
    assert_eq!(
        levels,
        vec![
            BitLevels::Split(1.0, -1.0),
            BitLevels::Split(1.0, -1.0),
            BitLevels::Split(1.0, -1.0),
        ]
    );
    let levels = bit_levels(&bits("11"), LineCode::DifferentialManchester);
    assert_eq!(
        levels,
        vec![BitLevels::Split(1.0, -1.0), BitLevels::Split(-1.0, 1.0)]
    );
}

#[test]
fn test_ami_alternates_marks() {
    let levels: Vec<f32> = bit_levels(&bits("1011001"), LineCode::Ami)
        .into_iter()
        .map(BitLevels::start)
        .collect();
    assert_eq!(levels, vec![1.0, 0.0, -1.0, 1.0, 0.0, 0.0, -1.0]);
}

#[test]
fn test_encoders_do_not_share_state_between_calls() {
    let encoder = LineEncoder::default();
    let input = bits("10110");
    for code in LineCode::ALL {
        let first = encoder.encode(&input, code).unwrap();
        let second = encoder.encode(&input, code).unwrap();
        assert_eq!(first, second);
    }
}

// ============================================================================
// Encoder Error Tests
// ============================================================================

#[test]
fn test_empty_bits_rejected() {
    for code in LineCode::ALL {
        assert_eq!(
            encode(&BitString::default(), code),
            Err(CodecError::EmptyBitString)
        );
    }
}

#[test]
fn test_invalid_symbol_reports_index() {
    assert_eq!(
        "0120".parse::<BitString>(),
        Err(CodecError::InvalidSymbol {
            index: 2,
            symbol: '2'
        })
    );
}

#[test]
fn test_odd_grid_rejected_for_split_phase() {
    let encoder = LineEncoder::new(SamplingConfig::new(7).unwrap()).unwrap();
    assert!(encoder.encode(&bits("10"), LineCode::NrzL).is_ok());
    let err = encoder.encode(&bits("10"), LineCode::Manchester).unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(
        err,
        CodecError::OddSamplesPerBit {
            samples_per_bit: 7,
            line_code: LineCode::Manchester
        }
    );
}

#[test]
fn test_oversized_grid_rejected() {
    let huge = LineEncoder::new(SamplingConfig::new(usize::MAX).unwrap()).unwrap();
    assert_eq!(
        huge.encode(&bits("1"), LineCode::NrzL),
        Err(CodecError::InvalidSamplesPerBit)
    );

    // 2 * (usize::MAX / 2 + 1) overflows the sample count.
    let half = LineEncoder::new(SamplingConfig::new(usize::MAX / 2 + 1).unwrap()).unwrap();
    let err = half.encode(&bits("10"), LineCode::NrzL).unwrap_err();
    assert_eq!(err, CodecError::InvalidSamplesPerBit);
    assert!(err.is_configuration());
}

#[test]
fn test_zero_samples_per_bit_rejected() {
    assert!(SamplingConfig::new(0).unwrap_err().is_configuration());
    assert!(decode(&[1.0], LineCode::NrzL, 0).is_err());
}

// ============================================================================
// Round Trip Tests
// ============================================================================

#[test]
fn test_memoryless_round_trip_nrz_l_manchester_ami() {
    let input = bits("1100100100110");
    for code in [LineCode::NrzL, LineCode::Manchester, LineCode::Ami] {
        let waveform = encode(&input, code).unwrap();
        assert_eq!(
            decode(waveform.voltage(), code, SAMPLES_PER_BIT).unwrap(),
            input,
            "{code}"
        );
    }
}

#[test]
fn test_memoryless_nrz_i_after_first_bit() {
    let input = bits("1100100100110");
    let waveform = encode(&input, LineCode::NrzI).unwrap();
    let decoded = decode(waveform.voltage(), LineCode::NrzI, SAMPLES_PER_BIT).unwrap();
    assert_eq!(decoded.get(0), Some(false));
    assert_eq!(&decoded.as_slice()[1..], &input.as_slice()[1..]);
}

#[test]
fn test_line_state_round_trip_all_codes() {
    let decoder = LineDecoder::default().with_mode(DecoderMode::LineState);
    for text in ["0", "1", "10", "0000", "1111", "1100100100110", "0101011100"] {
        let input = bits(text);
        for code in LineCode::ALL {
            let waveform = encode(&input, code).unwrap();
            assert_eq!(
                decoder.decode_waveform(&waveform, code).unwrap(),
                input,
                "{code} on {text}"
            );
        }
    }
}

#[test]
fn test_custom_bit_duration_round_trip() {
    let config = SamplingConfig::new(20)
        .unwrap()
        .with_bit_duration(0.5)
        .unwrap();
    let encoder = LineEncoder::new(config).unwrap();
    let decoder = LineDecoder::new(config).unwrap();
    let input = bits("011010");
    let waveform = encoder.encode(&input, LineCode::Manchester).unwrap();
    assert!((waveform.time()[20] - 0.5).abs() < 1e-6);
    assert_eq!(
        decoder.decode_waveform(&waveform, LineCode::Manchester).unwrap(),
        input
    );
}

// ============================================================================
// Decoder Tolerance Tests
// ============================================================================

#[test]
fn test_truncated_waveform_drops_short_tail() {
    let input = bits("1011");
    let waveform = encode(&input, LineCode::NrzL).unwrap();
    let voltage = &waveform.voltage()[..3 * SAMPLES_PER_BIT + 10];
    assert_eq!(
        decode(voltage, LineCode::NrzL, SAMPLES_PER_BIT).unwrap(),
        bits("101")
    );
}

#[test]
fn test_truncated_waveform_keeps_half_tail() {
    let input = bits("1011");
    let waveform = encode(&input, LineCode::NrzL).unwrap();
    let voltage = &waveform.voltage()[..3 * SAMPLES_PER_BIT + 60];
    assert_eq!(
        decode(voltage, LineCode::NrzL, SAMPLES_PER_BIT).unwrap(),
        input
    );
}

#[test]
fn test_decoder_with_mismatched_grid() {
    // Encoded at 100 samples per bit, decoded at 50: every bit is read twice.
    let waveform = encode(&bits("10"), LineCode::NrzL).unwrap();
    assert_eq!(
        decode(waveform.voltage(), LineCode::NrzL, 50).unwrap(),
        bits("1100")
    );
}
