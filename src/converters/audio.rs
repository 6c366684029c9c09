//! # 音频转换
//!
//! 先解码为 PCM，再按目标扩展名编码：
//! - `.wav`: `symphonia` 解码 + `hound` 写 16 位 PCM
//! - 其他容器: 交给 `ffmpeg -f <ext>`，目标扩展名即格式标识
//!
//! ## 依赖关系
//! - 被 `converters/mod.rs` 调用
//! - 使用 `converters/tools.rs` 调用 ffmpeg

use super::tools::{run_tool, ToolConfig};
use crate::error::{FileconvError, Result};
use crate::formats::extension_of;

use hound::{SampleFormat, WavSpec, WavWriter};
use std::ffi::OsStr;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

const FFMPEG_HINT: &str = "Please install FFmpeg and make sure it is on PATH.";

/// 解码后的交错 PCM
#[derive(Debug, Clone, PartialEq)]
pub struct PcmAudio {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<i16>,
}

/// 音频重新编码
pub fn convert_audio(input_path: &Path, output_path: &Path, tools: &ToolConfig) -> Result<()> {
    let output_ext = extension_of(output_path);

    if output_ext == ".wav" {
        let pcm = decode_to_pcm(input_path)?;
        write_wav(&pcm, output_path)
    } else {
        encode_with_ffmpeg(input_path, output_path, &output_ext, tools)
    }
}

/// 用 symphonia 把任意支持的容器解码为 16 位交错 PCM
pub fn decode_to_pcm(input_path: &Path) -> Result<PcmAudio> {
    let file = File::open(input_path).map_err(|e| FileconvError::FileReadError {
        path: input_path.display().to_string(),
        source: e,
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = input_path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| FileconvError::Other("no audio track found".to_string()))?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(44_100);
    let mut channels = track
        .codec_params
        .channels
        .map(|c| c.count() as u16)
        .unwrap_or(2);

    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut samples: Vec<i16> = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            // 单个损坏帧跳过
            Err(SymphoniaError::DecodeError(msg)) => {
                log::debug!("Skipping undecodable packet: {}", msg);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        sample_rate = spec.rate;
        channels = spec.channels.count() as u16;

        let mut buf = SampleBuffer::<i16>::new(decoded.capacity() as u64, spec);
        buf.copy_interleaved_ref(decoded);
        samples.extend_from_slice(buf.samples());
    }

    Ok(PcmAudio {
        sample_rate,
        channels,
        samples,
    })
}

/// 写 16 位 PCM WAV
pub fn write_wav(pcm: &PcmAudio, output_path: &Path) -> Result<()> {
    let spec = WavSpec {
        channels: pcm.channels,
        sample_rate: pcm.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(output_path, spec)?;
    for &sample in &pcm.samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

fn encode_with_ffmpeg(
    input_path: &Path,
    output_path: &Path,
    output_ext: &str,
    tools: &ToolConfig,
) -> Result<()> {
    let format_id = output_ext.trim_start_matches('.');
    run_tool(
        tools.ffmpeg.as_os_str(),
        [
            OsStr::new("-y"),
            OsStr::new("-i"),
            input_path.as_os_str(),
            OsStr::new("-vn"),
            OsStr::new("-f"),
            OsStr::new(format_id),
            output_path.as_os_str(),
        ],
        FFMPEG_HINT,
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;

    /// MPEG-1 Layer III, 128 kbps, 44.1 kHz, 单声道，无 CRC
    const MP3_FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0xC4];
    /// 144 * 128000 / 44100，无填充位
    const MP3_FRAME_LEN: usize = 417;
    const MP3_SAMPLES_PER_FRAME: usize = 1152;

    /// 生成若干静音 MP3 帧：边信息与主数据全零，解码为全零样本
    pub(crate) fn write_silent_mp3(path: &Path, frames: usize) {
        let mut data = Vec::with_capacity(frames * MP3_FRAME_LEN);
        for _ in 0..frames {
            data.extend_from_slice(&MP3_FRAME_HEADER);
            data.resize(data.len() + MP3_FRAME_LEN - MP3_FRAME_HEADER.len(), 0);
        }
        std::fs::write(path, data).unwrap();
    }

    fn write_tone(path: &Path, channels: u16, frames: usize) {
        let spec = WavSpec {
            channels,
            sample_rate: 8_000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for i in 0..frames {
            for c in 0..channels {
                writer.write_sample(((i as i16) * 7 + c as i16) % 1000).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_decode_wav_to_pcm() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tone.wav");
        write_tone(&input, 2, 400);

        let pcm = decode_to_pcm(&input).unwrap();
        assert_eq!(pcm.sample_rate, 8_000);
        assert_eq!(pcm.channels, 2);
        assert_eq!(pcm.samples.len(), 800);
        assert_eq!(pcm.samples[0], 0);
        assert_eq!(pcm.samples[1], 1);
    }

    #[test]
    fn test_decode_mp3_to_pcm() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("silence.mp3");
        write_silent_mp3(&input, 12);

        let pcm = decode_to_pcm(&input).unwrap();
        assert_eq!(pcm.sample_rate, 44_100);
        assert_eq!(pcm.channels, 1);
        assert!(!pcm.samples.is_empty());
        assert_eq!(pcm.samples.len() % MP3_SAMPLES_PER_FRAME, 0);
        assert!(pcm.samples.iter().all(|&s| s == 0));
    }

    #[test]
    fn test_mp3_to_wav() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("song.mp3");
        let output = dir.path().join("song.wav");
        write_silent_mp3(&input, 8);

        convert_audio(&input, &output, &ToolConfig::default()).unwrap();

        let reader = hound::WavReader::open(&output).unwrap();
        assert_eq!(reader.spec().sample_rate, 44_100);
        assert_eq!(reader.spec().bits_per_sample, 16);
        assert!(reader.len() > 0);
    }

    #[test]
    fn test_wav_to_wav_reencode() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.wav");
        let output = dir.path().join("out.wav");
        write_tone(&input, 1, 256);

        convert_audio(&input, &output, &ToolConfig::default()).unwrap();

        let reader = hound::WavReader::open(&output).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.spec().sample_rate, 8_000);
        assert_eq!(reader.len(), 256);
    }

    #[test]
    fn test_non_wav_target_without_ffmpeg_reports_missing_tool() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.wav");
        write_tone(&input, 1, 16);

        let tools = ToolConfig {
            ffmpeg: PathBuf::from("fileconv-missing-ffmpeg"),
            ..ToolConfig::default()
        };
        let err = convert_audio(&input, &dir.path().join("out.ogg"), &tools).unwrap_err();
        assert!(matches!(err, FileconvError::CommandNotFound { .. }));
    }

    #[test]
    fn test_garbage_input_fails_to_probe() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("noise.mp3");
        std::fs::write(&input, [0u8; 64]).unwrap();

        assert!(decode_to_pcm(&input).is_err());
    }
}
