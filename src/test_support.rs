//! Synthesized MP3 fixtures for tests.
//!
//! Files are built from raw bytes: a run of silent MPEG-1 Layer III frames,
//! optionally preceded by a hand-built ID3v2.3 tag and/or followed by an
//! ID3v1 tag.

use std::fs;
use std::path::{Path, PathBuf};

/// Not a real PNG, but tag parsers never look inside picture payloads.
pub const COVER_PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-cover-bytes";

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, joint stereo, no padding.
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
const FRAME_LEN: usize = 417;

fn mpeg_frames(count: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(count * FRAME_LEN);
    for _ in 0..count {
        out.extend_from_slice(&FRAME_HEADER);
        out.resize(out.len() + FRAME_LEN - FRAME_HEADER.len(), 0);
    }
    out
}

fn syncsafe(n: usize) -> [u8; 4] {
    [
        ((n >> 21) & 0x7f) as u8,
        ((n >> 14) & 0x7f) as u8,
        ((n >> 7) & 0x7f) as u8,
        (n & 0x7f) as u8,
    ]
}

fn v23_frame(id: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(10 + payload.len());
    out.extend_from_slice(id);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(&[0, 0]);
    out.extend_from_slice(payload);
    out
}

fn text_frame(id: &[u8; 4], text: &str) -> Vec<u8> {
    let mut payload = vec![0x00];
    payload.extend_from_slice(text.as_bytes());
    v23_frame(id, &payload)
}

fn apic_frame(mime: &str, data: &[u8]) -> Vec<u8> {
    let mut payload = vec![0x00];
    payload.extend_from_slice(mime.as_bytes());
    payload.push(0);
    payload.push(0x03); // front cover
    payload.push(0); // empty description
    payload.extend_from_slice(data);
    v23_frame(b"APIC", &payload)
}

fn id3v2(title: Option<&str>, artist: Option<&str>, cover: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut frames = Vec::new();
    if let Some(t) = title {
        frames.extend(text_frame(b"TIT2", t));
    }
    if let Some(a) = artist {
        frames.extend(text_frame(b"TPE1", a));
    }
    if let Some((mime, data)) = cover {
        frames.extend(apic_frame(mime, data));
    }

    let mut out = Vec::with_capacity(10 + frames.len());
    out.extend_from_slice(b"ID3");
    out.extend_from_slice(&[3, 0, 0]);
    out.extend_from_slice(&syncsafe(frames.len()));
    out.extend(frames);
    out
}

fn id3v1(title: &str, artist: &str) -> Vec<u8> {
    fn field(s: &str, len: usize) -> Vec<u8> {
        let mut v: Vec<u8> = s.bytes().take(len).collect();
        v.resize(len, 0);
        v
    }

    let mut out = Vec::with_capacity(128);
    out.extend_from_slice(b"TAG");
    out.extend(field(title, 30));
    out.extend(field(artist, 30));
    out.extend(field("", 30)); // album
    out.extend(field("", 4)); // year
    out.extend(field("", 30)); // comment
    out.push(255); // genre: none
    out
}

/// An MP3 carrying an ID3v2 tag with the given fields.
pub fn tagged_mp3(title: Option<&str>, artist: Option<&str>, cover: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut out = id3v2(title, artist, cover);
    out.extend(mpeg_frames(20));
    out
}

/// An MP3 carrying only a legacy ID3v1 tag.
pub fn legacy_mp3(title: &str, artist: &str) -> Vec<u8> {
    let mut out = mpeg_frames(20);
    out.extend(id3v1(title, artist));
    out
}

/// Valid MPEG audio without any tag container.
pub fn untagged_mp3() -> Vec<u8> {
    mpeg_frames(20)
}

pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, bytes).unwrap();
    path
}
