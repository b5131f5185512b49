#![allow(dead_code)]

/// An `MThd` chunk
pub fn header(format: u16, tracks: u16, division: u16) -> Vec<u8> {
    let mut out = b"MThd".to_vec();
    out.extend(6u32.to_be_bytes());
    out.extend(format.to_be_bytes());
    out.extend(tracks.to_be_bytes());
    out.extend(division.to_be_bytes());
    out
}

/// An `MTrk` chunk around `events`
pub fn track(events: &[u8]) -> Vec<u8> {
    let mut out = b"MTrk".to_vec();
    out.extend((events.len() as u32).to_be_bytes());
    out.extend_from_slice(events);
    out
}

/// A whole file: header followed by the given track event streams
pub fn smf(format: u16, division: u16, tracks: &[Vec<u8>]) -> Vec<u8> {
    let mut out = header(format, tracks.len() as u16, division);
    for events in tracks {
        out.extend(track(events));
    }
    out
}

/// Encode a variable-length quantity
pub fn vlq(mut value: u32) -> Vec<u8> {
    let mut out = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        out.push((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    out.reverse();
    out
}

/// Builds a track's event stream
#[derive(Default)]
pub struct Events(Vec<u8>);

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(mut self, delta: u32, bytes: &[u8]) -> Self {
        self.0.extend(vlq(delta));
        self.0.extend_from_slice(bytes);
        self
    }

    pub fn note_on(self, delta: u32, channel: u8, key: u8, velocity: u8) -> Self {
        self.raw(delta, &[0x90 | channel, key, velocity])
    }

    pub fn note_off(self, delta: u32, channel: u8, key: u8) -> Self {
        self.raw(delta, &[0x80 | channel, key, 0x40])
    }

    pub fn tempo(self, delta: u32, micros: u32) -> Self {
        let [_, a, b, c] = micros.to_be_bytes();
        self.raw(delta, &[0xFF, 0x51, 0x03, a, b, c])
    }

    pub fn time_signature(self, delta: u32, numerator: u8, exponent: u8) -> Self {
        self.raw(delta, &[0xFF, 0x58, 0x04, numerator, exponent, 24, 8])
    }

    pub fn meta(self, delta: u32, tag: u8, payload: &[u8]) -> Self {
        let mut bytes = vec![0xFF, tag];
        bytes.extend(vlq(payload.len() as u32));
        bytes.extend_from_slice(payload);
        self.raw(delta, &bytes)
    }

    pub fn end(self, delta: u32) -> Vec<u8> {
        self.raw(delta, &[0xFF, 0x2F, 0x00]).0
    }

    pub fn unterminated(self) -> Vec<u8> {
        self.0
    }
}
