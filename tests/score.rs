mod common;

use common::{Events, header, smf, track};
use midi_score::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn header_scenario() {
    let bytes = [
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x02, 0x01, 0xE0,
    ];
    assert_eq!(Header::decode(&bytes).unwrap(), Header::new(1, 2, 480));
}

#[test]
fn merges_tracks_in_file_order() {
    let conductor = Events::new()
        .tempo(0, 500_000)
        .time_signature(0, 4, 2)
        .tempo(1920, 600_000)
        .end(0);
    let melody = Events::new()
        .note_on(0, 0, 60, 100)
        .note_off(480, 0, 60)
        .note_on(0, 1, 64, 90)
        .note_off(480, 1, 64)
        .end(0);
    let bass = Events::new()
        .tempo(0, 400_000)
        .note_on(240, 0, 36, 80)
        .note_off(240, 0, 36)
        .end(0);
    let bytes = smf(1, 480, &[conductor, melody, bass]);

    let score = Score::decode(&bytes).unwrap();

    assert_eq!(score.header(), &Header::new(1, 3, 480));
    let tempos: Vec<(u32, u32)> = score
        .tempos()
        .iter()
        .map(|t| (t.timing, t.micros_per_quarter_note))
        .collect();
    assert_eq!(tempos, vec![(0, 500_000), (1920, 600_000), (0, 400_000)]);
    assert_eq!(
        score.time_signatures(),
        &[TimeSignature {
            numerator: 4,
            denominator: 4,
            timing: 0,
        }]
    );

    let channel_zero = score.channel(0).unwrap();
    assert_eq!(channel_zero.len(), 2);
    assert_eq!(channel_zero[0].pitch(), Pitch::new(60));
    assert_eq!(channel_zero[1].pitch(), Pitch::new(36));
    assert_eq!(channel_zero[1].timing, 240);

    let channel_one = score.channel(1).unwrap();
    assert_eq!(channel_one.len(), 1);
    assert_eq!(channel_one[0].timing, 480);
    assert_eq!(channel_one[0].octave, Octave::new(4));
    assert_eq!(channel_one[0].pitch_class, PitchClass::E);

    assert!(score.channel(16).is_none());
    assert_eq!(score.note_count(), 3);
    assert_eq!(score.iter_notes().count(), 3);
}

#[test]
fn free_function_matches_score_decode() {
    let bytes = smf(0, 96, &[Events::new().note_on(0, 0, 60, 1).note_off(1, 0, 60).end(0)]);
    assert_eq!(decode(&bytes).unwrap(), Score::decode(&bytes).unwrap());
}

#[test]
fn missing_header_chunk() {
    let bytes = track(&Events::new().end(0));
    let err = Score::decode(&bytes).unwrap_err();

    assert!(err.is_missing_header_chunk());
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::MissingHeader))
    );
}

#[test]
fn missing_track_chunk() {
    let mut bytes = header(1, 3, 480);
    bytes.extend(track(&Events::new().end(0)));
    bytes.extend(track(&Events::new().end(0)));

    let err = Score::decode(&bytes).unwrap_err();
    assert!(err.is_missing_track_chunk());
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::MissingTrack {
            expected: 3,
            found: 2,
        }))
    );
}

#[test]
fn extra_track_chunks_are_decoded() {
    let mut bytes = header(0, 1, 96);
    bytes.extend(track(&Events::new().note_on(0, 0, 60, 1).note_off(1, 0, 60).end(0)));
    bytes.extend(track(&Events::new().note_on(0, 2, 60, 1).note_off(1, 2, 60).end(0)));

    let score = Score::decode(&bytes).unwrap();
    assert_eq!(score.note_count(), 2);
}

#[test]
fn overrunning_track_chunk() {
    let mut bytes = header(0, 1, 96);
    let mut chunk = track(&Events::new().end(0));
    chunk[7] += 1;
    bytes.extend(chunk);

    let err = Score::decode(&bytes).unwrap_err();
    assert!(err.is_missing_track_chunk());
    assert_eq!(err.position(), 14);
}

#[test]
fn first_failing_track_is_reported() {
    let good = Events::new().end(0);
    let truncated = Events::new().note_on(0, 0, 60, 100).unterminated();
    let broken = Events::new().raw(0, &[0x90, 0x3C]).unterminated();
    let bytes = smf(1, 96, &[good.clone(), truncated.clone(), broken]);

    let err = Score::decode(&bytes).unwrap_err();
    assert!(err.is_truncated_track());
    // positions are absolute in the file
    let second_track = 14 + 8 + good.len();
    assert_eq!(err.position(), second_track + 8 + truncated.len());
}

#[test]
fn out_of_bounds_inside_track() {
    let broken = Events::new().raw(0, &[0xFF, 0x51, 0x03, 0x07]).unterminated();
    let bytes = smf(0, 96, &[broken]);

    let err = Score::decode(&bytes).unwrap_err();
    assert!(err.is_out_of_bounds());
    assert!(!err.is_truncated_track());
    assert_eq!(err.position(), 14 + 8 + 4);
}

#[test]
fn bpm_lookup_defaults_to_120() {
    let conductor = Events::new().tempo(960, 1_000_000).end(0);
    let bytes = smf(0, 480, &[conductor]);
    let score = Score::decode(&bytes).unwrap();

    assert_eq!(score.bpm_at(0), 120.);
    assert_eq!(score.bpm_at(959), 120.);
    assert_eq!(score.bpm_at(960), 60.);
    assert_eq!(score.bpm_at(u32::MAX), 60.);
}

#[test]
fn timed_notes_follow_tempo_changes() {
    let events = Events::new()
        .tempo(0, 500_000)
        .note_on(0, 0, 69, 127)
        .note_off(480, 0, 69)
        .tempo(0, 1_000_000)
        .note_on(0, 1, 81, 0x40)
        .note_off(480, 1, 81)
        .end(0);
    let bytes = smf(0, 480, &[events]);
    let score = Score::decode(&bytes).unwrap();

    let timed: Vec<TimedNote<'_>> = score.timed_notes().collect();
    assert_eq!(timed.len(), 2);
    assert_eq!(score.timed_notes().len(), 2);

    assert_eq!(timed[0].start, UMicros::ZERO);
    assert_eq!(timed[0].end, UMicros::new(500_000));
    assert_eq!(timed[0].note.frequency(), 440.);
    assert_eq!(timed[0].gain(), 1.);

    assert_eq!(timed[1].start, UMicros::new(500_000));
    assert_eq!(timed[1].end, UMicros::new(1_500_000));
    assert_eq!(timed[1].duration(), UMicros::from_ms(1_000));
    assert_eq!(timed[1].note.frequency(), 880.);
}

#[test]
fn score_starts_empty_and_merges() {
    let mut score = Score::new(Header::new(0, 1, 96));
    assert_eq!(score.note_count(), 0);
    assert!(score.tempos().is_empty());

    let chunk = track(&Events::new().tempo(0, 500_000).note_on(0, 4, 60, 1).note_off(2, 4, 60).end(0));
    score.merge(TrackDecoder::new(&chunk).decode().unwrap());
    score.merge(TrackDecoder::new(&chunk).decode().unwrap());

    assert_eq!(score.tempos().len(), 2);
    assert_eq!(score.channel(4).unwrap().len(), 2);
    assert_eq!(score.notes().iter().filter(|c| !c.is_empty()).count(), 1);
}

#[test]
fn header_fields_at_fixed_offsets() {
    for (format, tracks, division) in [(0, 1, 96), (1, 17, 480), (2, 0xFFFF, 0x7FFF)] {
        let bytes = header(format, tracks, division);
        let decoded = Header::decode(&bytes).unwrap();
        assert_eq!(decoded.format(), u16::from_be_bytes([bytes[8], bytes[9]]));
        assert_eq!(decoded.track_count(), u16::from_be_bytes([bytes[10], bytes[11]]));
        assert_eq!(decoded.division(), u16::from_be_bytes([bytes[12], bytes[13]]));
        assert_eq!(decoded, Header::new(format, tracks, division));
    }
}

#[test]
fn large_files_decode_like_their_tracks() {
    let tracks: Vec<Vec<u8>> = (0..8u8)
        .map(|channel| {
            let mut events = Events::new().tempo(0, 400_000 + channel as u32);
            for i in 0..600u32 {
                let key = 36 + (i % 48) as u8;
                events = events.note_on(1, channel, key, 100).note_off(3, channel, key);
            }
            events.end(0)
        })
        .collect();
    let bytes = smf(1, 480, &tracks);
    assert!(bytes.len() > 32 * 1024);

    let score = Score::decode(&bytes).unwrap();

    let mut expected = Score::new(Header::new(1, 8, 480));
    for events in &tracks {
        expected.merge(TrackDecoder::new(&track(events)).decode().unwrap());
    }
    assert_eq!(score, expected);
    assert_eq!(score.note_count(), 8 * 600);
    assert_eq!(score.tempos()[7].micros_per_quarter_note, 400_007);
}
