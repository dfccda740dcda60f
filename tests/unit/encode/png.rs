use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_png").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn encode_png_round_trips_through_image() {
    let buf = PixelBuffer::from_raw(2, 1, 4, vec![1, 2, 3, 255, 4, 5, 6, 0]).unwrap();
    let png = encode_png(&buf).unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.into_raw(), buf.as_bytes());
}

#[test]
fn frame_file_names_are_zero_padded() {
    assert_eq!(frame_file_name(FrameIndex(7)), "frame_00007.png");
}

#[test]
fn sequence_sink_clears_stale_frames_but_keeps_other_files() {
    let dir = scratch_dir("clears_stale");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("frame_00099.png"), b"stale").unwrap();
    std::fs::write(dir.join("notes.txt"), b"keep").unwrap();

    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(SinkConfig {
        width: 1,
        height: 1,
        channels: 3,
        frame_count: 1,
    })
    .unwrap();
    sink.accept(Frame {
        index: FrameIndex(0),
        buffer: PixelBuffer::filled(1, 1, &[9, 9, 9]).unwrap(),
    })
    .unwrap();
    sink.end().unwrap();

    assert!(!dir.join("frame_00099.png").exists());
    assert!(dir.join("notes.txt").exists());
    assert!(dir.join("frame_00000.png").exists());
    assert_eq!(sink.written(), &[dir.join("frame_00000.png")]);
}

#[test]
fn sequence_sink_requires_begin() {
    let mut sink = PngSequenceSink::new(scratch_dir("requires_begin"));
    let err = sink
        .accept(Frame {
            index: FrameIndex(0),
            buffer: PixelBuffer::filled(1, 1, &[0, 0, 0]).unwrap(),
        })
        .unwrap_err();
    assert!(matches!(err, PixbleedError::Sink(_)));
}
