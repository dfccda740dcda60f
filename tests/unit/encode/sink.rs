use super::*;

fn frame(i: u64) -> Frame {
    Frame {
        index: FrameIndex(i),
        buffer: PixelBuffer::filled(1, 1, &[1, 2, 3]).unwrap(),
    }
}

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 1,
        height: 1,
        channels: 3,
        frame_count: 2,
    }
}

#[test]
fn in_memory_sink_captures_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.accept(frame(0)).unwrap();
    sink.accept(frame(1)).unwrap();
    sink.end().unwrap();

    assert!(sink.is_finished());
    assert_eq!(sink.config(), Some(cfg()));
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.into_frames()[1].index, FrameIndex(1));
}

#[test]
fn in_memory_sink_rejects_out_of_order_and_unstarted_use() {
    let mut sink = InMemorySink::new();
    assert!(matches!(sink.accept(frame(0)), Err(PixbleedError::Sink(_))));

    sink.begin(cfg()).unwrap();
    sink.accept(frame(1)).unwrap();
    assert!(sink.accept(frame(1)).is_err());
    assert!(sink.accept(frame(0)).is_err());
}
