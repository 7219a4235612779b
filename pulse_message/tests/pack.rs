use pulse_message::{DastardPacker, Packer, Pulse, PulseHeader, PulseRecord, HEADER_LEN};

fn record(channel: u16) -> PulseRecord {
    PulseRecord::new(channel, 200, 2.5e-6, 1. / 65535.)
}

#[test]
fn frame_sizes() {
    let samples = vec![1000u16; 1000];
    let frame = DastardPacker.pack(&record(1), &samples).unwrap();
    assert_eq!(frame.header.len(), HEADER_LEN);
    assert_eq!(frame.body.len(), 2000);
}

#[test]
fn body_is_little_endian() {
    let frame = record(4).pack_at(&[0x0102, 0xfffe], 0, 0).unwrap();
    assert_eq!(&frame.body[..], &[0x02, 0x01, 0xfe, 0xff]);
}

#[test]
fn decode_packed() {
    let samples: Vec<u16> = (0..1000).map(|i| 5000 + i as u16).collect();
    let frame = record(20).pack_at(&samples, 123_456_789, 49_382).unwrap();
    let pulse = Pulse::decode(&frame.header, &frame.body).unwrap();

    assert_eq!(pulse.channel(), 20);
    assert_eq!(pulse.header.presamples, 200);
    assert_eq!(pulse.header.nsamples, 1000);
    assert_eq!(pulse.header.timebase, 2.5e-6f32);
    assert_eq!(pulse.header.trigger_time, 123_456_789);
    assert_eq!(pulse.header.trigger_frame, 49_382);
    assert_eq!(pulse.data, samples);
    assert_eq!(pulse.post_trigger()[0], 5200);
}

#[test]
fn truncated_body_refused() {
    let frame = record(2).pack_at(&[1; 10], 0, 0).unwrap();
    assert!(Pulse::decode(&frame.header, &frame.body[..18]).is_err());
}

#[test]
fn word_code_checked() {
    let frame = record(2).pack_at(&[1; 10], 0, 0).unwrap();
    let mut hdr = PulseHeader::parse(&frame.header).unwrap();
    hdr.word_code = 5;
    assert!(Pulse::decode(&hdr.to_bytes(), &frame.body).is_err());
    hdr.word_code = 42;
    assert!(Pulse::decode(&hdr.to_bytes(), &frame.body).is_err());
}
