use cbor_stream::{CborError, Stream};

fn encoded(f: impl FnOnce(&mut Stream<'_>) -> Result<usize, CborError>) -> Vec<u8> {
    let mut buf = [0u8; 64];
    let mut s = Stream::new(&mut buf);
    let written = f(&mut s).unwrap();
    assert_eq!(written, s.position(), "serializer return must match position");
    s.as_bytes().to_vec()
}

#[test]
fn uint_layout_boundaries() {
    assert_eq!(encoded(|s| s.uint(0)), vec![0x00]);
    assert_eq!(encoded(|s| s.uint(23)), vec![0x17]);
    assert_eq!(encoded(|s| s.uint(24)), vec![0x18, 0x18]);
    assert_eq!(encoded(|s| s.uint(0xff)), vec![0x18, 0xff]);
    assert_eq!(encoded(|s| s.uint(0x100)), vec![0x19, 0x01, 0x00]);
    assert_eq!(encoded(|s| s.uint(1000)), vec![0x19, 0x03, 0xe8]);
    assert_eq!(encoded(|s| s.uint(0xffff)), vec![0x19, 0xff, 0xff]);
    assert_eq!(
        encoded(|s| s.uint(0x1_0000)),
        vec![0x1a, 0x00, 0x01, 0x00, 0x00]
    );
    assert_eq!(
        encoded(|s| s.uint(1_000_000)),
        vec![0x1a, 0x00, 0x0f, 0x42, 0x40]
    );
    assert_eq!(
        encoded(|s| s.uint(0xffff_ffff)),
        vec![0x1a, 0xff, 0xff, 0xff, 0xff]
    );
    assert_eq!(
        encoded(|s| s.uint(0x1_0000_0000)),
        vec![0x1b, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00]
    );
    assert_eq!(
        encoded(|s| s.uint(u64::MAX)),
        vec![0x1b, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
    );
}

#[test]
fn int_layout_boundaries() {
    assert_eq!(encoded(|s| s.int(0)), vec![0x00]);
    assert_eq!(encoded(|s| s.int(23)), vec![0x17]);
    assert_eq!(encoded(|s| s.int(-1)), vec![0x20]);
    assert_eq!(encoded(|s| s.int(-24)), vec![0x37]);
    assert_eq!(encoded(|s| s.int(-25)), vec![0x38, 0x18]);
    assert_eq!(encoded(|s| s.int(-100)), vec![0x38, 0x63]);
    assert_eq!(encoded(|s| s.int(-256)), vec![0x38, 0xff]);
    assert_eq!(encoded(|s| s.int(-257)), vec![0x39, 0x01, 0x00]);
    assert_eq!(encoded(|s| s.int(-1000)), vec![0x39, 0x03, 0xe7]);
    assert_eq!(
        encoded(|s| s.int(-0x1_0000_0000)),
        vec![0x3a, 0xff, 0xff, 0xff, 0xff]
    );
    assert_eq!(
        encoded(|s| s.int(i64::MIN)),
        vec![0x3b, 0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
    );
    assert_eq!(
        encoded(|s| s.int(i64::MAX)),
        vec![0x1b, 0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
    );
}

#[test]
fn string_layouts() {
    assert_eq!(encoded(|s| s.bytes(b"")), vec![0x40]);
    assert_eq!(encoded(|s| s.bytes(b"a")), vec![0x41, 0x61]);
    assert_eq!(encoded(|s| s.text("")), vec![0x60]);
    assert_eq!(
        encoded(|s| s.text("IETF")),
        vec![0x64, 0x49, 0x45, 0x54, 0x46]
    );
}

#[test]
fn long_string_takes_multi_byte_head() {
    let payload = [0x61u8; 24];
    let mut buf = [0u8; 32];
    let mut s = Stream::new(&mut buf);
    assert_eq!(s.bytes(&payload).unwrap(), 26);
    assert_eq!(s.as_bytes()[..2], [0x58, 24]);
}

#[test]
fn definite_array() {
    let mut buf = [0u8; 16];
    let mut s = Stream::new(&mut buf);
    s.array(3).unwrap();
    s.int(1).unwrap();
    s.int(2).unwrap();
    s.int(3).unwrap();
    assert_eq!(s.as_bytes(), [0x83, 0x01, 0x02, 0x03]);
}

#[test]
fn indefinite_array() {
    let mut buf = [0u8; 16];
    let mut s = Stream::new(&mut buf);
    s.indefinite_array().unwrap();
    s.int(1).unwrap();
    s.int(2).unwrap();
    s.write_break().unwrap();
    assert_eq!(s.as_bytes(), [0x9f, 0x01, 0x02, 0xff]);
}

#[test]
fn definite_map() {
    let mut buf = [0u8; 16];
    let mut s = Stream::new(&mut buf);
    s.map(2).unwrap();
    s.int(1).unwrap();
    s.bytes(b"1").unwrap();
    s.int(2).unwrap();
    s.bytes(b"2").unwrap();
    assert_eq!(s.as_bytes(), [0xa2, 0x01, 0x41, 0x31, 0x02, 0x41, 0x32]);
}

#[test]
fn indefinite_map() {
    let mut buf = [0u8; 16];
    let mut s = Stream::new(&mut buf);
    s.indefinite_map().unwrap();
    s.int(1).unwrap();
    s.bytes(b"1").unwrap();
    s.int(2).unwrap();
    s.bytes(b"2").unwrap();
    s.write_break().unwrap();
    assert_eq!(
        s.as_bytes(),
        [0xbf, 0x01, 0x41, 0x31, 0x02, 0x41, 0x32, 0xff]
    );
}

#[test]
fn tag_forms() {
    // Positive bignum: tag 2 followed by the magnitude as a byte string.
    let mut buf = [0u8; 16];
    let mut s = Stream::new(&mut buf);
    s.tag(2).unwrap();
    s.bytes(b"1").unwrap();
    assert_eq!(s.as_bytes(), [0xc2, 0x41, 0x31]);

    // Tags past 23 switch to the multi-byte argument form.
    assert_eq!(encoded(|s| s.tag(24)), vec![0xd8, 0x18]);
    assert_eq!(encoded(|s| s.tag(1000)), vec![0xd9, 0x03, 0xe8]);
}

#[test]
fn simple_values() {
    assert_eq!(encoded(|s| s.bool(false)), vec![0xf4]);
    assert_eq!(encoded(|s| s.bool(true)), vec![0xf5]);
    assert_eq!(encoded(|s| s.null()), vec![0xf6]);
    assert_eq!(encoded(|s| s.undefined()), vec![0xf7]);
}

#[test]
fn half_precision_vectors() {
    assert_eq!(encoded(|s| s.half(0.0)), vec![0xf9, 0x00, 0x00]);
    assert_eq!(encoded(|s| s.half(-0.0)), vec![0xf9, 0x80, 0x00]);
    assert_eq!(encoded(|s| s.half(1.0)), vec![0xf9, 0x3c, 0x00]);
    assert_eq!(encoded(|s| s.half(1.5)), vec![0xf9, 0x3e, 0x00]);
    assert_eq!(encoded(|s| s.half(-4.0)), vec![0xf9, 0xc4, 0x00]);
    assert_eq!(
        encoded(|s| s.half(f32::INFINITY)),
        vec![0xf9, 0x7c, 0x00]
    );
    assert_eq!(
        encoded(|s| s.half(f32::NEG_INFINITY)),
        vec![0xf9, 0xfc, 0x00]
    );
    // Smallest half denormal.
    assert_eq!(
        encoded(|s| s.half(5.960_464_5e-8)),
        vec![0xf9, 0x00, 0x01]
    );
}

#[test]
fn half_nan_stays_nan() {
    let bytes = encoded(|s| s.half(f32::NAN));
    assert_eq!(bytes[0], 0xf9);
    let h = u16::from_be_bytes([bytes[1], bytes[2]]);
    assert_eq!(h & 0x7c00, 0x7c00, "exponent must be all ones");
    assert_ne!(h & 0x03ff, 0, "NaN must not collapse to infinity");
}

#[test]
fn single_precision_vectors() {
    assert_eq!(
        encoded(|s| s.float(0.0)),
        vec![0xfa, 0x00, 0x00, 0x00, 0x00]
    );
    assert_eq!(
        encoded(|s| s.float(100_000.0)),
        vec![0xfa, 0x47, 0xc3, 0x50, 0x00]
    );
    assert_eq!(
        encoded(|s| s.float(3.402_823_466_385_288_6e38)),
        vec![0xfa, 0x7f, 0x7f, 0xff, 0xff]
    );
    assert_eq!(
        encoded(|s| s.float(f32::NEG_INFINITY)),
        vec![0xfa, 0xff, 0x80, 0x00, 0x00]
    );
}

#[test]
fn double_precision_vectors() {
    assert_eq!(
        encoded(|s| s.double(1.1)),
        vec![0xfb, 0x3f, 0xf1, 0x99, 0x99, 0x99, 0x99, 0x99, 0x9a]
    );
    assert_eq!(
        encoded(|s| s.double(-4.1)),
        vec![0xfb, 0xc0, 0x10, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66]
    );
    assert_eq!(
        encoded(|s| s.double(1.0e300)),
        vec![0xfb, 0x7e, 0x37, 0xe4, 0x3c, 0x88, 0x00, 0x75, 0x9c]
    );
    assert_eq!(
        encoded(|s| s.double(f64::INFINITY)),
        vec![0xfb, 0x7f, 0xf0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
    );
}
