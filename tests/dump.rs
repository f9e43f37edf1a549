use cbor_stream::{DateTime, Stream};

fn pretty(s: &Stream<'_>) -> String {
    format!("{}", s.pretty())
}

#[test]
fn hex_dump() {
    let mut buf = [0u8; 16];
    let mut s = Stream::new(&mut buf);
    s.array(3).unwrap();
    s.int(1).unwrap();
    s.int(2).unwrap();
    s.int(3).unwrap();
    assert_eq!(format!("{}", s.hex()), "0x83010203");

    s.clear();
    assert_eq!(format!("{}", s.hex()), "");
}

#[test]
fn scalars() {
    let mut buf = [0u8; 32];
    let mut s = Stream::new(&mut buf);
    s.int(1).unwrap();
    s.uint(2).unwrap();
    s.int(-1000).unwrap();
    s.bool(true).unwrap();
    s.null().unwrap();
    s.undefined().unwrap();

    assert_eq!(
        pretty(&s),
        "(int, 1)\n(int, 2)\n(int, -1000)\n(bool, true)\n(null)\n(undefined)\n"
    );
}

#[test]
fn floats() {
    let mut buf = [0u8; 32];
    let mut s = Stream::new(&mut buf);
    s.half(1.5).unwrap();
    s.float(100_000.0).unwrap();
    s.double(1.1).unwrap();

    assert_eq!(
        pretty(&s),
        "(float, 1.5)\n(float, 100000)\n(double, 1.1)\n"
    );
}

#[test]
fn strings_with_escapes() {
    let mut buf = [0u8; 32];
    let mut s = Stream::new(&mut buf);
    s.bytes(b"abc").unwrap();
    s.text("def").unwrap();
    s.bytes(&[0x01, 0x61]).unwrap();

    assert_eq!(
        pretty(&s),
        "(byte string, \"abc\")\n(unicode string, \"def\")\n(byte string, \"\\x01a\")\n"
    );
}

#[test]
fn nested_arrays() {
    let mut buf = [0u8; 16];
    let mut s = Stream::new(&mut buf);
    s.array(2).unwrap();
    s.int(1).unwrap();
    s.array(1).unwrap();
    s.int(2).unwrap();

    assert_eq!(
        pretty(&s),
        "(array, length: 2)\n  (int, 1)\n  (array, length: 1)\n    (int, 2)\n"
    );
}

#[test]
fn indefinite_array_stops_at_break() {
    let mut buf = [0u8; 16];
    let mut s = Stream::new(&mut buf);
    s.indefinite_array().unwrap();
    s.int(10).unwrap();
    s.int(11).unwrap();
    s.write_break().unwrap();

    assert_eq!(
        pretty(&s),
        "(array, length: [indefinite])\n  (int, 10)\n  (int, 11)\n"
    );
}

#[test]
fn map_indents_keys_and_values() {
    let mut buf = [0u8; 16];
    let mut s = Stream::new(&mut buf);
    s.map(2).unwrap();
    s.int(1).unwrap();
    s.bytes(b"1").unwrap();
    s.int(2).unwrap();
    s.bytes(b"2").unwrap();

    assert_eq!(
        pretty(&s),
        "(map, length: 2)\n (int, 1)\n  (byte string, \"1\")\n (int, 2)\n  (byte string, \"2\")\n"
    );
}

#[test]
fn indefinite_map() {
    let mut buf = [0u8; 16];
    let mut s = Stream::new(&mut buf);
    s.indefinite_map().unwrap();
    s.int(1).unwrap();
    s.bytes(b"1").unwrap();
    s.write_break().unwrap();

    assert_eq!(
        pretty(&s),
        "(map, length: [indefinite])\n (int, 1)\n  (byte string, \"1\")\n"
    );
}

#[test]
fn tags() {
    let mut buf = [0u8; 64];
    let mut s = Stream::new(&mut buf);
    s.tag(2).unwrap();
    s.bytes(b"1").unwrap();
    s.epoch(1_405_358_156).unwrap();
    s.date_time(&DateTime::new(2014, 7, 1, 15, 0, 0).unwrap())
        .unwrap();

    assert_eq!(
        pretty(&s),
        concat!(
            "(tag: 2, unknown content)\n",
            "(byte string, \"1\")\n",
            "(tag: 1, date/time epoch: 1405358156)\n",
            "(tag: 0, date/time string: \"2014-07-01T15:00:00Z\")\n",
        )
    );
}

#[test]
fn diagnostic_on_stray_break() {
    let s = Stream::from_slice(&[0xff]);
    assert_eq!(pretty(&s), "failed to decode at offset 0, initial byte 0xFF\n");
}

#[test]
fn diagnostic_on_truncated_container() {
    let s = Stream::from_slice(&[0x83, 0x01]);
    assert_eq!(
        pretty(&s),
        "(array, length: 3)\n  (int, 1)\nfailed to decode at offset 2: unexpected end of data\n"
    );
}

#[test]
fn depth_limit_stops_the_walk() {
    let s = Stream::from_slice(&[0x81, 0x81, 0x81, 0x01]);
    let capped = format!("{}", s.pretty().with_max_depth(2));
    assert_eq!(
        capped,
        concat!(
            "(array, length: 1)\n",
            "  (array, length: 1)\n",
            "    (array, length: 1)\n",
            "failed to decode at offset 3, initial byte 0x01\n",
        )
    );

    // The default depth accepts the same stream.
    assert_eq!(
        pretty(&s),
        concat!(
            "(array, length: 1)\n",
            "  (array, length: 1)\n",
            "    (array, length: 1)\n",
            "      (int, 1)\n",
        )
    );
}

#[test]
fn truncated_indefinite_container_ends_quietly() {
    let s = Stream::from_slice(&[0x9f, 0x01]);
    assert_eq!(pretty(&s), "(array, length: [indefinite])\n  (int, 1)\n");
}
