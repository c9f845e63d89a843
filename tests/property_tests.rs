//! Property-based tests over generated records and streams.
//!
//! Field names avoid `_` so a generated record never starts with
//! `<adif_ver:` or spells the LoTW sentinel. Stream values are printable and
//! free of `<`, so no value can hide a marker.

use adif_stream::{Reader, ReaderOptions, Record, RecordReader, Result};
use proptest::prelude::*;

fn field_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,10}"
}

fn any_value() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..24)
}

fn text_value() -> impl Strategy<Value = Vec<u8>> {
    "[A-Za-z0-9 /.+>-]{0,12}".prop_map(String::into_bytes)
}

fn record_from(fields: &[(String, Vec<u8>)]) -> Record {
    let mut record = Record::new();
    for (name, value) in fields {
        record.set(name, value);
    }
    record
}

fn stream_of(records: &[Record]) -> Vec<u8> {
    let mut out = Vec::new();
    for record in records {
        out.extend_from_slice(&record.to_bytes());
        out.extend_from_slice(b"<eor>\r\n");
    }
    out
}

fn read_all(input: &[u8], chunk_size: usize) -> Vec<Record> {
    let options = ReaderOptions::new().with_chunk_size(chunk_size);
    Reader::with_options(input, options)
        .records()
        .collect::<Result<_>>()
        .unwrap()
}

fn text_record() -> impl Strategy<Value = Record> {
    prop::collection::vec((field_name(), text_value()), 1..8).prop_map(|f| record_from(&f))
}

proptest! {
    #[test]
    fn prop_text_round_trip(fields in prop::collection::vec((field_name(), any_value()), 1..10)) {
        let record = record_from(&fields);
        let parsed = Record::parse(&record.to_bytes()).unwrap();
        prop_assert_eq!(parsed, record);
    }

    #[test]
    fn prop_output_ignores_insertion_order(
        fields in prop::collection::hash_map(field_name(), any_value(), 1..10)
    ) {
        let forward: Vec<_> = fields.into_iter().collect();
        let mut backward = forward.clone();
        backward.reverse();

        let a = record_from(&forward);
        let b = record_from(&backward);
        prop_assert_eq!(a.to_bytes(), b.to_bytes());
        prop_assert_eq!(a.to_text(), b.to_text());
    }

    #[test]
    fn prop_fingerprint_ignores_non_identity_fields(
        call in text_value(),
        band in text_value(),
        time_on in text_value(),
        notes_a in any_value(),
        notes_b in any_value(),
    ) {
        let mut a = Record::new();
        a.set("call", &call);
        a.set("band", &band);
        a.set("time_on", &time_on);
        let mut b = a.clone();
        a.set("notes", &notes_a);
        b.set("notes", &notes_b);
        b.set("qsl_rcvd", "Y");
        prop_assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn prop_chunk_size_does_not_change_records(
        records in prop::collection::vec(text_record(), 0..6),
        chunk_size in 1usize..40,
    ) {
        let input = stream_of(&records);
        let single = read_all(&input, input.len().max(1));
        prop_assert_eq!(&single, &records);
        prop_assert_eq!(&read_all(&input, 1), &records);
        prop_assert_eq!(&read_all(&input, 1024), &records);
        prop_assert_eq!(&read_all(&input, chunk_size), &records);
    }

    #[test]
    fn prop_sentinel_adds_nothing(
        records in prop::collection::vec(text_record(), 0..6),
        chunk_size in 1usize..40,
    ) {
        let plain = stream_of(&records);
        let mut with_sentinel = plain.clone();
        with_sentinel.extend_from_slice(b"<APP_LoTW_EOF>\r\n");
        prop_assert_eq!(
            read_all(&with_sentinel, chunk_size),
            read_all(&plain, chunk_size)
        );
    }

    #[test]
    fn prop_record_count_matches(records in prop::collection::vec(text_record(), 0..6)) {
        let input = stream_of(&records);
        let mut reader = Reader::new(&input[..]);
        while reader.read_record().unwrap().is_some() {}
        prop_assert_eq!(reader.record_count(), records.len());
    }
}
