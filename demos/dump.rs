//! Prints each distinct record from an ADIF log on stdin in canonical form.
//!
//! Run with: cargo run --example dump < log.adi

use adif_stream::{DedupReader, Reader, RecordReader};
use std::error::Error;
use std::io::{self, Write};

fn main() -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let mut reader = DedupReader::new(Reader::new(stdin.lock()));
    loop {
        match reader.read_record() {
            Ok(Some(record)) => {
                record.write_to(&mut out)?;
                out.write_all(b"\n")?;
            }
            Ok(None) => break,
            Err(e) if e.is_tag_error() => eprintln!("skipping record: {}", e),
            Err(e) => return Err(e.into()),
        }
    }
    out.flush()?;

    eprintln!("Total records: {}", reader.record_count());
    eprintln!("Duplicates dropped: {}", reader.duplicates());
    Ok(())
}
