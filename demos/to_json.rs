//! Converts an ADIF log on stdin into JSON lines, one object per record.
//!
//! Run with: cargo run --example to_json < log.adi

use adif_stream::{Reader, RecordReader};
use std::error::Error;
use std::io::{self, Write};

fn main() -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let mut reader = Reader::new(io::stdin().lock());
    while let Some(record) = reader.read_record()? {
        serde_json::to_writer(&mut out, &record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    eprintln!("ADIF version {}, {} records", reader.version(), reader.record_count());
    Ok(())
}
