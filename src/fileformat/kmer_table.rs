use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;
use csv::StringRecord;

use crate::errors::Error;
use crate::kmer::{CigarCount, NUM_CIGAR_OPS};

/// Columns of a k-mer table row: k-mer followed by the nine CIGAR counters
pub const NUM_KMER_COLUMNS: usize = 1 + NUM_CIGAR_OPS;

///////////////////////////////
/// One row of a k-mer CIGAR count table
#[derive(Debug, Clone, PartialEq)]
pub struct KmerRecord {
    pub line: usize,
    pub kmer: Vec<u8>,
    pub counts: CigarCount,
}

///////////////////////////////
/// Reader of `kmer,M,I,D,N,S,H,P,=,X[,]` tables.
///
/// The upstream counter ends each row with a comma, so an empty 11th field is tolerated.
pub struct KmerTableReader<R: Read> {
    reader: csv::Reader<R>,
}

impl KmerTableReader<File> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Could not open k-mer table {}", path.as_ref().display()))?;
        Ok(Self::new(file))
    }
}

impl<R: Read> KmerTableReader<R> {
    pub fn new(src: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(src);
        Self { reader }
    }

    /// Iterate over all rows. Errors carry the line number as context
    pub fn records(&mut self) -> impl Iterator<Item = anyhow::Result<KmerRecord>> + '_ {
        self.reader.records().map(|record| {
            let record = record.context("Failed to read k-mer table row")?;
            parse_kmer_record(&record)
        })
    }
}

/// Parse a single row into a k-mer and its counters
pub fn parse_kmer_record(record: &StringRecord) -> anyhow::Result<KmerRecord> {
    let line = record.position().map(|p| p.line() as usize).unwrap_or(0);

    let n_fields = record.len();
    let has_trailing = n_fields == NUM_KMER_COLUMNS + 1;
    if n_fields != NUM_KMER_COLUMNS && !has_trailing {
        return Err(Error::schema_mismatch(
            line,
            Some(format!(
                "expected {} or {} columns, found {}",
                NUM_KMER_COLUMNS,
                NUM_KMER_COLUMNS + 1,
                n_fields
            )),
        )
        .into());
    }

    let kmer = record[0].trim().as_bytes().to_vec();

    let mut counts = [0u64; NUM_CIGAR_OPS];
    for (i, c) in counts.iter_mut().enumerate() {
        let field = record[i + 1].trim();
        *c = field.parse().map_err(|_| {
            Error::schema_mismatch(
                line,
                Some(format!("column {} is not a count: '{}'", i + 2, field)),
            )
        })?;
    }

    Ok(KmerRecord {
        line,
        kmer,
        counts: CigarCount::from_array(counts),
    })
}

///////////////////////////////
/// Writer of k-mer tables, 10 columns per row and no header
pub struct KmerTableWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl KmerTableWriter<File> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let file = File::create(path.as_ref())
            .with_context(|| format!("Could not create {}", path.as_ref().display()))?;
        Ok(Self::new(file))
    }
}

impl<W: Write> KmerTableWriter<W> {
    pub fn new(dst: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(dst);
        Self { writer }
    }

    pub fn write(&mut self, kmer: &[u8], counts: &CigarCount) -> anyhow::Result<()> {
        self.write_with_extra(kmer, counts, &[])
    }

    /// Write a row with additional trailing columns
    pub fn write_with_extra(
        &mut self,
        kmer: &[u8],
        counts: &CigarCount,
        extra: &[String],
    ) -> anyhow::Result<()> {
        let mut record = csv::ByteRecord::new();
        record.push_field(kmer);
        for c in counts.to_array() {
            record.push_field(c.to_string().as_bytes());
        }
        for e in extra {
            record.push_field(e.as_bytes());
        }
        self.writer.write_byte_record(&record)?;
        Ok(())
    }

    pub fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> anyhow::Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush k-mer table: {}", e.error()))
    }
}
