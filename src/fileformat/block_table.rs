use std::io::BufRead;

use crate::errors::Error;

/// First character of a line that opens a named block
pub const BLOCK_MARKER: char = '>';

///////////////////////////////
/// A delimited row, remembering where in the input it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub line: usize,
    pub fields: Vec<String>,
}

///////////////////////////////
/// A named section of a block-structured table:
///
/// ```text
/// >A_F
/// 0,1,2
/// 3,4,5
///
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub name: String,
    pub line: usize,
    pub rows: Vec<Row>,
}

impl Block {
    /// Check that the first `num_rows` rows have exactly `n` columns
    pub fn expect_columns(&self, n: usize, num_rows: usize) -> Result<(), Error> {
        for row in self.rows.iter().take(num_rows) {
            if row.fields.len() != n {
                return Err(Error::schema_mismatch(
                    row.line,
                    Some(format!(
                        "block '{}' expects {} columns, found {}",
                        self.name,
                        n,
                        row.fields.len()
                    )),
                ));
            }
        }
        Ok(())
    }

    /// Check that the block has at least `n` rows
    pub fn expect_min_rows(&self, n: usize) -> Result<(), Error> {
        if self.rows.len() < n {
            return Err(Error::schema_mismatch(
                self.line,
                Some(format!(
                    "block '{}' expects {} rows, found {}",
                    self.name,
                    n,
                    self.rows.len()
                )),
            ));
        }
        Ok(())
    }
}

/// Split a data line on the delimiter, trimming each field
fn split_row(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter).map(|f| f.trim().to_string()).collect()
}

////////////////
/// Read all blocks from a stream.
///
/// A line starting with `>` opens a block, the following non-blank lines are its rows and a
/// blank line closes it. A row outside of any block is malformed input
pub fn read_blocks<R: BufRead>(reader: R, delimiter: char) -> anyhow::Result<Vec<Block>> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut in_block = false;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = i + 1;

        if let Some(name) = line.strip_prefix(BLOCK_MARKER) {
            blocks.push(Block {
                name: name.trim_end().to_string(),
                line: line_number,
                rows: Vec::new(),
            });
            in_block = true;
        } else if line.trim().is_empty() {
            in_block = false;
        } else if in_block {
            //in_block is only set after a push
            if let Some(block) = blocks.last_mut() {
                block.rows.push(Row {
                    line: line_number,
                    fields: split_row(line.trim_end(), delimiter),
                });
            }
        } else {
            return Err(Error::malformed_input(
                line_number,
                Some("data row outside of a '>' block"),
            )
            .into());
        }
    }

    Ok(blocks)
}
