//! Persisted map format: one CSV row per known cell, header always present.

use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use sar_map::LocalMap;

use crate::row::{CellRow, CELL_HEADER};
use crate::OutputResult;

/// Write every cell of `map` whose status is known, in position order.
pub fn write_map<W: Write>(out: W, agent: &str, map: &LocalMap) -> OutputResult<()> {
    let mut w = WriterBuilder::new().has_headers(false).from_writer(out);
    w.write_record(CELL_HEADER)?;
    for (pos, cell) in map.known_cells() {
        w.serialize(CellRow::from_cell(agent, pos, cell)?)?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_map_csv(path: &Path, agent: &str, map: &LocalMap) -> OutputResult<()> {
    let file = std::fs::File::create(path)?;
    write_map(file, agent, map)?;
    tracing::debug!(path = %path.display(), agent, cells = map.known_cells().count(), "map written");
    Ok(())
}

/// Read a persisted map back.  The agent column is not part of the cell
/// and is ignored.
pub fn read_map<R: Read>(input: R) -> OutputResult<LocalMap> {
    let mut r = ReaderBuilder::new().from_reader(input);
    let mut map = LocalMap::new();
    for row in r.deserialize::<CellRow>() {
        let (pos, cell) = row?.into_cell()?;
        map.insert(pos, cell);
    }
    Ok(map)
}

pub fn read_map_csv(path: &Path) -> OutputResult<LocalMap> {
    read_map(std::fs::File::open(path)?)
}
