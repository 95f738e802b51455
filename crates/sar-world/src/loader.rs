//! CSV world loader.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/world.csv    width,height,base_x,base_y      (exactly one data row)
//! <dir>/cells.csv    x,y,difficulty                  (optional)
//! <dir>/victims.csv  id,x,y,<vital columns...>       (optional)
//! ```
//!
//! Cells absent from `cells.csv` are open with difficulty 1.0; a difficulty
//! of [`WALL_DIFFICULTY`] or more marks a wall.  Every column after `y` in
//! `victims.csv` is read as one vital-sign value, in file order.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use sar_core::{Position, VictimId};

use crate::grid::{GridWorld, GridWorldBuilder, WALL_DIFFICULTY};
use crate::{WorldError, WorldResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WorldRecord {
    width:  i32,
    height: i32,
    base_x: i32,
    base_y: i32,
}

#[derive(Deserialize)]
struct CellRecord {
    x:          i32,
    y:          i32,
    difficulty: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`GridWorld`] from the three CSV files in `dir`.
pub fn load_world_dir(dir: &Path) -> WorldResult<GridWorld> {
    let world = std::fs::File::open(dir.join("world.csv"))?;
    let cells = open_optional(&dir.join("cells.csv"))?;
    let victims = open_optional(&dir.join("victims.csv"))?;
    load_world_reader(world, cells, victims)
}

/// Like [`load_world_dir`] but accepts any `Read` sources.
///
/// Useful for testing (pass `std::io::Cursor`s).
pub fn load_world_reader<W, C, V>(
    world:   W,
    cells:   Option<C>,
    victims: Option<V>,
) -> WorldResult<GridWorld>
where
    W: Read,
    C: Read,
    V: Read,
{
    let header = read_world_header(world)?;
    let mut builder = GridWorldBuilder::new(
        header.width,
        header.height,
        Position::new(header.base_x, header.base_y),
    );

    if let Some(cells) = cells {
        let mut reader = csv::Reader::from_reader(cells);
        for result in reader.deserialize::<CellRecord>() {
            let row = result.map_err(|e| WorldError::Parse(format!("cells.csv: {e}")))?;
            builder = builder.difficulty(Position::new(row.x, row.y), row.difficulty);
        }
    }

    if let Some(victims) = victims {
        builder = read_victims(builder, victims)?;
    }

    let world = builder.build()?;
    tracing::info!(
        width   = world.width(),
        height  = world.height(),
        victims = world.victim_count(),
        wall_threshold = WALL_DIFFICULTY,
        "world loaded"
    );
    Ok(world)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn open_optional(path: &Path) -> WorldResult<Option<std::fs::File>> {
    match std::fs::File::open(path) {
        Ok(f) => Ok(Some(f)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn read_world_header<R: Read>(reader: R) -> WorldResult<WorldRecord> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut rows = reader.deserialize::<WorldRecord>();
    let first = rows
        .next()
        .ok_or_else(|| WorldError::Parse("world.csv: missing data row".into()))?
        .map_err(|e| WorldError::Parse(format!("world.csv: {e}")))?;
    if rows.next().is_some() {
        return Err(WorldError::Parse("world.csv: expected exactly one data row".into()));
    }
    Ok(first)
}

fn read_victims<R: Read>(mut builder: GridWorldBuilder, reader: R) -> WorldResult<GridWorldBuilder> {
    let mut reader = csv::Reader::from_reader(reader);
    for (line, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() < 3 {
            return Err(WorldError::Parse(format!(
                "victims.csv row {}: expected at least id,x,y",
                line + 1
            )));
        }
        let field = |i: usize| record.get(i).unwrap_or("").trim();
        let parse_err = |what: &str, raw: &str| {
            WorldError::Parse(format!("victims.csv row {}: invalid {what} {raw:?}", line + 1))
        };

        let id: u32 = field(0).parse().map_err(|_| parse_err("id", field(0)))?;
        let x: i32 = field(1).parse().map_err(|_| parse_err("x", field(1)))?;
        let y: i32 = field(2).parse().map_err(|_| parse_err("y", field(2)))?;
        let vitals = (3..record.len())
            .map(|i| field(i).parse::<f64>().map_err(|_| parse_err("vital sign", field(i))))
            .collect::<WorldResult<Vec<f64>>>()?;

        builder = builder.victim(VictimId(id), Position::new(x, y), vitals);
    }
    Ok(builder)
}
