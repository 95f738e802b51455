//! Unified map export as a JSON document.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use sar_core::{AgentId, Position, TriageClass, VictimId};
use sar_map::{UnifiedMap, VictimInfo};

use crate::OutputResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VictimDoc {
    pub id:       u32,
    pub position: [i32; 2],
    pub signals:  Vec<f64>,
    /// Detecting agents, ascending.
    pub sources:  Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triage:   Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survival: Option<f64>,
}

/// Base, sorted visited and obstacle lists, and victims in id order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedMapDoc {
    pub base:      [i32; 2],
    pub visited:   Vec<[i32; 2]>,
    pub obstacles: Vec<[i32; 2]>,
    pub victims:   Vec<VictimDoc>,
}

fn pair(p: Position) -> [i32; 2] {
    [p.x, p.y]
}

fn position([x, y]: [i32; 2]) -> Position {
    Position::new(x, y)
}

impl From<&UnifiedMap> for UnifiedMapDoc {
    fn from(map: &UnifiedMap) -> Self {
        Self {
            base:      pair(map.base()),
            visited:   map.visited().iter().copied().map(pair).collect(),
            obstacles: map.obstacles().iter().copied().map(pair).collect(),
            victims:   map
                .victims
                .values()
                .map(|v| VictimDoc {
                    id:       v.id.0,
                    position: pair(v.position),
                    signals:  v.signals.clone(),
                    sources:  v.sources.iter().map(|a| a.0).collect(),
                    triage:   v.triage.map(TriageClass::index),
                    survival: v.survival,
                })
                .collect(),
        }
    }
}

impl UnifiedMapDoc {
    pub fn into_map(self) -> OutputResult<UnifiedMap> {
        let mut victims = BTreeMap::new();
        for v in self.victims {
            let mut info = VictimInfo::new(VictimId(v.id), position(v.position)).with_signals(v.signals);
            info.sources = v.sources.into_iter().map(AgentId).collect();
            info.triage = v.triage.map(TriageClass::from_index).transpose()?;
            info.survival = v.survival;
            victims.insert(info.id, info);
        }
        Ok(UnifiedMap::from_parts(
            position(self.base),
            self.visited.into_iter().map(position).collect::<BTreeSet<_>>(),
            self.obstacles.into_iter().map(position).collect::<BTreeSet<_>>(),
            victims,
        ))
    }
}

pub fn write_unified_json(path: &Path, map: &UnifiedMap) -> OutputResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, &UnifiedMapDoc::from(map))?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

pub fn read_unified_json(path: &Path) -> OutputResult<UnifiedMap> {
    let doc: UnifiedMapDoc = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    doc.into_map()
}
