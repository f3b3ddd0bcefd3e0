use crate::board::{Board, GenerationStats};
use crate::ir::{BorderAnchor, DrawCommand};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDump {
    pub width: usize,
    pub height: usize,
    pub spacing: f32,
    pub seed: u64,
    pub occupied_cells: usize,
    pub stats: GenerationStats,
    pub anchors: Vec<BorderAnchor>,
    pub commands: Vec<DrawCommand>,
}

impl BoardDump {
    pub fn from_board(board: &Board) -> Self {
        BoardDump {
            width: board.width,
            height: board.height,
            spacing: board.spacing,
            seed: board.seed,
            occupied_cells: board.grid.occupied_count(),
            stats: board.stats.clone(),
            anchors: board.anchors.clone(),
            commands: board.commands.clone(),
        }
    }
}

pub fn write_board_dump(path: &Path, board: &Board) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = BoardDump::from_board(board);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
