//! Tile-grid level loading.
//!
//! A level is a plain-text grid: one row per line, comma-separated
//! non-negative integers. Each integer is a tile index into a fixed-size
//! tile sheet, decoded as `(index / sheet_columns, index % sheet_columns)`
//! to select the sheet sub-region. Every cell becomes one entity carrying a
//! [`Transform`] at its scaled grid position and a [`Sprite`] for the
//! sub-region.
//!
//! Parsing is all-or-nothing: the grid is validated in full before any
//! entity is spawned, so a malformed level never leaves a half-loaded
//! registry behind.

use std::path::{Path, PathBuf};

use ember_ecs::prelude::*;

use crate::components::{Rect, Sprite, Transform, Vec2};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced while parsing a level grid.
#[derive(Debug, thiserror::Error)]
pub enum TilemapError {
    /// The level file could not be read.
    #[error("failed to read level file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A cell held something other than a non-negative integer.
    #[error("line {line}, column {column}: invalid tile index '{token}'")]
    InvalidTile {
        line: usize,
        column: usize,
        token: String,
    },

    /// A row's width differed from the first row's.
    #[error("line {line}: expected {expected} tiles per row, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A tile index pointed past the end of the tile sheet.
    #[error(
        "line {line}, column {column}: tile index {index} is outside a \
         {sheet_columns}x{sheet_rows} sheet"
    )]
    TileOutOfRange {
        line: usize,
        column: usize,
        index: u32,
        sheet_columns: u32,
        sheet_rows: u32,
    },
}

// ---------------------------------------------------------------------------
// TilemapConfig
// ---------------------------------------------------------------------------

/// How to turn grid cells into entities.
#[derive(Debug, Clone)]
pub struct TilemapConfig {
    /// Texture id of the tile sheet.
    pub asset_id: String,
    /// Edge length of one (square) tile, in sheet pixels.
    pub tile_size: u32,
    /// Uniform scale applied to every tile's transform.
    pub scale: f32,
    /// Tiles per sheet row. Must be nonzero.
    pub sheet_columns: u32,
    /// Tile rows in the sheet; indices at or past
    /// `sheet_columns * sheet_rows` are rejected.
    pub sheet_rows: u32,
    /// Layer for the spawned sprites. Tiles usually render behind
    /// everything, so 0 is the common choice.
    pub z_index: i32,
}

/// One validated cell, pre-spawn.
struct TileCell {
    row: usize,
    col: usize,
    src: Rect,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parse `source` and spawn one entity per cell into `registry`.
///
/// Returns the spawned entities in row-major grid order. The entities are
/// staged like any other creation: they join systems at the registry's next
/// `update()`.
pub fn load_tilemap(
    registry: &mut Registry,
    config: &TilemapConfig,
    source: &str,
) -> Result<Vec<Entity>, TilemapError> {
    assert!(config.sheet_columns > 0, "sheet_columns must be nonzero");

    let mut cells = Vec::new();
    let mut expected_columns: Option<usize> = None;
    let mut rows = 0usize;

    for (row, line) in source.lines().enumerate() {
        let tokens: Vec<&str> = line.split(',').collect();
        match expected_columns {
            Some(expected) if tokens.len() != expected => {
                return Err(TilemapError::RaggedRow {
                    line: row + 1,
                    expected,
                    found: tokens.len(),
                });
            }
            Some(_) => {}
            None => expected_columns = Some(tokens.len()),
        }

        for (col, token) in tokens.iter().enumerate() {
            let token = token.trim();
            let index: u32 = token.parse().map_err(|_| TilemapError::InvalidTile {
                line: row + 1,
                column: col + 1,
                token: token.to_owned(),
            })?;
            let src_row = index / config.sheet_columns;
            let src_col = index % config.sheet_columns;
            if src_row >= config.sheet_rows {
                return Err(TilemapError::TileOutOfRange {
                    line: row + 1,
                    column: col + 1,
                    index,
                    sheet_columns: config.sheet_columns,
                    sheet_rows: config.sheet_rows,
                });
            }
            cells.push(TileCell {
                row,
                col,
                src: Rect::new(
                    (src_col * config.tile_size) as i32,
                    (src_row * config.tile_size) as i32,
                    config.tile_size,
                    config.tile_size,
                ),
            });
        }
        rows += 1;
    }

    let step = config.tile_size as f32 * config.scale;
    let entities: Vec<Entity> = cells
        .into_iter()
        .map(|cell| {
            let entity = registry.create_entity();
            registry.add_component(
                entity,
                Transform::new(
                    Vec2::new(cell.col as f32 * step, cell.row as f32 * step),
                    Vec2::new(config.scale, config.scale),
                    0.0,
                ),
            );
            let mut sprite = Sprite::new(config.asset_id.clone(), config.tile_size, config.tile_size);
            sprite.z_index = config.z_index;
            sprite.src = cell.src;
            registry.add_component(entity, sprite);
            entity
        })
        .collect();

    tracing::info!(rows, tiles = entities.len(), asset = %config.asset_id, "tilemap loaded");
    Ok(entities)
}

/// Read a level file and [`load_tilemap`] its contents.
pub fn load_tilemap_file(
    registry: &mut Registry,
    config: &TilemapConfig,
    path: impl AsRef<Path>,
) -> Result<Vec<Entity>, TilemapError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| TilemapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_tilemap(registry, config, &source)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
