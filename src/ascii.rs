//! ASCII rendering for world maps
//!
//! The presentation mapping (glyphs and colours per kind) lives here, outside
//! the generation core. Works from snapshots only.

use crate::npc::{Npc, NpcKind};
use crate::terrain::TerrainKind;
use crate::world::GridSnapshot;

/// Get ASCII character for a terrain kind
pub fn terrain_char(kind: TerrainKind) -> char {
    match kind {
        TerrainKind::Water => '~',
        TerrainKind::Grass => '"',
        TerrainKind::Forest => 'T',
        TerrainKind::Mountain => '^',
        TerrainKind::Desert => '.',
        TerrainKind::Village => 'V',
        TerrainKind::Ruins => 'R',
        TerrainKind::Dungeon => 'D',
    }
}

/// Get ASCII character for an NPC, drawn over the terrain
pub fn npc_char(kind: NpcKind) -> char {
    match kind {
        NpcKind::Villager => 'v',
        NpcKind::Wanderer => 'w',
        NpcKind::DungeonGuardian => 'g',
    }
}

/// ANSI 256-colour foreground for a terrain kind
pub fn terrain_fg_color(kind: TerrainKind) -> u8 {
    match kind {
        TerrainKind::Water => 33,     // blue
        TerrainKind::Grass => 76,     // green
        TerrainKind::Forest => 22,    // dark green
        TerrainKind::Mountain => 245, // gray
        TerrainKind::Desert => 220,   // yellow
        TerrainKind::Village => 208,  // orange
        TerrainKind::Ruins => 137,    // brown
        TerrainKind::Dungeon => 160,  // red
    }
}

fn ansi_colored_char(c: char, fg: u8) -> String {
    format!("\x1b[38;5;{}m{}\x1b[0m", fg, c)
}

/// Render the grid with NPCs overlaid. When several NPCs share a tile the
/// first one in list order is drawn.
pub fn render_map(snapshot: &GridSnapshot, npcs: &[Npc], colored: bool) -> String {
    let mut glyphs: Vec<(char, u8)> = snapshot
        .tiles
        .iter()
        .map(|&k| (terrain_char(k), terrain_fg_color(k)))
        .collect();

    for npc in npcs.iter().rev() {
        let (x, y) = (npc.position.x, npc.position.y);
        if x < snapshot.width && y < snapshot.height {
            glyphs[y * snapshot.width + x] = (npc_char(npc.kind), 15);
        }
    }

    let bytes_per_glyph = if colored { 16 } else { 1 };
    let mut out = String::with_capacity(glyphs.len() * bytes_per_glyph + snapshot.height);
    for row in glyphs.chunks(snapshot.width) {
        for &(c, fg) in row {
            if colored {
                out.push_str(&ansi_colored_char(c, fg));
            } else {
                out.push(c);
            }
        }
        out.push('\n');
    }
    out
}

/// One-line legend of all glyphs
pub fn legend() -> String {
    let mut parts: Vec<String> = TerrainKind::all()
        .iter()
        .map(|&k| format!("{} {}", terrain_char(k), k.name()))
        .collect();
    parts.extend(NpcKind::all().iter().map(|&k| format!("{} {}", npc_char(k), k.name())));
    parts.join("  ")
}
