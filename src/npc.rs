//! NPC records and population of landmark tiles
//!
//! Each landmark tile gets exactly one NPC, plus an active quest and a trade
//! offer keyed by the landmark's coordinate.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::terrain::{Grid, TerrainKind};
use crate::tilemap::Coord;

/// NPC kinds, one per landmark kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NpcKind {
    Villager,
    Wanderer,
    DungeonGuardian,
}

impl NpcKind {
    pub fn all() -> &'static [NpcKind] {
        &[NpcKind::Villager, NpcKind::Wanderer, NpcKind::DungeonGuardian]
    }

    pub fn name(&self) -> &'static str {
        match self {
            NpcKind::Villager => "Villager",
            NpcKind::Wanderer => "Wanderer",
            NpcKind::DungeonGuardian => "Dungeon Guardian",
        }
    }

    pub fn from_landmark(kind: TerrainKind) -> Option<Self> {
        match kind {
            TerrainKind::Village => Some(NpcKind::Villager),
            TerrainKind::Ruins => Some(NpcKind::Wanderer),
            TerrainKind::Dungeon => Some(NpcKind::DungeonGuardian),
            _ => None,
        }
    }

    /// Landmark kind that spawns this NPC kind
    pub fn landmark(&self) -> TerrainKind {
        match self {
            NpcKind::Villager => TerrainKind::Village,
            NpcKind::Wanderer => TerrainKind::Ruins,
            NpcKind::DungeonGuardian => TerrainKind::Dungeon,
        }
    }
}

impl std::fmt::Display for NpcKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOffer {
    pub item: String,
    pub price: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestStatus {
    Active,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub task: String,
    pub reward: String,
    pub status: QuestStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    pub kind: NpcKind,
    pub position: Coord,
    /// Landmark tile this NPC was created for. Also the key of its quest
    /// and trade offer.
    pub origin: Coord,
    pub dialogue: String,
    pub trade_offer: TradeOffer,
}

impl Npc {
    pub fn quest_key(&self) -> Coord {
        self.origin
    }
}

/// Fixed data attached to every NPC of one kind
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcProfile {
    pub dialogue: Vec<String>,
    pub quest_task: String,
    pub quest_reward: String,
    pub trade: TradeOffer,
}

impl NpcProfile {
    fn new(dialogue: &[&str], quest_task: &str, quest_reward: &str, item: &str, price: u32) -> Self {
        Self {
            dialogue: dialogue.iter().map(|s| s.to_string()).collect(),
            quest_task: quest_task.to_string(),
            quest_reward: quest_reward.to_string(),
            trade: TradeOffer {
                item: item.to_string(),
                price,
            },
        }
    }

    fn quest(&self) -> Quest {
        Quest {
            task: self.quest_task.clone(),
            reward: self.quest_reward.clone(),
            status: QuestStatus::Active,
        }
    }
}

/// Per-kind dialogue, quest and trade tables
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcCatalog {
    pub villager: NpcProfile,
    pub wanderer: NpcProfile,
    pub dungeon_guardian: NpcProfile,
}

impl Default for NpcCatalog {
    fn default() -> Self {
        Self {
            villager: NpcProfile::new(
                &[
                    "Welcome, traveler! The river keeps our fields green.",
                    "Bandits have been seen on the north road. Keep your blade close.",
                    "Fresh bread and cold water, that is all a soul needs.",
                ],
                "Bring back five bundles of river reeds",
                "20 gold and a warm bed",
                "Loaf of bread",
                2,
            ),
            wanderer: NpcProfile::new(
                &[
                    "These stones remember a kingdom older than any map.",
                    "I have walked these ruins for years and still find new carvings.",
                    "Do not read the inscriptions aloud after dark.",
                ],
                "Recover the lost tablet from the collapsed hall",
                "An ancient map fragment",
                "Weathered compass",
                15,
            ),
            dungeon_guardian: NpcProfile::new(
                &[
                    "None pass into the deep without proving their worth.",
                    "The darkness below hungers. Turn back while you can.",
                    "I have guarded this gate for a hundred winters.",
                ],
                "Slay the beast that stirs in the lowest vault",
                "The guardian's enchanted shield",
                "Vial of glowing tonic",
                40,
            ),
        }
    }
}

impl NpcCatalog {
    pub fn profile(&self, kind: NpcKind) -> &NpcProfile {
        match kind {
            NpcKind::Villager => &self.villager,
            NpcKind::Wanderer => &self.wanderer,
            NpcKind::DungeonGuardian => &self.dungeon_guardian,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for &kind in NpcKind::all() {
            if self.profile(kind).dialogue.is_empty() {
                return Err(ConfigError::EmptyDialogue(kind.name()));
            }
        }
        Ok(())
    }
}

/// Active and completed quest registries, keyed by landmark coordinate.
/// A coordinate is never present in both.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestLog {
    active: BTreeMap<Coord, Quest>,
    completed: BTreeMap<Coord, Quest>,
}

impl QuestLog {
    pub fn active(&self) -> &BTreeMap<Coord, Quest> {
        &self.active
    }

    pub fn completed(&self) -> &BTreeMap<Coord, Quest> {
        &self.completed
    }

    pub fn get(&self, key: Coord) -> Option<&Quest> {
        self.active.get(&key).or_else(|| self.completed.get(&key))
    }

    fn insert_active(&mut self, key: Coord, quest: Quest) {
        self.completed.remove(&key);
        self.active.insert(key, quest);
    }

    /// Move the quest at `key` from active to completed.
    /// Returns `false` if there is no active quest there.
    pub fn complete(&mut self, key: Coord) -> bool {
        match self.active.remove(&key) {
            Some(mut quest) => {
                quest.status = QuestStatus::Completed;
                self.completed.insert(key, quest);
                true
            }
            None => false,
        }
    }
}

/// Output of a population pass
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Population {
    /// NPCs in row-major order of their landmark tiles
    pub npcs: Vec<Npc>,
    pub quests: QuestLog,
    pub trades: BTreeMap<Coord, TradeOffer>,
}

/// Create one NPC per landmark tile, scanning row-major. Reads the grid only.
pub fn populate(grid: &Grid, catalog: &NpcCatalog, rng: &mut ChaCha8Rng) -> Population {
    let mut population = Population::default();

    for (x, y, &tile) in grid.iter() {
        let Some(kind) = NpcKind::from_landmark(tile) else {
            continue;
        };

        let origin = Coord::new(x, y);
        let profile = catalog.profile(kind);
        let dialogue = profile.dialogue.choose(rng).cloned().unwrap_or_default();

        population.quests.insert_active(origin, profile.quest());
        population.trades.insert(origin, profile.trade.clone());
        population.npcs.push(Npc {
            kind,
            position: origin,
            origin,
            dialogue,
            trade_offer: profile.trade.clone(),
        });
    }

    info!(
        npcs = population.npcs.len(),
        active_quests = population.quests.active().len(),
        "population complete"
    );
    population
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tilemap::Tilemap;
    use rand::SeedableRng;
    use crate::terrain::TerrainKind::*;

    fn three_landmark_grid() -> Grid {
        Tilemap::from_vec(
            4,
            3,
            vec![
                Grass, Village, Water, Forest, //
                Forest, Forest, Ruins, Mountain, //
                Dungeon, Mountain, Desert, Grass,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_one_npc_per_landmark() {
        let grid = three_landmark_grid();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let pop = populate(&grid, &NpcCatalog::default(), &mut rng);

        assert_eq!(pop.npcs.len(), 3);
        let summary: Vec<(NpcKind, Coord)> = pop.npcs.iter().map(|n| (n.kind, n.position)).collect();
        assert_eq!(
            summary,
            vec![
                (NpcKind::Villager, Coord::new(1, 0)),
                (NpcKind::Wanderer, Coord::new(2, 1)),
                (NpcKind::DungeonGuardian, Coord::new(0, 2)),
            ]
        );

        let keys: Vec<Coord> = pop.quests.active().keys().copied().collect();
        assert_eq!(keys, vec![Coord::new(1, 0), Coord::new(2, 1), Coord::new(0, 2)]);
        assert!(pop.quests.active().values().all(|q| q.status == QuestStatus::Active));
        assert!(pop.quests.completed().is_empty());
        assert_eq!(pop.trades.len(), 3);
    }

    #[test]
    fn test_npc_data_comes_from_its_profile() {
        let grid = three_landmark_grid();
        let catalog = NpcCatalog::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let pop = populate(&grid, &catalog, &mut rng);

        for npc in &pop.npcs {
            let profile = catalog.profile(npc.kind);
            assert!(profile.dialogue.contains(&npc.dialogue));
            assert_eq!(npc.trade_offer, profile.trade);
            assert_eq!(pop.trades[&npc.origin], profile.trade);
            let quest = pop.quests.get(npc.quest_key()).unwrap();
            assert_eq!(quest.task, profile.quest_task);
            assert_eq!(quest.reward, profile.quest_reward);
            assert_eq!(*grid.at(npc.origin), npc.kind.landmark());
        }
    }

    #[test]
    fn test_no_landmarks_no_npcs() {
        let grid = Tilemap::new_with(5, 5, Grass);
        let pop = populate(&grid, &NpcCatalog::default(), &mut ChaCha8Rng::seed_from_u64(0));
        assert!(pop.npcs.is_empty());
        assert!(pop.quests.active().is_empty());
    }

    #[test]
    fn test_population_is_deterministic() {
        let grid = Tilemap::new_with(6, 6, Village);
        let a = populate(&grid, &NpcCatalog::default(), &mut ChaCha8Rng::seed_from_u64(5));
        let b = populate(&grid, &NpcCatalog::default(), &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_complete_moves_quest_between_registries() {
        let grid = three_landmark_grid();
        let mut pop = populate(&grid, &NpcCatalog::default(), &mut ChaCha8Rng::seed_from_u64(3));
        let key = Coord::new(2, 1);

        assert!(pop.quests.complete(key));
        assert!(!pop.quests.active().contains_key(&key));
        assert_eq!(pop.quests.completed()[&key].status, QuestStatus::Completed);
        assert_eq!(pop.quests.active().len(), 2);

        assert!(!pop.quests.complete(key));
        assert!(!pop.quests.complete(Coord::new(3, 2)));
    }

    #[test]
    fn test_empty_dialogue_rejected() {
        let mut catalog = NpcCatalog::default();
        catalog.wanderer.dialogue.clear();
        assert_eq!(catalog.validate(), Err(ConfigError::EmptyDialogue("Wanderer")));
        assert!(NpcCatalog::default().validate().is_ok());
    }

    #[test]
    fn test_kind_landmark_mapping_round_trips() {
        for &kind in NpcKind::all() {
            assert_eq!(NpcKind::from_landmark(kind.landmark()), Some(kind));
        }
        assert_eq!(NpcKind::from_landmark(Grass), None);
    }
}
