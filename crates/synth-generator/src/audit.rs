//! CRUD audit logs for players, quests, items and guilds.
//!
//! An [`AuditLog`] holds two kinds of entries:
//!
//! - entity logs: a full entity snapshot plus a `CREATE`/`DELETE`/`UPDATE`
//!   action, with ids unique within each entity kind
//! - activity logs: an id, a timestamp and an activity such as `LOGIN` or
//!   `BOUGHT`, with ids drawn independently so the same id can repeat
//!
//! All ids fall in `MIN_ID..MIN_ID + n + ID_SPREAD` where `n` is the number
//! of entries of that kind, so activity ids overlap the entity ids.

use crate::generators::timestamp::generate_timestamp;
use crate::generators::word::generate_word;
use rand::seq::{index, SliceRandom};
use rand::Rng;
use serde::Serialize;
use synth_core::{format_iso, TimeWindow};
use tracing::{debug, info};

/// Smallest id handed out.
pub const MIN_ID: u32 = 101;

/// Extra room above the entry count that ids are drawn from.
pub const ID_SPREAD: u32 = 300;

/// Base entry count `n` when none is configured.
pub const DEFAULT_BASE_COUNT: usize = 200;

const GUILD_SUFFIXES: &[&str] = &["Order", "Clan", "Legion", "Company", "Brotherhood", "Covenant"];

const ITEM_COLORS: &[&str] = &[
    "Crimson", "Azure", "Amber", "Ivory", "Obsidian", "Emerald", "Silver", "Violet", "Ochre",
    "Teal", "Scarlet", "Ashen",
];

const MAIL_DOMAINS: &[&str] = &["example.com", "example.net", "example.org"];

// ============================================================================
// Actions and enumerations
// ============================================================================

/// Change applied to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrudAction {
    Create,
    Delete,
    Update,
}

impl CrudAction {
    pub const ALL: &'static [CrudAction] =
        &[CrudAction::Create, CrudAction::Delete, CrudAction::Update];
}

/// What happened in an activity log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Activity {
    Login,
    Logout,
    Started,
    Completed,
    Bought,
    Sold,
    ClassChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuestStatus {
    Incomplete,
    Complete,
    #[serde(rename = "In Progress")]
    InProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemKind {
    Weapon,
    Armor,
    Potion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CharacterClass {
    Warrior,
    Mage,
    Archer,
}

// ============================================================================
// Entries
// ============================================================================

/// An entity snapshot with the action applied to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityLog<T> {
    pub entity: T,
    pub action: CrudAction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerEntry {
    pub id: u32,
    pub name: String,
    pub email: String,
    /// 1..=100
    pub level: u32,
    /// Set for about half the players
    pub guild: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestEntry {
    pub id: u32,
    pub title: String,
    pub description: String,
    /// 100..=1000
    pub reward: u32,
    pub status: Option<QuestStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemEntry {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// 1.0..=100.0, two decimals
    pub price: f64,
    pub in_stock: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuildEntry {
    pub id: u32,
    pub name: String,
    pub realm: String,
    /// 1..=50
    pub membership_count: u32,
}

/// One timestamped activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    pub id: u32,
    pub timestamp: String,
    pub action: Activity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_class: Option<CharacterClass>,
}

/// Every audit list of one run, serialized as one JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuditLog {
    pub player_sessions: Vec<ActivityEntry>,
    pub quest_progress: Vec<ActivityEntry>,
    pub item_transactions: Vec<ActivityEntry>,
    pub class_changes: Vec<ActivityEntry>,
    pub player_logs: Vec<EntityLog<PlayerEntry>>,
    pub quest_logs: Vec<EntityLog<QuestEntry>>,
    pub item_logs: Vec<EntityLog<ItemEntry>>,
    pub guild_logs: Vec<EntityLog<GuildEntry>>,
}

impl AuditLog {
    /// Entries across all lists.
    pub fn total_entries(&self) -> usize {
        self.player_sessions.len()
            + self.quest_progress.len()
            + self.item_transactions.len()
            + self.class_changes.len()
            + self.player_logs.len()
            + self.quest_logs.len()
            + self.item_logs.len()
            + self.guild_logs.len()
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Builds an [`AuditLog`] from a base count `n`.
///
/// | list | entries |
/// |---|---|
/// | players, quests, items, player sessions | n |
/// | guilds, class changes | n / 2 |
/// | quest progress | 2n |
/// | item transactions | 3n |
#[derive(Debug, Clone)]
pub struct AuditLogGenerator<'a> {
    window: &'a TimeWindow,
    base_count: usize,
}

impl<'a> AuditLogGenerator<'a> {
    pub fn new(window: &'a TimeWindow) -> Self {
        Self {
            window,
            base_count: DEFAULT_BASE_COUNT,
        }
    }

    pub fn with_base_count(mut self, base_count: usize) -> Self {
        self.base_count = base_count;
        self
    }

    pub fn generate<R: Rng>(&self, rng: &mut R) -> AuditLog {
        let n = self.base_count;
        info!("Generating audit logs with base count {}", n);

        let log = AuditLog {
            player_logs: entity_logs(rng, n, player),
            quest_logs: entity_logs(rng, n, quest),
            item_logs: entity_logs(rng, n, item),
            guild_logs: entity_logs(rng, n / 2, guild),
            player_sessions: self.activities(rng, n, &[Activity::Login, Activity::Logout]),
            quest_progress: self.activities(rng, n * 2, &[Activity::Started, Activity::Completed]),
            item_transactions: self.activities(rng, n * 3, &[Activity::Bought, Activity::Sold]),
            class_changes: self.class_changes(rng, n / 2),
        };

        debug!("Generated {} audit entries", log.total_entries());
        log
    }

    fn activities<R: Rng>(
        &self,
        rng: &mut R,
        count: usize,
        actions: &[Activity],
    ) -> Vec<ActivityEntry> {
        (0..count)
            .map(|_| ActivityEntry {
                id: activity_id(rng, count),
                timestamp: format_iso(&generate_timestamp(rng, self.window)),
                action: actions.choose(rng).copied().unwrap_or(Activity::Login),
                new_class: None,
            })
            .collect()
    }

    fn class_changes<R: Rng>(&self, rng: &mut R, count: usize) -> Vec<ActivityEntry> {
        const CLASSES: &[CharacterClass] =
            &[CharacterClass::Warrior, CharacterClass::Mage, CharacterClass::Archer];
        (0..count)
            .map(|_| ActivityEntry {
                id: activity_id(rng, count),
                timestamp: format_iso(&generate_timestamp(rng, self.window)),
                action: Activity::ClassChange,
                new_class: CLASSES.choose(rng).copied(),
            })
            .collect()
    }
}

/// `count` distinct ids from `MIN_ID..MIN_ID + count + ID_SPREAD`.
fn distinct_ids<R: Rng>(rng: &mut R, count: usize) -> Vec<u32> {
    index::sample(rng, count + ID_SPREAD as usize, count)
        .into_iter()
        .map(|i| MIN_ID + i as u32)
        .collect()
}

fn activity_id<R: Rng>(rng: &mut R, count: usize) -> u32 {
    rng.gen_range(MIN_ID..=MIN_ID + count as u32 + ID_SPREAD)
}

fn entity_logs<R, T, F>(rng: &mut R, count: usize, build: F) -> Vec<EntityLog<T>>
where
    R: Rng,
    F: Fn(&mut R, u32) -> T,
{
    distinct_ids(rng, count)
        .into_iter()
        .map(|id| {
            let entity = build(rng, id);
            let action = CrudAction::ALL.choose(rng).copied().unwrap_or(CrudAction::Create);
            EntityLog { entity, action }
        })
        .collect()
}

fn player<R: Rng>(rng: &mut R, id: u32) -> PlayerEntry {
    let first = name_word(rng, 2, 4);
    let last = name_word(rng, 3, 5);
    let domain = MAIL_DOMAINS.choose(rng).copied().unwrap_or("example.com");
    let guild = rng
        .gen_bool(0.5)
        .then(|| GUILD_SUFFIXES.choose(rng).copied().unwrap_or("Clan").to_string());
    PlayerEntry {
        id,
        email: format!("{}.{}@{domain}", first.to_lowercase(), last.to_lowercase()),
        name: format!("{first} {last}"),
        level: rng.gen_range(1..=100),
        guild,
    }
}

fn quest<R: Rng>(rng: &mut R, id: u32) -> QuestEntry {
    let title = (0..rng.gen_range(2..=4))
        .map(|_| name_word(rng, 2, 5))
        .collect::<Vec<_>>()
        .join(" ");
    let mut description = (0..rng.gen_range(6..=14))
        .map(|_| {
            let units = rng.gen_range(1..=4);
            generate_word(rng, units)
        })
        .collect::<Vec<_>>()
        .join(" ");
    description.push('.');
    const STATUSES: &[Option<QuestStatus>] = &[
        Some(QuestStatus::Incomplete),
        Some(QuestStatus::Complete),
        Some(QuestStatus::InProgress),
        None,
    ];
    QuestEntry {
        id,
        title,
        description: capitalize(&description),
        reward: rng.gen_range(100..=1000),
        status: STATUSES.choose(rng).copied().flatten(),
    }
}

fn item<R: Rng>(rng: &mut R, id: u32) -> ItemEntry {
    const KINDS: &[ItemKind] = &[ItemKind::Weapon, ItemKind::Armor, ItemKind::Potion];
    let price: f64 = rng.gen_range(1.0..=100.0);
    ItemEntry {
        id,
        name: ITEM_COLORS.choose(rng).copied().unwrap_or("Ashen").to_string(),
        kind: KINDS.choose(rng).copied().unwrap_or(ItemKind::Potion),
        price: (price * 100.0).round() / 100.0,
        in_stock: rng.gen_range(0..=100),
    }
}

fn guild<R: Rng>(rng: &mut R, id: u32) -> GuildEntry {
    let suffix = GUILD_SUFFIXES.choose(rng).copied().unwrap_or("Clan");
    GuildEntry {
        id,
        name: format!("{} {suffix}", name_word(rng, 2, 4)),
        realm: name_word(rng, 2, 5),
        membership_count: rng.gen_range(1..=50),
    }
}

fn name_word<R: Rng>(rng: &mut R, min_units: usize, max_units: usize) -> String {
    let units = rng.gen_range(min_units..=max_units);
    capitalize(&generate_word(rng, units))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
