//! SQL schema for the ShouldIEat SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per registered allergen. item_id references the compiled-in
-- catalog, so it is validated on read rather than by a foreign key.
CREATE TABLE IF NOT EXISTS profile_entries (
    item_id     INTEGER PRIMARY KEY,
    severity    TEXT    NOT NULL,   -- 'severe' | 'moderate' | 'mild'
    position    INTEGER NOT NULL,   -- insertion order; kept on replace
    recorded_at TEXT    NOT NULL    -- ISO 8601 UTC
);

-- Cards are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS cards (
    seq            INTEGER PRIMARY KEY AUTOINCREMENT,
    card_id        TEXT    NOT NULL UNIQUE,
    food_name      TEXT    NOT NULL,
    timestamp      TEXT    NOT NULL,   -- ISO 8601 UTC; analysis time
    location       TEXT    NOT NULL,
    status         TEXT    NOT NULL,   -- 'unconfirmed' | 'confirmed'
    allergens_json TEXT    NOT NULL    -- JSON array of ContainAllergen
);

CREATE INDEX IF NOT EXISTS profile_position_idx ON profile_entries(position);

PRAGMA user_version = 1;
";
