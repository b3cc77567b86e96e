//! SQL schema for the Warden SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS prisoners (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    phone       TEXT,
    cell_id     TEXT,
    admitted_at TEXT NOT NULL,   -- ISO 8601 UTC
    status      TEXT NOT NULL,   -- 'in_custody' | 'released'
    released_by TEXT,
    released_at TEXT
);

CREATE TABLE IF NOT EXISTS employees (
    id             TEXT PRIMARY KEY,
    name           TEXT NOT NULL,
    phone          TEXT,
    title          TEXT NOT NULL,
    department     TEXT,
    hired_at       TEXT NOT NULL,
    status         TEXT NOT NULL,   -- 'active' | 'inactive'
    deactivated_at TEXT
);

CREATE TABLE IF NOT EXISTS visitors (
    id            TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    phone         TEXT,
    relationship  TEXT,
    registered_at TEXT NOT NULL,
    status        TEXT NOT NULL,   -- 'approved' | 'banned'
    banned_by     TEXT,
    banned_at     TEXT,
    ban_reason    TEXT
);

CREATE TABLE IF NOT EXISTS cells (
    id          TEXT PRIMARY KEY,
    block       TEXT,
    capacity    INTEGER NOT NULL,
    occupants   TEXT NOT NULL DEFAULT '[]',   -- JSON array of prisoner IDs
    maintenance INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS visits (
    id               TEXT PRIMARY KEY,
    prisoner_id      TEXT NOT NULL REFERENCES prisoners(id),
    visitor_id       TEXT NOT NULL REFERENCES visitors(id),
    scheduled_at     TEXT NOT NULL,
    duration_minutes INTEGER NOT NULL,
    created_at       TEXT NOT NULL,
    status           TEXT NOT NULL,   -- 'scheduled' | 'in_progress' | 'completed' | 'cancelled'
    started_at       TEXT,
    completed_at     TEXT,
    cancelled_at     TEXT
);

CREATE TABLE IF NOT EXISTS tasks (
    id           TEXT PRIMARY KEY,
    description  TEXT NOT NULL,
    assigned_to  TEXT NOT NULL,
    created_at   TEXT NOT NULL,
    due_at       TEXT,
    status       TEXT NOT NULL,   -- 'pending' | 'in_progress' | 'completed' | 'cancelled'
    started_at   TEXT,
    completed_by TEXT,
    completed_at TEXT,
    cancelled_at TEXT
);

CREATE TABLE IF NOT EXISTS alerts (
    id              TEXT PRIMARY KEY,
    message         TEXT NOT NULL,
    severity        TEXT NOT NULL,   -- 'low' | 'medium' | 'high' | 'critical'
    location        TEXT,
    created_at      TEXT NOT NULL,
    status          TEXT NOT NULL,   -- 'active' | 'acknowledged' | 'resolved'
    acknowledged_by TEXT,
    acknowledged_at TEXT,
    resolved_by     TEXT,
    resolved_at     TEXT
);

-- Log entries are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS logs (
    id        TEXT PRIMARY KEY,
    message   TEXT NOT NULL,
    level     TEXT NOT NULL,   -- 'info' | 'warning' | 'critical'
    source    TEXT,
    logged_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS grants (
    id         TEXT PRIMARY KEY,
    holder_id  TEXT NOT NULL,
    area       TEXT NOT NULL,
    level      TEXT NOT NULL,   -- 'none' | 'view' | 'edit' | 'full'
    granted_by TEXT NOT NULL,
    granted_at TEXT NOT NULL,
    expires_on TEXT,            -- YYYY-MM-DD or NULL for permanent
    active     INTEGER NOT NULL DEFAULT 1,
    revoked_by TEXT,
    revoked_at TEXT
);

CREATE INDEX IF NOT EXISTS visits_prisoner_idx ON visits(prisoner_id);
CREATE INDEX IF NOT EXISTS visits_status_idx   ON visits(status);
CREATE INDEX IF NOT EXISTS tasks_status_idx    ON tasks(status);
CREATE INDEX IF NOT EXISTS alerts_status_idx   ON alerts(status);
CREATE INDEX IF NOT EXISTS logs_logged_idx     ON logs(logged_at);
CREATE INDEX IF NOT EXISTS grants_holder_idx   ON grants(holder_id);

PRAGMA user_version = 1;
";
