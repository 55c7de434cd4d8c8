//! SQL statements used by the Postgres adapters.

/// Serializes appends per player for the rest of the transaction.
pub const LOCK_PLAYER: &str = "SELECT pg_advisory_xact_lock(hashtextextended($1, 0))";

/// The authoritative save: latest `created_at`, ties broken by greatest id.
pub const SELECT_LATEST_SAVE: &str = r"
SELECT id, player_id, scene_id, honor, rage, karma, created_at, parent_id
FROM saves
WHERE player_id = $1
ORDER BY created_at DESC, id DESC
LIMIT 1
";

pub const SELECT_SAVE_BY_ID: &str = r"
SELECT id, player_id, scene_id, honor, rage, karma, created_at, parent_id
FROM saves
WHERE id = $1
";

pub const INSERT_SAVE: &str = r"
INSERT INTO saves (id, player_id, scene_id, honor, rage, karma, created_at, parent_id)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
";

pub const COUNT_SAVES: &str = "SELECT COUNT(*) FROM saves WHERE player_id = $1";

/// Live session for a token digest. Sessions without expiry never lapse.
pub const SELECT_SESSION_PLAYER: &str = r"
SELECT player_id
FROM player_sessions
WHERE token_sha256 = $1
  AND (expires_at IS NULL OR expires_at > NOW())
";
