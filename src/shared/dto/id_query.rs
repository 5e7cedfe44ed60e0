use serde::Deserialize;
use uuid::Uuid;

/// `?id=<uuid>` for procedures that take a bare record id.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IdQuery {
    pub id: Uuid,
}
