use sqlx::PgPool;

/// Shared handler state. The pool is created in `main`, injected here, and
/// closed explicitly on shutdown; nothing else in the process holds it.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}
