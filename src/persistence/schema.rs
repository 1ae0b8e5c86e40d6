use sqlx::PgPool;

/// Create the tables the API needs if they are missing. Idempotent; existing
/// tables are left untouched.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring PostgreSQL schema...");

    for (name, ddl) in TABLES {
        sqlx::raw_sql(ddl).execute(pool).await.map_err(|e| {
            tracing::error!("Failed to create table {}: {}", name, e);
            e
        })?;
    }

    tracing::info!("PostgreSQL schema ready");
    Ok(())
}

/// Dependency order: referenced tables first.
const TABLES: [(&str, &str); 8] = [
    ("events", CREATE_EVENTS_TABLE),
    ("lots", CREATE_LOTS_TABLE),
    ("speakers", CREATE_SPEAKERS_TABLE),
    ("social_media", CREATE_SOCIAL_MEDIA_TABLE),
    ("event_speakers", CREATE_EVENT_SPEAKERS_TABLE),
    ("users", CREATE_USERS_TABLE),
    ("roles", CREATE_ROLES_TABLE),
    ("user_roles", CREATE_USER_ROLES_TABLE),
];

const CREATE_EVENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS events (
    id SERIAL PRIMARY KEY,
    theme VARCHAR(50) NOT NULL,
    location VARCHAR(200) NOT NULL,
    event_date TIMESTAMP NULL,
    description TEXT NULL,
    people_count INTEGER NOT NULL DEFAULT 0,
    image_url TEXT NULL,
    phone VARCHAR(30) NULL,
    email VARCHAR(256) NOT NULL
)
"#;

const CREATE_LOTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS lots (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    price NUMERIC(18, 2) NOT NULL,
    start_date TEXT NULL,
    end_date TEXT NULL,
    quantity INTEGER NOT NULL DEFAULT 0,
    event_id INTEGER NOT NULL REFERENCES events(id) ON DELETE CASCADE
)
"#;

const CREATE_SPEAKERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS speakers (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    bio TEXT NULL,
    image_url TEXT NULL,
    phone VARCHAR(30) NULL,
    email VARCHAR(256) NULL
)
"#;

const CREATE_SOCIAL_MEDIA_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS social_media (
    id SERIAL PRIMARY KEY,
    name VARCHAR(50) NOT NULL,
    url TEXT NOT NULL,
    speaker_id INTEGER NOT NULL REFERENCES speakers(id) ON DELETE CASCADE
)
"#;

const CREATE_EVENT_SPEAKERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS event_speakers (
    event_id INTEGER NOT NULL REFERENCES events(id) ON DELETE CASCADE,
    speaker_id INTEGER NOT NULL REFERENCES speakers(id) ON DELETE CASCADE,
    PRIMARY KEY (event_id, speaker_id)
)
"#;

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    user_name VARCHAR(256) NOT NULL,
    email VARCHAR(256) NOT NULL,
    first_name VARCHAR(100) NULL,
    last_name VARCHAR(100) NULL,
    phone VARCHAR(30) NULL,
    password_hash TEXT NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS users_user_name_key ON users (LOWER(user_name));
CREATE UNIQUE INDEX IF NOT EXISTS users_email_key ON users (LOWER(email))
"#;

const CREATE_ROLES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS roles (
    id SERIAL PRIMARY KEY,
    name VARCHAR(256) NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS roles_name_key ON roles (LOWER(name))
"#;

const CREATE_USER_ROLES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS user_roles (
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    role_id INTEGER NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
    PRIMARY KEY (user_id, role_id)
)
"#;
