//! Table definitions applied by `DatabasePool::ensure_schema`

/// Account holders; email is unique
pub const CREATE_ACCOUNTS: &str = r#"
    CREATE TABLE IF NOT EXISTS accounts (
        id CHAR(36) NOT NULL PRIMARY KEY,
        email VARCHAR(100) NOT NULL,
        number VARCHAR(20) NULL,
        created_at DATETIME(6) NOT NULL,
        UNIQUE KEY uq_accounts_email (email)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

/// One refresh record per account. The secret column is binary-collated so
/// lookups never match case-insensitively.
pub const CREATE_REFRESH_TOKENS: &str = r#"
    CREATE TABLE IF NOT EXISTS refresh_tokens (
        account_id CHAR(36) NOT NULL PRIMARY KEY,
        secret VARCHAR(128) CHARACTER SET ascii COLLATE ascii_bin NOT NULL,
        created_at DATETIME(6) NOT NULL,
        KEY idx_refresh_tokens_secret (secret)
    ) ENGINE=InnoDB
"#;

/// Statements in the order they must run
pub const ALL: [&str; 2] = [CREATE_ACCOUNTS, CREATE_REFRESH_TOKENS];
