//! Supported SQL dialects

use serde::{Deserialize, Serialize};
use sqlparser::dialect::{
    AnsiDialect, BigQueryDialect, Dialect, DuckDbDialect, GenericDialect, HiveDialect,
    MsSqlDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect, SnowflakeDialect,
};
use std::fmt;
use std::str::FromStr;

/// SQL dialect understood by the grammar parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    Generic,
    #[default]
    MySql,
    Postgres,
    Sqlite,
    Ansi,
    MsSql,
    BigQuery,
    Snowflake,
    DuckDb,
    Hive,
}

impl SqlDialect {
    /// All dialects, in display order
    pub const ALL: [SqlDialect; 10] = [
        SqlDialect::Generic,
        SqlDialect::MySql,
        SqlDialect::Postgres,
        SqlDialect::Sqlite,
        SqlDialect::Ansi,
        SqlDialect::MsSql,
        SqlDialect::BigQuery,
        SqlDialect::Snowflake,
        SqlDialect::DuckDb,
        SqlDialect::Hive,
    ];

    /// Canonical lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            SqlDialect::Generic => "generic",
            SqlDialect::MySql => "mysql",
            SqlDialect::Postgres => "postgres",
            SqlDialect::Sqlite => "sqlite",
            SqlDialect::Ansi => "ansi",
            SqlDialect::MsSql => "mssql",
            SqlDialect::BigQuery => "bigquery",
            SqlDialect::Snowflake => "snowflake",
            SqlDialect::DuckDb => "duckdb",
            SqlDialect::Hive => "hive",
        }
    }

    /// Grammar parser dialect
    pub fn to_dialect(self) -> Box<dyn Dialect> {
        match self {
            SqlDialect::Generic => Box::new(GenericDialect {}),
            SqlDialect::MySql => Box::new(MySqlDialect {}),
            SqlDialect::Postgres => Box::new(PostgreSqlDialect {}),
            SqlDialect::Sqlite => Box::new(SQLiteDialect {}),
            SqlDialect::Ansi => Box::new(AnsiDialect {}),
            SqlDialect::MsSql => Box::new(MsSqlDialect {}),
            SqlDialect::BigQuery => Box::new(BigQueryDialect {}),
            SqlDialect::Snowflake => Box::new(SnowflakeDialect {}),
            SqlDialect::DuckDb => Box::new(DuckDbDialect {}),
            SqlDialect::Hive => Box::new(HiveDialect {}),
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SqlDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "generic" => Ok(SqlDialect::Generic),
            "mysql" | "mariadb" => Ok(SqlDialect::MySql),
            "postgres" | "postgresql" | "pg" => Ok(SqlDialect::Postgres),
            "sqlite" => Ok(SqlDialect::Sqlite),
            "ansi" => Ok(SqlDialect::Ansi),
            "mssql" | "tsql" | "sqlserver" => Ok(SqlDialect::MsSql),
            "bigquery" => Ok(SqlDialect::BigQuery),
            "snowflake" => Ok(SqlDialect::Snowflake),
            "duckdb" => Ok(SqlDialect::DuckDb),
            "hive" => Ok(SqlDialect::Hive),
            other => Err(format!(
                "unknown dialect '{other}' (expected one of: {})",
                SqlDialect::ALL.map(SqlDialect::name).join(", ")
            )),
        }
    }
}
