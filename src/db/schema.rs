//! Catalog types for the SQLite demo database.
//!
//! Describes the tables and views the query engine's SQLite catalog exposes,
//! along with the logical type each declared column type maps to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The only schema the SQLite catalog exposes.
pub const DEFAULT_SCHEMA: &str = "default";

/// All relations in a SQLite database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Tables and views, ordered by kind then name.
    pub relations: Vec<Relation>,
}

impl Catalog {
    /// Finds a relation by name.
    pub fn get(&self, name: &str) -> Option<&Relation> {
        self.relations.iter().find(|r| r.name == name)
    }

    /// Iterates over base tables only.
    pub fn tables(&self) -> impl Iterator<Item = &Relation> {
        self.relations
            .iter()
            .filter(|r| r.kind == RelationKind::Table)
    }

    /// Iterates over views only.
    pub fn views(&self) -> impl Iterator<Item = &Relation> {
        self.relations.iter().filter(|r| r.kind == RelationKind::View)
    }
}

/// Whether a relation is a base table or a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Table,
    View,
}

impl RelationKind {
    /// Returns the kind as stored in `sqlite_master.type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::View => "view",
        }
    }

    /// Parses a `sqlite_master.type` value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "table" => Some(Self::Table),
            "view" => Some(Self::View),
            _ => None,
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A table or view with its columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    /// Relation name.
    pub name: String,

    /// Table or view.
    pub kind: RelationKind,

    /// Columns in ordinal order.
    pub columns: Vec<Column>,

    /// Number of rows at introspection time.
    pub row_count: i64,
}

/// A column of a SQLite relation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,

    /// Zero-based ordinal position.
    pub ordinal: usize,

    /// Type as declared in the DDL (may be empty for view expressions).
    pub declared_type: String,

    /// Logical type the engine sees.
    pub logical_type: LogicalType,

    /// Whether the column accepts NULL.
    pub is_nullable: bool,

    /// Whether the column is part of the primary key.
    pub is_primary_key: bool,
}

/// Engine-side logical type of a SQLite column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalType {
    Bigint,
    Integer,
    Double,
    Boolean,
    Varchar,
}

impl LogicalType {
    /// Maps a SQLite declared type to the logical type.
    ///
    /// SQLite typing is flexible, so this goes by substrings of the declared
    /// name. Order matters: `POINT` contains `INT` and maps to integer.
    pub fn from_declared(declared: &str) -> Self {
        let name = declared.trim().to_uppercase();

        if name.contains("INT") {
            if name.contains("BIGINT") {
                return Self::Bigint;
            }
            return Self::Integer;
        }
        if name.contains("REAL") || name.contains("FLOAT") || name.contains("DOUBLE") {
            return Self::Double;
        }
        if name.contains("BOOL") {
            return Self::Boolean;
        }
        if name.contains("CHAR") || name.contains("TEXT") || name.contains("CLOB") {
            return Self::Varchar;
        }
        if name.contains("BLOB") || name.is_empty() {
            return Self::Varchar;
        }
        if name.contains("NUMERIC") || name.contains("DECIMAL") {
            return Self::Double;
        }

        Self::Varchar
    }

    /// Returns the engine's name for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bigint => "bigint",
            Self::Integer => "integer",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Varchar => "varchar",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
