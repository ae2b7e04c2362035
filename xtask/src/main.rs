// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! Wraps the cargo invocations CI runs (lint, build, test, coverage) and
//! adds a schema check for the `SQLite` migrations. Run `cargo xtask ci`
//! before pushing.
//!
//! ### Schema Verification
//!
//! `cargo xtask verify-migrations` applies every migration to a scratch
//! in-memory database, reverts them all, applies them again and compares
//! the resulting tables with the schema the persistence crate queries
//! against. It needs no external services.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{fmt::Debug, io, process::Output, vec};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, Result};
use diesel::sql_types::{Integer, Text};
use diesel::{QueryableByName, RunQueryDsl, SqliteConnection};
use duct::cmd;
use std::collections::{BTreeMap, BTreeSet};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, unused dependencies, build, test, schema)
    CI,

    /// Build every target
    #[command(visible_alias = "b")]
    Build,

    /// Write an lcov coverage report to `target/lcov.info`
    #[command(visible_alias = "cov")]
    Coverage,

    /// Check for unused dependencies
    #[command(visible_alias = "m")]
    Machete,

    /// Run clippy, rustdoc, rustfmt and typos checks
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy with warnings denied
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Build docs with warnings denied
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check formatting
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Check for typos
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Apply rustfmt
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run unit, integration and doc tests
    #[command(visible_alias = "t")]
    Test,

    /// Verify that the migrations produce the expected schema
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Coverage => coverage(),
            Self::Machete => machete(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::LintTypos => lint_typos(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

fn ci() -> Result<()> {
    lint()?;
    machete()?;
    build()?;
    test()?;
    verify_migrations()?;
    Ok(())
}

/// `rusqlite` is linked only for its bundled `SQLite` and is listed in the
/// persistence crate's `cargo-machete` ignore list.
fn machete() -> Result<()> {
    cmd!("cargo-machete").run_with_trace()?;
    Ok(())
}

fn build() -> Result<()> {
    run_cargo(vec!["build", "--workspace", "--all-targets"])
}

fn coverage() -> Result<()> {
    run_cargo(vec![
        "llvm-cov",
        "--workspace",
        "--lcov",
        "--output-path",
        "target/lcov.info",
    ])
}

fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    lint_typos()
}

fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--workspace",
        "--all-targets",
        "--",
        "-D",
        "warnings",
    ])
}

/// Build docs for each default member the way docs.rs would
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd("cargo", ["doc", "--no-deps", "--package", &package.name])
            .env_remove("CARGO")
            .env("RUSTUP_TOOLCHAIN", "nightly")
            .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
            .run_with_trace()?;
    }

    Ok(())
}

fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Uses [typos-cli](https://github.com/crate-ci/typos/)
fn lint_typos() -> Result<()> {
    cmd!("typos").run_with_trace()?;
    Ok(())
}

fn test() -> Result<()> {
    run_cargo(vec!["test", "--workspace", "--all-targets"])?;
    // Doc tests last, they are the slowest.
    run_cargo(vec!["test", "--workspace", "--doc"])
}

fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // Set by cargo when running a subcommand; it would pin the stable toolchain.
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Verify that the migrations produce the expected schema
///
/// ## What This Command Does
///
/// 1. Applies every migration to a scratch in-memory `SQLite` database
/// 2. Reverts them all, checking that each `down.sql` undoes its `up.sql`
/// 3. Applies them again
/// 4. Introspects the tables and compares them with [`expected_schema`]
///
/// ## Failures
///
/// The command fails if a migration does not apply or revert cleanly, or if
/// any table, column, key or constraint differs from what the persistence
/// crate relies on. The unique constraint on `override_date` is what keeps
/// two overrides off the same date, so its absence is always an error.
fn verify_migrations() -> Result<()> {
    use diesel::Connection;
    use diesel_migrations::{embed_migrations, MigrationHarness};

    #[allow(clippy::items_after_statements)]
    const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
        embed_migrations!("../crates/persistence/migrations");

    tracing::info!("Starting schema verification");

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to apply migrations: {}", e))?;
    tracing::info!("Migrations applied");

    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to revert migrations: {}", e))?;
    let leftover = introspect_sqlite_schema(&mut conn)?;
    if !leftover.tables.is_empty() {
        let names: Vec<&String> = leftover.tables.keys().collect();
        return Err(color_eyre::eyre::eyre!(
            "Tables left behind after reverting all migrations: {:?}",
            names
        ));
    }
    tracing::info!("Migrations reverted cleanly");

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to re-apply migrations: {}", e))?;

    tracing::info!("Introspecting schema");
    let actual = introspect_sqlite_schema(&mut conn)?;

    compare_schemas(&expected_schema(), &actual)?;

    tracing::info!("✓ Schema verification passed");
    Ok(())
}

/// Normalized schema representation
#[derive(Debug, Clone, PartialEq, Eq)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Table {
    columns: BTreeMap<String, Column>,
    primary_keys: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
    unique_constraints: BTreeSet<UniqueConstraint>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Column {
    name: String,
    normalized_type: String,
    nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct UniqueConstraint {
    columns: Vec<String>,
}

/// Builds a table description from `(name, type, nullable)` column triples.
fn table(columns: &[(&str, &str, bool)], primary_key: &str) -> Table {
    Table {
        columns: columns
            .iter()
            .map(|(name, normalized_type, nullable)| {
                (
                    (*name).to_string(),
                    Column {
                        name: (*name).to_string(),
                        normalized_type: (*normalized_type).to_string(),
                        nullable: *nullable,
                    },
                )
            })
            .collect(),
        primary_keys: BTreeSet::from([primary_key.to_string()]),
        ..Table::default()
    }
}

/// The schema `crates/persistence/src/diesel_schema.rs` is written against
fn expected_schema() -> Schema {
    let doctors = table(
        &[
            ("doctor_id", "TEXT", false),
            ("display_name", "TEXT", false),
            ("is_active", "INTEGER", false),
            ("schedule_pattern", "TEXT", true),
            ("created_at", "TEXT", false),
        ],
        "doctor_id",
    );

    let mut schedule_overrides = table(
        &[
            ("override_id", "TEXT", false),
            ("override_date", "TEXT", false),
            ("original_doctor_id", "TEXT", true),
            ("assigned_doctor_id", "TEXT", false),
            ("reason", "TEXT", false),
            ("created_at", "TEXT", false),
            ("updated_at", "TEXT", false),
        ],
        "override_id",
    );
    schedule_overrides.foreign_keys.insert(ForeignKey {
        from_column: String::from("assigned_doctor_id"),
        to_table: String::from("doctors"),
        to_column: String::from("doctor_id"),
    });
    schedule_overrides
        .unique_constraints
        .insert(UniqueConstraint {
            columns: vec![String::from("override_date")],
        });

    Schema {
        tables: BTreeMap::from([
            (String::from("doctors"), doctors),
            (String::from("schedule_overrides"), schedule_overrides),
        ]),
    }
}

/// Introspect `SQLite` schema
fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        origin: String,
    }

    #[derive(QueryableByName)]
    struct IndexColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let mut schema = Schema {
        tables: BTreeMap::new(),
    };

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    for table in tables {
        let mut table_info = Table::default();

        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;

        for col in columns {
            table_info.columns.insert(
                col.name.clone(),
                Column {
                    name: col.name.clone(),
                    normalized_type: col.r#type.to_uppercase(),
                    nullable: col.notnull == 0,
                },
            );

            if col.pk > 0 {
                table_info.primary_keys.insert(col.name);
            }
        }

        let fks: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err(format!(
                    "Failed to get foreign keys for table {}",
                    table.name
                ))?;

        for fk in fks {
            table_info.foreign_keys.insert(ForeignKey {
                from_column: fk.from,
                to_table: fk.table,
                to_column: fk.to,
            });
        }

        let indexes: Vec<IndexInfo> =
            diesel::sql_query(format!("PRAGMA index_list({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get indexes for table {}", table.name))?;

        // Only UNIQUE constraints matter here; plain indexes are tuning.
        for idx in indexes.into_iter().filter(|idx| idx.origin == "u") {
            let index_columns: Vec<IndexColumnInfo> =
                diesel::sql_query(format!("PRAGMA index_info({})", idx.name))
                    .load(conn)
                    .wrap_err(format!("Failed to get index columns for {}", idx.name))?;

            table_info.unique_constraints.insert(UniqueConstraint {
                columns: index_columns.into_iter().map(|c| c.name).collect(),
            });
        }

        schema.tables.insert(table.name, table_info);
    }

    Ok(schema)
}

/// Compare the expected schema with the migrated one, reporting every difference
fn compare_schemas(expected: &Schema, actual: &Schema) -> Result<()> {
    let mut differences: Vec<String> = Vec::new();

    for (name, expected_table) in &expected.tables {
        let Some(actual_table) = actual.tables.get(name) else {
            differences.push(format!("missing table '{name}'"));
            continue;
        };

        for (column_name, expected_column) in &expected_table.columns {
            match actual_table.columns.get(column_name) {
                None => differences.push(format!("{name}: missing column '{column_name}'")),
                Some(actual_column) if actual_column != expected_column => {
                    differences.push(format!(
                        "{name}.{column_name}: expected {expected_column:?}, found {actual_column:?}"
                    ));
                }
                Some(_) => {}
            }
        }

        for column_name in actual_table.columns.keys() {
            if !expected_table.columns.contains_key(column_name) {
                differences.push(format!("{name}: unexpected column '{column_name}'"));
            }
        }

        if actual_table.primary_keys != expected_table.primary_keys {
            differences.push(format!(
                "{name}: primary key {:?}, expected {:?}",
                actual_table.primary_keys, expected_table.primary_keys
            ));
        }

        if actual_table.foreign_keys != expected_table.foreign_keys {
            differences.push(format!(
                "{name}: foreign keys {:?}, expected {:?}",
                actual_table.foreign_keys, expected_table.foreign_keys
            ));
        }

        if actual_table.unique_constraints != expected_table.unique_constraints {
            differences.push(format!(
                "{name}: unique constraints {:?}, expected {:?}",
                actual_table.unique_constraints, expected_table.unique_constraints
            ));
        }
    }

    for name in actual.tables.keys() {
        if !expected.tables.contains_key(name) {
            differences.push(format!("unexpected table '{name}'"));
        }
    }

    if differences.is_empty() {
        return Ok(());
    }

    for difference in &differences {
        tracing::error!("{difference}");
    }
    Err(color_eyre::eyre::eyre!(
        "Schema verification failed with {} difference(s)",
        differences.len()
    ))
}


/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
