//! SQLite record store for the PROJECTS collection.

use crate::model::{Identifiable, Tagged};
use crate::model::project::Project;
use crate::store::{
    bool_to_int, join_tags, split_tags, RecordStore, ID_COLUMN, PROJECT_TAG_SEPARATOR,
};
use crate::time;
use log::error;
use rusqlite::{params, Connection};
use std::rc::Rc;

/// SQLite-backed project store over the shared core connection.
pub struct SqliteProjectStore {
    conn: Rc<Connection>,
}

impl SqliteProjectStore {
    /// Constructs the store and ensures its table exists.
    pub fn new(conn: Rc<Connection>) -> Self {
        let store = Self { conn };
        store.init();
        store
    }

    fn load(&self, id: &str) -> rusqlite::Result<Option<Project>> {
        let mut stmt = self.conn.prepare(
            "SELECT NAME, DESCRIPTION, TAGS, FAVORITE, LAST_MODIFIED_TIME, CREATION_TIME
             FROM PROJECTS
             WHERE ID = ?1;",
        )?;
        let mut rows = stmt.query([id])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let creation_text: String = row.get("CREATION_TIME")?;
        let Some(creation_time) = time::parse_date(&creation_text) else {
            return Ok(None);
        };

        let mut builder = Project::builder(row.get::<_, String>("NAME")?)
            .id(id)
            .description(row.get::<_, String>("DESCRIPTION")?)
            .tags(split_tags(
                &row.get::<_, String>("TAGS")?,
                PROJECT_TAG_SEPARATOR,
            ))
            .favorite(row.get::<_, i64>("FAVORITE")? != 0)
            .creation_time(creation_time);

        let modified_text: String = row.get("LAST_MODIFIED_TIME")?;
        if let Some(modified) = time::parse_date(&modified_text) {
            builder = builder.last_modified_time(modified);
        }

        Ok(Some(builder.build()))
    }
}

impl RecordStore<Project> for SqliteProjectStore {
    fn init(&self) {
        let result = self.conn.execute(
            "CREATE TABLE IF NOT EXISTS PROJECTS (
                ID TEXT PRIMARY KEY,
                NAME TEXT,
                DESCRIPTION TEXT,
                TAGS TEXT,
                FAVORITE INTEGER,
                LAST_MODIFIED_TIME TEXT,
                CREATION_TIME TEXT
            );",
            [],
        );
        if let Err(err) = result {
            error!("event=store_init module=store table=PROJECTS status=error error={err}");
        }
    }

    fn insert(&self, element: &Project) -> bool {
        let result = self.conn.execute(
            "INSERT INTO PROJECTS (
                ID, NAME, DESCRIPTION, TAGS, FAVORITE, LAST_MODIFIED_TIME, CREATION_TIME
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                element.id(),
                element.name(),
                element.description(),
                join_tags(element.tags(), PROJECT_TAG_SEPARATOR),
                bool_to_int(element.is_favorite()),
                time::format_date(element.last_modified_time()),
                time::format_date(element.creation_time()),
            ],
        );
        match result {
            Ok(_) => true,
            Err(err) => {
                error!(
                    "event=store_insert module=store table=PROJECTS id={} status=error error={err}",
                    element.id()
                );
                false
            }
        }
    }

    fn update(&self, element: &Project) -> bool {
        let result = self.conn.execute(
            "UPDATE PROJECTS SET
                NAME = ?1,
                DESCRIPTION = ?2,
                TAGS = ?3,
                FAVORITE = ?4,
                LAST_MODIFIED_TIME = ?5
             WHERE ID = ?6;",
            params![
                element.name(),
                element.description(),
                join_tags(element.tags(), PROJECT_TAG_SEPARATOR),
                bool_to_int(element.is_favorite()),
                time::format_date(element.last_modified_time()),
                element.id(),
            ],
        );
        match result {
            Ok(_) => true,
            Err(err) => {
                error!(
                    "event=store_update module=store table=PROJECTS id={} status=error error={err}",
                    element.id()
                );
                false
            }
        }
    }

    fn delete(&self, element: &Project) -> bool {
        let result = self
            .conn
            .execute("DELETE FROM PROJECTS WHERE ID = ?1;", [element.id()]);
        match result {
            Ok(_) => true,
            Err(err) => {
                error!(
                    "event=store_delete module=store table=PROJECTS id={} status=error error={err}",
                    element.id()
                );
                false
            }
        }
    }

    fn find_by_id(&self, id: &str) -> Option<Project> {
        match self.load(id) {
            Ok(project) => project,
            Err(err) => {
                error!(
                    "event=store_find module=store table=PROJECTS id={id} status=error error={err}"
                );
                None
            }
        }
    }

    fn find_all(&self) -> Vec<Project> {
        self.values(ID_COLUMN)
            .iter()
            .filter_map(|id| self.find_by_id(id))
            .collect()
    }

    fn values(&self, column: &str) -> Vec<String> {
        let result = (|| -> rusqlite::Result<Vec<String>> {
            let mut stmt = self
                .conn
                .prepare(&format!("SELECT {column} FROM PROJECTS;"))?;
            let mut rows = stmt.query([])?;
            let mut values = Vec::new();
            while let Some(row) = rows.next()? {
                values.push(row.get(0)?);
            }
            Ok(values)
        })();
        match result {
            Ok(values) => values,
            Err(err) => {
                error!(
                    "event=store_values module=store table=PROJECTS column={column} status=error error={err}"
                );
                Vec::new()
            }
        }
    }

    fn count(&self) -> usize {
        let result = self
            .conn
            .query_row("SELECT COUNT(*) FROM PROJECTS;", [], |row| {
                row.get::<_, i64>(0)
            });
        match result {
            Ok(count) => count as usize,
            Err(err) => {
                error!("event=store_count module=store table=PROJECTS status=error error={err}");
                0
            }
        }
    }
}
