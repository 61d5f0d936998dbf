//! SQLite record store for the TASKS collection.

use crate::model::task::{Priority, Task};
use crate::model::{Identifiable, ProjectItem, Tagged};
use crate::store::{bool_to_int, join_tags, split_tags, RecordStore, ID_COLUMN, ITEM_TAG_SEPARATOR};
use crate::time;
use log::error;
use rusqlite::{params, Connection};
use std::rc::Rc;

/// SQLite-backed task store over the shared core connection.
///
/// The collection is global: tasks of every project live in one table and
/// are scoped at the application level through their OWNER_ID column.
pub struct SqliteTaskStore {
    conn: Rc<Connection>,
}

impl SqliteTaskStore {
    /// Constructs the store and ensures its table exists.
    pub fn new(conn: Rc<Connection>) -> Self {
        let store = Self { conn };
        store.init();
        store
    }

    fn load(&self, id: &str) -> rusqlite::Result<Option<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT OWNER_ID, TITLE, TAGS, FAVORITE, PRIORITY, DONE, START, END, CONTENT,
                    LAST_MODIFIED_TIME, CREATION_TIME
             FROM TASKS
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

        let start = row
            .get::<_, Option<String>>("START")?
            .and_then(|value| time::parse_date(&value));
        let deadline = row
            .get::<_, Option<String>>("END")?
            .and_then(|value| time::parse_date(&value));

        let mut builder = Task::builder(
            row.get::<_, String>("OWNER_ID")?,
            row.get::<_, String>("TITLE")?,
        )
        .id(id)
        .tags(split_tags(
            &row.get::<_, String>("TAGS")?,
            ITEM_TAG_SEPARATOR,
        ))
        .favorite(row.get::<_, i64>("FAVORITE")? != 0)
        .priority(Priority::parse(&row.get::<_, String>("PRIORITY")?))
        .done(row.get::<_, i64>("DONE")? != 0)
        .start(start)
        .deadline(deadline)
        .content(row.get::<_, String>("CONTENT")?)
        .creation_time(creation_time);

        let modified_text: String = row.get("LAST_MODIFIED_TIME")?;
        if let Some(modified) = time::parse_date(&modified_text) {
            builder = builder.last_modified_time(modified);
        }

        Ok(Some(builder.build()))
    }
}

impl RecordStore<Task> for SqliteTaskStore {
    fn init(&self) {
        let result = self.conn.execute(
            "CREATE TABLE IF NOT EXISTS TASKS (
                ID TEXT PRIMARY KEY,
                OWNER_ID TEXT,
                TITLE TEXT,
                TAGS TEXT,
                FAVORITE INTEGER,
                PRIORITY TEXT,
                DONE INTEGER,
                START TEXT,
                END TEXT,
                CONTENT TEXT,
                LAST_MODIFIED_TIME TEXT,
                CREATION_TIME TEXT
            );",
            [],
        );
        if let Err(err) = result {
            error!("event=store_init module=store table=TASKS status=error error={err}");
        }
    }

    fn insert(&self, element: &Task) -> bool {
        let result = self.conn.execute(
            "INSERT INTO TASKS (
                ID, OWNER_ID, TITLE, TAGS, FAVORITE, PRIORITY, DONE, START, END, CONTENT,
                LAST_MODIFIED_TIME, CREATION_TIME
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
            params![
                element.id(),
                element.owner_id(),
                element.title(),
                join_tags(element.tags(), ITEM_TAG_SEPARATOR),
                bool_to_int(element.is_favorite()),
                element.priority().as_str(),
                bool_to_int(element.is_done()),
                element.start().map(time::format_date),
                element.deadline().map(time::format_date),
                element.content(),
                time::format_date(element.last_modified_time()),
                time::format_date(element.creation_time()),
            ],
        );
        match result {
            Ok(_) => true,
            Err(err) => {
                error!(
                    "event=store_insert module=store table=TASKS id={} status=error error={err}",
                    element.id()
                );
                false
            }
        }
    }

    fn update(&self, element: &Task) -> bool {
        let result = self.conn.execute(
            "UPDATE TASKS SET
                OWNER_ID = ?1,
                TITLE = ?2,
                TAGS = ?3,
                FAVORITE = ?4,
                PRIORITY = ?5,
                DONE = ?6,
                START = ?7,
                END = ?8,
                CONTENT = ?9,
                LAST_MODIFIED_TIME = ?10
             WHERE ID = ?11;",
            params![
                element.owner_id(),
                element.title(),
                join_tags(element.tags(), ITEM_TAG_SEPARATOR),
                bool_to_int(element.is_favorite()),
                element.priority().as_str(),
                bool_to_int(element.is_done()),
                element.start().map(time::format_date),
                element.deadline().map(time::format_date),
                element.content(),
                time::format_date(element.last_modified_time()),
                element.id(),
            ],
        );
        match result {
            Ok(_) => true,
            Err(err) => {
                error!(
                    "event=store_update module=store table=TASKS id={} status=error error={err}",
                    element.id()
                );
                false
            }
        }
    }

    fn delete(&self, element: &Task) -> bool {
        let result = self
            .conn
            .execute("DELETE FROM TASKS WHERE ID = ?1;", [element.id()]);
        match result {
            Ok(_) => true,
            Err(err) => {
                error!(
                    "event=store_delete module=store table=TASKS id={} status=error error={err}",
                    element.id()
                );
                false
            }
        }
    }

    fn find_by_id(&self, id: &str) -> Option<Task> {
        match self.load(id) {
            Ok(task) => task,
            Err(err) => {
                error!(
                    "event=store_find module=store table=TASKS id={id} status=error error={err}"
                );
                None
            }
        }
    }

    fn find_all(&self) -> Vec<Task> {
        self.values(ID_COLUMN)
            .iter()
            .filter_map(|id| self.find_by_id(id))
            .collect()
    }

    fn values(&self, column: &str) -> Vec<String> {
        let result = (|| -> rusqlite::Result<Vec<String>> {
            let mut stmt = self.conn.prepare(&format!("SELECT {column} FROM TASKS;"))?;
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
                    "event=store_values module=store table=TASKS column={column} status=error error={err}"
                );
                Vec::new()
            }
        }
    }

    fn count(&self) -> usize {
        let result = self
            .conn
            .query_row("SELECT COUNT(*) FROM TASKS;", [], |row| {
                row.get::<_, i64>(0)
            });
        match result {
            Ok(count) => count as usize,
            Err(err) => {
                error!("event=store_count module=store table=TASKS status=error error={err}");
                0
            }
        }
    }
}
